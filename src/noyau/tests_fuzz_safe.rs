//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions générées avec leur valeur attendue (calculée en parallèle)
//! - soupe de jetons : le strict peut refuser, le souple ne panique jamais
//! - invariant clé : quand le strict réussit, le souple donne la même valeur

use std::time::{Duration, Instant};

use super::{Calculateur, Variables};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

const X: f64 = 15.0;

fn calc() -> Calculateur<'static> {
    let _ = env_logger::builder().is_test(true).try_init();
    Calculateur::new(Variables::from([("x".to_string(), X)]))
        .unwrap_or_else(|e| panic!("calculateur: {e}"))
}

/// Même valeur, à 1e-9 relatif près ; NaN == NaN, inf de même signe.
fn meme_valeur(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// evaluate(build(convert(expr)))
fn souple(c: &Calculateur<'_>, expr: &str) -> f64 {
    let postfix = c.convert(expr);
    let arbre = c.build(&postfix);
    c.evaluate(arbre.as_ref())
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> (String, f64) {
    match rng.pick(12) {
        0 => ("x".to_string(), X),
        1 => ("pi".to_string(), std::f64::consts::PI),
        2 => ("0.5".to_string(), 0.5),
        n => (n.to_string(), n as f64),
    }
}

/// Expression entièrement parenthésée + sa valeur calculée directement.
fn gen_expr(rng: &mut Rng, depth: usize) -> (String, f64) {
    if depth == 0 || rng.pick(4) == 0 {
        return gen_atom(rng);
    }

    match rng.pick(6) {
        0..=2 => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            let (op, v) = match rng.pick(4) {
                0 => ("+", va + vb),
                1 => ("-", va - vb),
                2 => ("*", va * vb),
                _ => ("/", va / vb),
            };
            (format!("({a}{op}{b})"), v)
        }
        3 => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (f, v) = match rng.pick(3) {
                0 => ("sin", va.sin()),
                1 => ("cos", va.cos()),
                _ => ("abs", va.abs()),
            };
            (format!("{f}({a})"), v)
        }
        4 => {
            let (a, va) = gen_expr(rng, depth - 1);
            (format!("-({a})"), -va)
        }
        _ => {
            let (a, va) = gen_expr(rng, depth - 1);
            if rng.coin() {
                (format!("sqrt(abs({a}))"), va.abs().sqrt())
            } else {
                (format!("({a})^2"), va.powf(2.0))
            }
        }
    }
}

/// Soupe de morceaux : bien ou mal formée, au hasard.
fn gen_soupe(rng: &mut Rng) -> String {
    const MORCEAUX: [&str; 22] = [
        "1", "2.5", ".5", "x", "pi", "e", "sin", "cos(", "sqrt(", "(", ")", "+", "-", "*", "/",
        "^", " ", "-", "neg", "[", "}", "#",
    ];
    let n = 1 + rng.pick(24) as usize;
    (0..n)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

fn somme_balancee(terme: &str, n: usize) -> String {
    // construit ((a+a)+(a+a))... => profondeur ~ log2(n)
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::with_capacity(items.len().div_ceil(2));
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
            } else {
                next.push(items[i].clone());
            }
            i += 2;
        }
        items = next;
    }
    items.pop().unwrap_or_default()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_valeurs_attendues() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let c = calc();
    let mut rng = Rng::new(0xC0FFEE);

    for i in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 6);
        let strict = c
            .calculer(&expr)
            .unwrap_or_else(|e| panic!("i={i} expr={expr:?} err={e}"));
        assert!(
            meme_valeur(strict, attendu),
            "i={i} expr={expr:?} obtenu={strict} attendu={attendu}"
        );

        let s = souple(&c, &expr);
        assert!(meme_valeur(s, strict), "i={i} expr={expr:?} souple={s} strict={strict}");
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let c = calc();
    let mut r1 = Rng::new(42);
    let mut r2 = Rng::new(42);

    for _ in 0..100 {
        budget(t0, max);

        let (e1, _) = gen_expr(&mut r1, 5);
        let (e2, _) = gen_expr(&mut r2, 5);
        assert_eq!(e1, e2);

        assert_eq!(c.convert(&e1), c.convert(&e2));
        let (a, b) = (c.calculer(&e1), c.calculer(&e2));
        match (a, b) {
            (Ok(a), Ok(b)) => assert!(meme_valeur(a, b), "expr={e1:?}"),
            (a, b) => assert_eq!(a, b, "expr={e1:?}"),
        }
    }
}

#[test]
fn fuzz_safe_soupe_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let c = calc();
    let mut rng = Rng::new(0xBADC0DE);
    let mut acceptees = 0;

    for i in 0..1000 {
        budget(t0, max);

        let expr = gen_soupe(&mut rng);
        let s = souple(&c, &expr);

        // le strict peut refuser ; s'il accepte, le souple est d'accord
        if let Ok(v) = c.calculer(&expr) {
            acceptees += 1;
            assert!(meme_valeur(s, v), "i={i} expr={expr:?} souple={s} strict={v}");
        }
    }

    // la soupe doit quand même produire quelques expressions valides
    assert!(acceptees > 0);
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let c = calc();
    let expr = somme_balancee("1", 800);
    budget(t0, max);

    assert_eq!(c.calculer(&expr), Ok(800.0));
    assert_eq!(souple(&c, &expr), 800.0);
    budget(t0, max);
}
