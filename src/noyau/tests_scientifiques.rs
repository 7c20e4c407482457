//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés du pipeline sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes (alignées avec l'état actuel du noyau) :
//! - '^' est enregistré associatif à GAUCHE : 2^3^2 = 64, pas 512.
//! - un '-' collé à un chiffre en position de valeur fait partie du littéral :
//!   -2^2 = (-2)^2 = 4.
//! - un '-' seul en position de valeur devient `neg` (fonction) : -x^2 = (-x)^2.

use std::f64::consts::{E, PI};
use std::time::{Duration, Instant};

use super::{Calculateur, ErreurCalc, Limites, Variables};

fn calc() -> Calculateur<'static> {
    let _ = env_logger::builder().is_test(true).try_init();
    Calculateur::new(Variables::from([
        ("x".to_string(), 15.0),
        ("y".to_string(), -0.5),
    ]))
    .unwrap_or_else(|e| panic!("calculateur: {e}"))
}

fn eval_ok(expr: &str) -> f64 {
    calc()
        .calculer(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    let tol = 1e-9 * attendu.abs().max(1.0);
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} obtenu={v} attendu={attendu}"
    );
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence() {
    assert_proche("2+3*4", 14.0);
    assert_proche("2*3+4", 10.0);
    assert_proche("2+3^2*2", 20.0);
    assert_proche("10/2-3", 2.0);
    assert_proche("1-2*3+4", -1.0);
}

#[test]
fn sci_associativite_gauche() {
    assert_proche("8-3-2", 3.0);
    assert_proche("64/4/2", 8.0);
    assert_proche("2^3^2", 64.0);
}

#[test]
fn sci_parentheses() {
    assert_proche("(2+3)*4", 20.0);
    assert_proche("8-(3-2)", 7.0);
    assert_proche("2^(3^2)", 512.0);
    assert_proche("{[(1+1)]*(2)}", 4.0);
}

/* ------------------------ Fonctions / constantes / variables ------------------------ */

#[test]
fn sci_fonctions() {
    assert_proche("sin(0)", 0.0);
    assert_proche("sqrt(16)", 4.0);
    assert_proche("sin(pi/2)", 1.0);
    assert_proche("cos(pi)", -1.0);
    assert_proche("abs(y)", 0.5);
    assert_proche("log(1000)", 3.0);
    assert_proche("ln(e^2)", 2.0);
    assert_proche("sqrt(x+1)", 4.0);
}

#[test]
fn sci_identites() {
    // sin² + cos² = 1
    for a in ["0", "1", "x", "y", "pi/3", "2.5"] {
        assert_proche(&format!("sin({a})^2 + cos({a})^2"), 1.0);
    }
    // ln et e^ se compensent
    assert_proche("ln(e^x)", 15.0);
}

#[test]
fn sci_constantes_pleine_precision() {
    assert_eq!(eval_ok("pi"), PI);
    assert_eq!(eval_ok("π"), PI);
    assert_eq!(eval_ok("e"), E);
}

#[test]
fn sci_variables() {
    assert_proche("x*2", 30.0);
    assert_proche("x*y", -7.5);
    assert_proche("x-x", 0.0);
}

/* ------------------------ Signe moins ------------------------ */

#[test]
fn sci_signe_moins() {
    assert_proche("3--4", 7.0);
    assert_proche("-2^2", 4.0);
    assert_proche("-x^2", 225.0);
    assert_proche("0-x^2", -225.0);
    assert_proche("-(x)", -15.0);
    assert_proche("2*-3", -6.0);
    assert_proche("-sqrt(4)", -2.0);
}

/* ------------------------ Politique souple ------------------------ */

#[test]
fn sci_repli_souple() {
    let c = calc();
    for expr in ["", "1+", "*", "(", ")", "sin", "1 2", "z", "1+#"] {
        let arbre = c.build(&c.convert(expr));
        assert_eq!(c.evaluate(arbre.as_ref()), 0.0, "expr={expr:?}");
    }
}

#[test]
fn sci_strict_ne_masque_rien() {
    let c = calc();
    for expr in ["", "1+", "*", "(", ")", "sin", "1 2", "z", "1+#"] {
        assert!(c.calculer(expr).is_err(), "expr={expr:?} aurait dû échouer");
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // chaîne associative à gauche : profondeur 80, sous la limite par défaut
    let expr = vec!["0.5"; 80].join(" + ");
    budget(t0, max);

    assert_eq!(eval_ok(&expr), 40.0);
    budget(t0, max);
}

#[test]
fn sci_stress_profondeur_bornee() {
    let c = calc();
    let profondeur = Limites::default().profondeur_max;

    // abs(abs(...abs(1)...)) : une imbrication de plus que la limite
    let n = profondeur;
    let expr = format!("{}1{}", "abs(".repeat(n), ")".repeat(n));

    assert_eq!(
        c.calculer(&expr),
        Err(ErreurCalc::ArbreTropProfond(profondeur))
    );
    let arbre = c.build(&c.convert(&expr));
    assert_eq!(c.evaluate(arbre.as_ref()), 0.0);

    // juste sous la limite : ok
    let n = profondeur - 1;
    let expr = format!("{}1{}", "abs(".repeat(n), ")".repeat(n));
    assert_eq!(c.calculer(&expr), Ok(1.0));
}

#[test]
fn sci_stress_longueur_bornee() {
    let c = calc();
    let max = Limites::default().longueur_max;
    let expr = "1".repeat(max + 1);

    assert_eq!(
        c.calculer(&expr),
        Err(ErreurCalc::ExpressionTropLongue {
            longueur: max + 1,
            max
        })
    );
    assert!(c.convert(&expr).is_empty());
}
