// src/noyau/arbre.rs
//
// RPN -> arbre binaire d'expression.
//
// - opérateur binaire : dépile droite puis gauche
// - fonction unaire   : dépile son unique argument
// - tout le reste     : feuille (nombre, constante ou variable,
//                       résolue seulement à l'évaluation)

use std::fmt;

use super::erreur::ErreurCalc;
use super::symboles::Registre;

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Feuille(String),
    Unaire {
        nom: String,
        arg: Box<Noeud>,
    },
    Binaire {
        nom: String,
        gauche: Box<Noeud>,
        droite: Box<Noeud>,
    },
}

impl Noeud {
    pub fn nom(&self) -> &str {
        match self {
            Noeud::Feuille(nom) | Noeud::Unaire { nom, .. } | Noeud::Binaire { nom, .. } => nom,
        }
    }

    /// Nombre d'enfants : 0, 1 ou 2.
    pub fn arite(&self) -> usize {
        match self {
            Noeud::Feuille(_) => 0,
            Noeud::Unaire { .. } => 1,
            Noeud::Binaire { .. } => 2,
        }
    }

    /// Profondeur (une feuille seule = 1). Itératif : pas de récursion sur la pile.
    pub fn profondeur(&self) -> usize {
        let mut pile: Vec<(&Noeud, usize)> = vec![(self, 1)];
        let mut max = 0;

        while let Some((n, d)) = pile.pop() {
            max = max.max(d);
            match n {
                Noeud::Feuille(_) => {}
                Noeud::Unaire { arg, .. } => pile.push((arg, d + 1)),
                Noeud::Binaire { gauche, droite, .. } => {
                    pile.push((gauche, d + 1));
                    pile.push((droite, d + 1));
                }
            }
        }
        max
    }
}

/// Libération itérative : un arbre de plusieurs milliers de niveaux
/// ("----...-1") ne doit pas épuiser la pile.
impl Drop for Noeud {
    fn drop(&mut self) {
        let mut pile: Vec<Noeud> = Vec::new();
        detacher_enfants(self, &mut pile);
        while let Some(mut n) = pile.pop() {
            detacher_enfants(&mut n, &mut pile);
        }
    }
}

/// Remplace les enfants non-feuilles par une feuille vide et les empile.
fn detacher_enfants(n: &mut Noeud, pile: &mut Vec<Noeud>) {
    let mut prendre = |enfant: &mut Box<Noeud>| {
        if !matches!(**enfant, Noeud::Feuille(_)) {
            pile.push(std::mem::replace(&mut **enfant, Noeud::Feuille(String::new())));
        }
    };
    match n {
        Noeud::Feuille(_) => {}
        Noeud::Unaire { arg, .. } => prendre(arg),
        Noeud::Binaire { gauche, droite, .. } => {
            prendre(gauche);
            prendre(droite);
        }
    }
}

/// Rendu infixe complètement parenthésé (affichage des résultats).
impl fmt::Display for Noeud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Noeud::Feuille(nom) => f.write_str(nom),
            Noeud::Unaire { nom, arg } => write!(f, "{nom}({arg})"),
            Noeud::Binaire {
                nom,
                gauche,
                droite,
            } => write!(f, "({gauche} {nom} {droite})"),
        }
    }
}

/// Construit l'arbre à partir d'une RPN.
///
/// - RPN vide => `Ok(None)` (pas une erreur)
/// - pile vide au moment de dépiler => `OperandesInsuffisants`
/// - plus d'un noeud à la fin => `OperandesEnTrop`
pub fn from_rpn<S: AsRef<str>>(
    postfix: &[S],
    registre: &Registre,
) -> Result<Option<Noeud>, ErreurCalc> {
    let mut st: Vec<Noeud> = Vec::with_capacity(postfix.len());

    for tok in postfix {
        let tok = tok.as_ref();
        let manque = || ErreurCalc::OperandesInsuffisants(tok.to_string());

        let noeud = match registre.fonction(tok) {
            Some(f) if f.arite() == 2 => {
                let droite = st.pop().ok_or_else(manque)?;
                let gauche = st.pop().ok_or_else(manque)?;
                Noeud::Binaire {
                    nom: tok.to_string(),
                    gauche: Box::new(gauche),
                    droite: Box::new(droite),
                }
            }
            Some(_) => {
                let arg = st.pop().ok_or_else(manque)?;
                Noeud::Unaire {
                    nom: tok.to_string(),
                    arg: Box::new(arg),
                }
            }
            None => Noeud::Feuille(tok.to_string()),
        };
        st.push(noeud);
    }

    match st.len() {
        0 | 1 => Ok(st.pop()),
        n => Err(ErreurCalc::OperandesEnTrop(n)),
    }
}
