//! Noyau de calcul (f64)
//!
//! Organisation interne :
//! - symboles.rs   : registre figé (opérateurs, fonctions, constantes) + variables
//! - jetons.rs     : balayage texte -> jetons
//! - rpn.rs        : shunting-yard -> RPN
//! - arbre.rs      : RPN -> arbre d'expression
//! - eval.rs       : arbre -> f64
//! - validation.rs : pré-validation des jetons / vérification de sortie
//! - calculateur.rs: points d'entrée (souples + stricts)
//! - lot.rs        : équations séparées par ';'
//! - erreur.rs     : ErreurCalc

pub mod arbre;
pub mod calculateur;
pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod lot;
pub mod rpn;
pub mod symboles;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use arbre::Noeud;
pub use calculateur::{Calculateur, Limites};
pub use erreur::ErreurCalc;
pub use lot::{evaluer_lot, Ligne};
pub use symboles::{Associativite, Registre, Variables};
