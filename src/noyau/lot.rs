// src/noyau/lot.rs
//
// Évaluation par lot : "x*2; sin(pi/2); (1+2" -> une ligne par équation.
// Séparateur ';', segments vides ignorés.

use super::arbre::Noeud;
use super::calculateur::Calculateur;
use super::erreur::ErreurCalc;
use super::validation::verifier_postfix;

pub const SEPARATEUR: char = ';';

#[derive(Clone, Debug, PartialEq)]
pub struct Ligne {
    pub equation: String,
    /// RPN souple (ce que le convertisseur a produit, même tronqué).
    pub postfix: Vec<String>,
    /// Arbre rendu en infixe parenthésé, si la RPN en donne un.
    pub arbre: Option<String>,
    /// Résultat du pipeline strict.
    pub resultat: Result<f64, ErreurCalc>,
}

pub fn evaluer_lot(calc: &Calculateur<'_>, entree: &str) -> Vec<Ligne> {
    entree
        .split(SEPARATEUR)
        .map(str::trim)
        .filter(|eq| !eq.is_empty())
        .map(|eq| evaluer_ligne(calc, eq))
        .collect()
}

pub fn evaluer_ligne(calc: &Calculateur<'_>, equation: &str) -> Ligne {
    let postfix = calc.convert(equation);
    // pas d'arbre pour une RPN vide ou un jeton seul qui ne se résout pas
    let arbre = match verifier_postfix(&postfix, calc.registre(), calc.variables()) {
        Ok(()) => calc.build(&postfix).as_ref().map(Noeud::to_string),
        Err(e) => {
            log::debug!("{equation} : pas d'arbre ({e})");
            None
        }
    };
    let resultat = calc.calculer(equation);

    match &resultat {
        Ok(v) => log::info!("{equation} = {v}"),
        Err(e) => log::info!("{equation} : {e}"),
    }

    Ligne {
        equation: equation.to_string(),
        postfix,
        arbre,
        resultat,
    }
}
