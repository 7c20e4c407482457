//! Erreurs typées du noyau.
//!
//! Une seule énumération pour tout le pipeline (jetons -> RPN -> arbre -> valeur).
//! Les points d'entrée "souples" (`convert`, `build`, `evaluate`) absorbent ces
//! erreurs ; les variantes `try_*` et `calculer` les remontent telles quelles.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalc {
    /// Aucune expression à évaluer (texte vide, ou RPN vide).
    #[error("entrée vide")]
    EntreeVide,

    /// Garde-fou sur la taille de l'entrée.
    #[error("expression trop longue ({longueur} caractères, max {max})")]
    ExpressionTropLongue { longueur: usize, max: usize },

    /// Caractère qui n'est ni nombre, ni symbole connu, ni parenthèse.
    /// `position` est un indice de caractère (pas d'octet).
    #[error("caractère inattendu '{caractere}' (position {position})")]
    CaractereInattendu { caractere: char, position: usize },

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseFermanteOrpheline,

    #[error("parenthèses non fermées")]
    ParenthesesNonFermees,

    /// Opérateur binaire là où on attend une valeur (ex: "2 * / 3", "+1").
    #[error("opérateur '{0}' sans opérande à gauche")]
    OperateurInattendu(String),

    /// Valeur là où on attend un opérateur (ex: "2 3", "pie", "2(3)").
    #[error("opérande '{0}' inattendu (opérateur manquant)")]
    OperandeInattendu(String),

    #[error("symbole inconnu: {0}")]
    SymboleInconnu(String),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    /// Pile vide au moment de dépiler les arguments d'un opérateur.
    #[error("opérandes insuffisants pour '{0}'")]
    OperandesInsuffisants(String),

    /// Fin de RPN avec plus d'un noeud sur la pile.
    #[error("expression invalide: {0} valeurs sans opérateur")]
    OperandesEnTrop(usize),

    #[error("arbre trop profond (max {0})")]
    ArbreTropProfond(usize),

    /// Variable qui masquerait une fonction / constante du registre (ex: "e").
    #[error("nom de variable réservé: {0}")]
    NomReserve(String),

    #[error("nom de variable invalide: {0:?}")]
    NomInvalide(String),
}
