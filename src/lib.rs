//! Calculatrice RPN — bibliothèque
//!
//! Le noyau seul (sans UI) : texte infixe -> RPN -> arbre -> f64.
//! Le binaire (src/main.rs) y ajoute l'interface eframe.

pub mod noyau;
