//! src/app/etat.rs
//!
//! État UI (sans vue, sans évaluation).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, variables, lignes de
//! résultat, erreur) et offrir des opérations simples (C/CLR/AC) sans logique
//! d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (ni jetons, ni RPN).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur le nombre de variables éditables.

use calculatrice_rpn::noyau::{Ligne, Variables};

/// Variables proposées au démarrage.
const VARIABLES_DEFAUT: [(&str, &str); 1] = [("x", "15")];

/// Garde-fou : nombre max de lignes dans l’éditeur de variables.
pub const VARIABLES_MAX: usize = 16;

/// Une ligne de l’éditeur de variables, en texte brut (saisie libre).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LigneVariable {
    pub nom: String,
    pub valeur: String,
}

/// Une équation évaluée, prête à afficher.
#[derive(Clone, Debug, PartialEq)]
pub struct LigneResultat {
    pub equation: String,
    pub postfix: String,
    pub arbre: String,
    pub valeur: Result<f64, String>,
}

impl From<Ligne> for LigneResultat {
    fn from(l: Ligne) -> Self {
        Self {
            postfix: l.postfix.join(" "),
            arbre: l.arbre.unwrap_or_else(|| "—".to_string()),
            valeur: l.resultat.map_err(|e| e.to_string()),
            equation: l.equation,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    pub variables: Vec<LigneVariable>,

    // --- sorties ---
    pub resultats: Vec<LigneResultat>,
    pub erreur: String, // erreur globale (variables invalides, entrée vide)

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            variables: variables_defaut(),
            resultats: Vec::new(),
            erreur: String::new(),
            focus_entree: true,
        }
    }
}

fn variables_defaut() -> Vec<LigneVariable> {
    VARIABLES_DEFAUT
        .iter()
        .map(|(nom, valeur)| LigneVariable {
            nom: nom.to_string(),
            valeur: valeur.to_string(),
        })
        .collect()
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + variables par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.variables = variables_defaut();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultats.clear();
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// On CONSERVE les dernières lignes pour ne pas “effacer l’écran” sur une faute.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.focus_entree = true;
    }

    pub fn set_resultats(&mut self, lignes: Vec<Ligne>) {
        self.erreur.clear();
        self.resultats = lignes.into_iter().map(LigneResultat::from).collect();
        self.focus_entree = true;
    }

    /* ------------------------ Variables ------------------------ */

    /// Ajoute une ligne vide ; refusé au-delà de VARIABLES_MAX.
    pub fn ajouter_variable(&mut self) -> bool {
        if self.variables.len() >= VARIABLES_MAX {
            return false;
        }
        self.variables.push(LigneVariable {
            nom: String::new(),
            valeur: String::new(),
        });
        true
    }

    pub fn retirer_variable(&mut self, index: usize) {
        if index < self.variables.len() {
            self.variables.remove(index);
        }
    }

    /// Lie les lignes saisies en table de variables.
    ///
    /// Lignes sans nom : ignorées. Valeur illisible ou nom en double : erreur.
    /// La validité des noms (réservés, caractères) est vérifiée par le noyau.
    pub fn variables_liees(&self) -> Result<Variables, String> {
        let mut vars = Variables::new();
        for l in &self.variables {
            let nom = l.nom.trim();
            if nom.is_empty() {
                continue;
            }
            let valeur: f64 = l
                .valeur
                .trim()
                .parse()
                .map_err(|_| format!("variable '{nom}' : valeur illisible '{}'", l.valeur.trim()))?;
            if vars.insert(nom.to_string(), valeur).is_some() {
                return Err(format!("variable '{nom}' définie deux fois"));
            }
        }
        Ok(vars)
    }
}
