// src/noyau/symboles.rs
//
// Table des symboles (registre figé) + variables de l'appelant.
//
// - Registre : opérateurs binaires, fonctions unaires, constantes.
//   Construit une fois, ensuite lecture seule (partageable entre threads).
// - Variables : fournies par l'appelant, jamais modifiées par le noyau.
//
// Recherche "plus long préfixe" : fonctions/opérateurs, puis constantes,
// puis variables. Le plus long gagne ; à longueur égale, la première
// catégorie consultée gagne.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::{E, PI};
use std::sync::OnceLock;

use super::erreur::ErreurCalc;

/// Liaisons nom -> valeur, fournies à la construction du calculateur.
pub type Variables = BTreeMap<String, f64>;

/// Fonction injectée pour un moins unaire qui ne commence pas un nombre ("-x", "-(1+2)").
pub const NEGATION: &str = "neg";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

/// Règle d'évaluation : l'arité est portée par la variante.
#[derive(Clone, Copy, Debug)]
pub enum Regle {
    Unaire(fn(f64) -> f64),
    Binaire(fn(f64, f64) -> f64),
}

#[derive(Clone, Debug)]
pub struct Fonction {
    pub nom: String,
    pub precedence: u32,
    pub assoc: Associativite,
    pub regle: Regle,
}

impl Fonction {
    pub fn arite(&self) -> usize {
        match self.regle {
            Regle::Unaire(_) => 1,
            Regle::Binaire(_) => 2,
        }
    }

    /// Binaire = opérateur infixe ; unaire = fonction préfixe.
    pub fn est_operateur(&self) -> bool {
        self.arite() == 2
    }
}

/// Catégorie trouvée par `plus_long_prefixe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classe {
    Fonction,
    Constante,
    Variable,
}

/// Résultat d'une recherche de préfixe : `longueur` est en octets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Correspondance {
    pub classe: Classe,
    pub longueur: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Registre {
    fonctions: HashMap<String, Fonction>,
    constantes: HashMap<String, f64>,
}

static STANDARD: OnceLock<Registre> = OnceLock::new();

impl Registre {
    pub fn vide() -> Self {
        Self::default()
    }

    /// Registre par défaut, construit une seule fois pour tout le processus.
    pub fn standard() -> &'static Registre {
        STANDARD.get_or_init(Registre::par_defaut)
    }

    /// `+ -` (2), `* /` (3), `^` (4) : tous associatifs à gauche.
    /// `^` à gauche est voulu : 2^3^2 = (2^3)^2 = 64.
    pub fn par_defaut() -> Self {
        use Associativite::Gauche;

        Self::vide()
            .avec_operateur("+", 2, Gauche, |x, y| x + y)
            .avec_operateur("-", 2, Gauche, |x, y| x - y)
            .avec_operateur("*", 3, Gauche, |x, y| x * y)
            .avec_operateur("/", 3, Gauche, |x, y| x / y)
            .avec_operateur("^", 4, Gauche, f64::powf)
            .avec_fonction(NEGATION, |x| -x)
            .avec_fonction("sin", f64::sin)
            .avec_fonction("cos", f64::cos)
            .avec_fonction("abs", f64::abs)
            .avec_fonction("log", f64::log10)
            .avec_fonction("ln", f64::ln)
            .avec_fonction("sqrt", f64::sqrt)
            .avec_constante("pi", PI)
            .avec_constante("π", PI)
            .avec_constante("e", E)
    }

    /* ------------------------ Construction ------------------------ */

    pub fn avec_operateur(
        mut self,
        nom: &str,
        precedence: u32,
        assoc: Associativite,
        regle: fn(f64, f64) -> f64,
    ) -> Self {
        self.fonctions.insert(
            nom.to_string(),
            Fonction {
                nom: nom.to_string(),
                precedence,
                assoc,
                regle: Regle::Binaire(regle),
            },
        );
        self
    }

    pub fn avec_fonction(mut self, nom: &str, regle: fn(f64) -> f64) -> Self {
        self.fonctions.insert(
            nom.to_string(),
            Fonction {
                nom: nom.to_string(),
                precedence: 0,
                assoc: Associativite::Gauche,
                regle: Regle::Unaire(regle),
            },
        );
        self
    }

    pub fn avec_constante(mut self, nom: &str, valeur: f64) -> Self {
        self.constantes.insert(nom.to_string(), valeur);
        self
    }

    /* ------------------------ Requêtes ------------------------ */

    pub fn fonction(&self, nom: &str) -> Option<&Fonction> {
        self.fonctions.get(nom)
    }

    pub fn constante(&self, nom: &str) -> Option<f64> {
        self.constantes.get(nom).copied()
    }

    /// Précédence d'un opérateur ; 0 pour tout le reste.
    pub fn precedence(&self, nom: &str) -> u32 {
        self.fonction(nom)
            .filter(|f| f.est_operateur())
            .map_or(0, |f| f.precedence)
    }

    pub fn associativite(&self, nom: &str) -> Associativite {
        self.fonction(nom)
            .map_or(Associativite::Gauche, |f| f.assoc)
    }

    pub fn est_reserve(&self, nom: &str) -> bool {
        self.fonctions.contains_key(nom) || self.constantes.contains_key(nom)
    }

    /// Plus long nom (fonction, constante ou variable) qui préfixe `texte`.
    pub fn plus_long_prefixe(&self, texte: &str, variables: &Variables) -> Option<Correspondance> {
        let candidats = self
            .fonctions
            .keys()
            .map(|n| (Classe::Fonction, n.as_str()))
            .chain(self.constantes.keys().map(|n| (Classe::Constante, n.as_str())))
            .chain(variables.keys().map(|n| (Classe::Variable, n.as_str())));

        let mut meilleure: Option<Correspondance> = None;
        for (classe, nom) in candidats {
            if nom.is_empty() || !texte.starts_with(nom) {
                continue;
            }
            // strictement plus long : à égalité, la catégorie vue en premier reste
            if meilleure.map_or(true, |m| nom.len() > m.longueur) {
                meilleure = Some(Correspondance {
                    classe,
                    longueur: nom.len(),
                });
            }
        }
        meilleure
    }

    /// Refuse les variables qui masqueraient le registre ou casseraient le balayage.
    pub fn verifier_variables(&self, variables: &Variables) -> Result<(), ErreurCalc> {
        for nom in variables.keys() {
            let premier = nom.chars().next();
            let mal_forme = match premier {
                None => true,
                Some(c) => c.is_ascii_digit() || c == '.' || c == '-',
            } || nom
                .chars()
                .any(|c| c.is_whitespace() || ",;(){}[]".contains(c));

            if mal_forme {
                return Err(ErreurCalc::NomInvalide(nom.clone()));
            }
            if self.est_reserve(nom) {
                return Err(ErreurCalc::NomReserve(nom.clone()));
            }
        }
        Ok(())
    }
}
