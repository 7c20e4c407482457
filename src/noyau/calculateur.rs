//! Calculateur : les trois points d'entrée du noyau.
//!
//! - `convert`  : texte -> RPN (liste de jetons texte)
//! - `build`    : RPN -> arbre (ou absent)
//! - `evaluate` : arbre -> f64
//!
//! Chaque point d'entrée existe en deux versions :
//! - souple (`convert`, `build`, `evaluate`) : n'échoue jamais, absorbe les
//!   défauts (sortie tronquée, arbre absent, 0.0) et les journalise ;
//! - stricte (`try_convert`, `try_build`, `try_evaluate`, `calculer`) :
//!   remonte une `ErreurCalc`, ce qui distingue "zéro calculé" de "échec".
//!
//! Le registre est partagé en lecture seule ; les variables appartiennent
//! au calculateur et ne sont jamais modifiées.

use super::arbre::{from_rpn, Noeud};
use super::erreur::ErreurCalc;
use super::eval::evaluer;
use super::jetons::{tokenize, Tok};
use super::rpn::{format_postfix, to_rpn, Politique};
use super::symboles::{Registre, Variables};
use super::validation::valider_jetons;

/// Longueur max d'une expression (en caractères).
const LONGUEUR_MAX: usize = 4096;

/// Profondeur max de l'arbre (construction et évaluation).
const PROFONDEUR_MAX: usize = 256;

/// Garde-fous contre les entrées non maîtrisées.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limites {
    pub longueur_max: usize,
    pub profondeur_max: usize,
}

impl Default for Limites {
    fn default() -> Self {
        Self {
            longueur_max: LONGUEUR_MAX,
            profondeur_max: PROFONDEUR_MAX,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Calculateur<'r> {
    registre: &'r Registre,
    variables: Variables,
    limites: Limites,
}

impl Calculateur<'static> {
    /// Calculateur sur le registre standard.
    pub fn new(variables: Variables) -> Result<Self, ErreurCalc> {
        Calculateur::avec_registre(Registre::standard(), variables)
    }
}

impl<'r> Calculateur<'r> {
    /// Refuse une variable qui masquerait un nom du registre (`NomReserve`).
    pub fn avec_registre(registre: &'r Registre, variables: Variables) -> Result<Self, ErreurCalc> {
        registre.verifier_variables(&variables)?;
        Ok(Self {
            registre,
            variables,
            limites: Limites::default(),
        })
    }

    pub fn avec_limites(mut self, limites: Limites) -> Self {
        self.limites = limites;
        self
    }

    pub fn registre(&self) -> &'r Registre {
        self.registre
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn limites(&self) -> Limites {
        self.limites
    }

    pub fn jetons<'a>(&self, expr: &'a str) -> Vec<Tok<'a>> {
        tokenize(expr, self.registre, &self.variables)
    }

    /* ------------------------ Points d'entrée souples ------------------------ */

    /// Texte -> RPN. Caractère inconnu : on rend ce qui a été produit jusque-là.
    pub fn convert(&self, expr: &str) -> Vec<String> {
        if let Err(e) = self.verifier_longueur(expr) {
            log::warn!("convert: {e}");
            return Vec::new();
        }
        let jetons = self.jetons(expr);
        to_rpn(&jetons, self.registre, Politique::Souple).unwrap_or_else(|e| {
            log::warn!("convert: {e}");
            Vec::new()
        })
    }

    /// RPN -> arbre. RPN vide ou mal formée : absent.
    pub fn build<S: AsRef<str>>(&self, postfix: &[S]) -> Option<Noeud> {
        self.try_build(postfix).unwrap_or_else(|e| {
            log::warn!("build: {e}");
            None
        })
    }

    /// Arbre -> valeur. Arbre absent ou défaut de résolution : 0.0.
    pub fn evaluate(&self, arbre: Option<&Noeud>) -> f64 {
        let Some(noeud) = arbre else {
            return 0.0;
        };
        self.try_evaluate(noeud).unwrap_or_else(|e| {
            log::warn!("evaluate: {e} (repli sur 0)");
            0.0
        })
    }

    /* ------------------------ Points d'entrée stricts ------------------------ */

    pub fn try_convert(&self, expr: &str) -> Result<Vec<String>, ErreurCalc> {
        self.verifier_longueur(expr)?;
        let jetons = self.jetons(expr);
        let postfix = to_rpn(&jetons, self.registre, Politique::Stricte)?;
        log::debug!("rpn {:?} -> {}", expr, format_postfix(&postfix));
        Ok(postfix)
    }

    /// Arbre plus profond que `profondeur_max` : refusé dès la construction,
    /// avant tout parcours récursif (rendu, évaluation).
    pub fn try_build<S: AsRef<str>>(&self, postfix: &[S]) -> Result<Option<Noeud>, ErreurCalc> {
        let arbre = from_rpn(postfix, self.registre)?;
        let max = self.limites.profondeur_max;
        match arbre {
            Some(n) if n.profondeur() > max => Err(ErreurCalc::ArbreTropProfond(max)),
            arbre => Ok(arbre),
        }
    }

    pub fn try_evaluate(&self, noeud: &Noeud) -> Result<f64, ErreurCalc> {
        evaluer(
            noeud,
            self.registre,
            &self.variables,
            self.limites.profondeur_max,
        )
    }

    /// Pipeline strict complet : jetons -> validation -> RPN -> arbre -> valeur.
    pub fn calculer(&self, expr: &str) -> Result<f64, ErreurCalc> {
        self.verifier_longueur(expr)?;

        let jetons = self.jetons(expr);
        valider_jetons(&jetons)?;

        let postfix = to_rpn(&jetons, self.registre, Politique::Stricte)?;
        let arbre = self.try_build(&postfix)?.ok_or(ErreurCalc::EntreeVide)?;
        let valeur = self.try_evaluate(&arbre)?;

        log::debug!("{:?} = {valeur}", expr);
        Ok(valeur)
    }

    fn verifier_longueur(&self, expr: &str) -> Result<(), ErreurCalc> {
        let longueur = expr.chars().count();
        let max = self.limites.longueur_max;
        if longueur > max {
            return Err(ErreurCalc::ExpressionTropLongue { longueur, max });
        }
        Ok(())
    }
}
