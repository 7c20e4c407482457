//! Noyau — évaluation récursive de l'arbre.
//!
//! Feuille : constante du registre, puis variable, puis littéral numérique.
//! Opération : enfants d'abord (gauche puis droite), puis la règle du registre.
//!
//! Pur : ni l'arbre, ni le registre, ni les variables ne sont modifiés.
//! Les résultats IEEE (1/0 = inf, sqrt(-1) = NaN) sont des valeurs, pas des erreurs.

use super::arbre::Noeud;
use super::erreur::ErreurCalc;
use super::symboles::{Regle, Registre, Variables};
use super::validation::contient_nombre;

/// Évalue un arbre ; `profondeur_max` borne la récursion.
pub fn evaluer(
    noeud: &Noeud,
    registre: &Registre,
    variables: &Variables,
    profondeur_max: usize,
) -> Result<f64, ErreurCalc> {
    let ctx = Contexte {
        registre,
        variables,
        profondeur_max,
    };
    ctx.evaluer(noeud, 1)
}

/// Résout une feuille : constante, puis variable, puis littéral.
pub fn resoudre(nom: &str, registre: &Registre, variables: &Variables) -> Result<f64, ErreurCalc> {
    if let Some(v) = registre.constante(nom) {
        return Ok(v);
    }
    if let Some(v) = variables.get(nom) {
        return Ok(*v);
    }
    if contient_nombre(nom) {
        return nom
            .parse::<f64>()
            .map_err(|_| ErreurCalc::NombreInvalide(nom.to_string()));
    }
    Err(ErreurCalc::SymboleInconnu(nom.to_string()))
}

struct Contexte<'c> {
    registre: &'c Registre,
    variables: &'c Variables,
    profondeur_max: usize,
}

impl Contexte<'_> {
    fn evaluer(&self, noeud: &Noeud, profondeur: usize) -> Result<f64, ErreurCalc> {
        if profondeur > self.profondeur_max {
            return Err(ErreurCalc::ArbreTropProfond(self.profondeur_max));
        }

        match noeud {
            Noeud::Feuille(nom) => resoudre(nom, self.registre, self.variables),

            Noeud::Unaire { nom, arg } => {
                let x = self.evaluer(arg, profondeur + 1)?;
                match self.regle(nom) {
                    Some(Regle::Unaire(f)) => Ok(f(x)),
                    _ => Err(ErreurCalc::SymboleInconnu(nom.clone())),
                }
            }

            Noeud::Binaire {
                nom,
                gauche,
                droite,
            } => {
                let x = self.evaluer(gauche, profondeur + 1)?;
                let y = self.evaluer(droite, profondeur + 1)?;
                match self.regle(nom) {
                    Some(Regle::Binaire(f)) => Ok(f(x, y)),
                    _ => Err(ErreurCalc::SymboleInconnu(nom.clone())),
                }
            }
        }
    }

    fn regle(&self, nom: &str) -> Option<Regle> {
        self.registre.fonction(nom).map(|f| f.regle)
    }
}
