// src/noyau/validation.rs
//
// Pré-validation (avant shunting-yard) et vérification de sortie.
//
// Le convertisseur ne valide rien : un texte mal formé ressort en RPN
// tronquée ou bancale. Ici on refuse tôt :
// - suite de jetons vide
// - opérateur binaire là où on attend une valeur ("2*/3", "+1", "(*2)")
// - valeur là où on attend un opérateur ("2 3", "pie", "2(3)")
// - littéral numérique invalide ("." , "-.")
// - caractère inconnu

use super::erreur::ErreurCalc;
use super::eval::resoudre;
use super::jetons::Tok;
use super::symboles::{Registre, Variables};

/// Vrai si `s` a la forme d'un littéral : '-' optionnel en tête, chiffres,
/// au plus un '.'. "." et "-" seuls ne comptent pas.
pub fn contient_nombre(s: &str) -> bool {
    if s.is_empty() || s == "." || s == "-" {
        return false;
    }

    let corps = s.strip_prefix('-').unwrap_or(s);
    let mut point_vu = false;
    for c in corps.chars() {
        match c {
            '.' if !point_vu => point_vu = true,
            c if c.is_ascii_digit() => {}
            _ => return false,
        }
    }
    true
}

/// Vérifie l'alternance valeur / opérateur d'une suite de jetons.
pub fn valider_jetons(jetons: &[Tok<'_>]) -> Result<(), ErreurCalc> {
    if jetons.is_empty() {
        return Err(ErreurCalc::EntreeVide);
    }

    let mut attend_valeur = true;
    for tok in jetons {
        match *tok {
            Tok::Nombre(t) => {
                if !contient_nombre(t) || t.parse::<f64>().is_err() {
                    return Err(ErreurCalc::NombreInvalide(t.to_string()));
                }
                operande(tok, attend_valeur)?;
                attend_valeur = false;
            }
            Tok::Constante(_) | Tok::Variable(_) => {
                operande(tok, attend_valeur)?;
                attend_valeur = false;
            }
            Tok::Fonction(_) | Tok::LPar => {
                operande(tok, attend_valeur)?;
                attend_valeur = true;
            }
            Tok::RPar => attend_valeur = false,
            Tok::Operateur(nom) => {
                if attend_valeur {
                    return Err(ErreurCalc::OperateurInattendu(nom.to_string()));
                }
                attend_valeur = true;
            }
            Tok::Inconnu {
                caractere,
                position,
            } => {
                return Err(ErreurCalc::CaractereInattendu {
                    caractere,
                    position,
                })
            }
        }
    }
    Ok(())
}

/// Un jeton qui ouvre une valeur n'est admis que si on en attend une.
fn operande(tok: &Tok<'_>, attend_valeur: bool) -> Result<(), ErreurCalc> {
    if attend_valeur {
        Ok(())
    } else {
        Err(ErreurCalc::OperandeInattendu(tok.to_string()))
    }
}

/// Vérifie une sortie de `convert` avant de lui faire confiance :
/// non vide, et un résultat à un seul jeton doit se résoudre.
pub fn verifier_postfix<S: AsRef<str>>(
    postfix: &[S],
    registre: &Registre,
    variables: &Variables,
) -> Result<(), ErreurCalc> {
    match postfix {
        [] => Err(ErreurCalc::EntreeVide),
        [seul] => resoudre(seul.as_ref(), registre, variables).map(|_| ()),
        _ => Ok(()),
    }
}
