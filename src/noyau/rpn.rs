// src/noyau/rpn.rs
//
// Shunting-yard : jetons (infixe) -> RPN (postfix), en texte.
//
// Règles:
// - opérande (nombre, constante, variable) : sortie directe
// - fonction, '(' : empilés
// - opérateur : on dépile tant que le sommet n'est pas '(' et que
//     - le sommet est une fonction, ou
//     - sa précédence est strictement plus grande, ou
//     - précédence égale et sommet associatif à gauche
//   puis on empile
// - ')' : on dépile jusqu'à '(' (jetée, jamais émise)
// - fin : on vide la pile (sommet d'abord)
//
// Deux politiques d'erreur:
// - Souple : comportement historique (caractère inconnu => on rend la sortie
//   accumulée telle quelle, parenthèses orphelines ignorées)
// - Stricte : chaque défaut devient une ErreurCalc

use super::erreur::ErreurCalc;
use super::jetons::Tok;
use super::symboles::{Associativite, Registre};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Politique {
    Souple,
    Stricte,
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Fonction("sin"), LPar, Constante("pi"), Operateur("/"), Nombre("2"), RPar]
///   rpn:    ["pi", "2", "/", "sin"]
///
/// En politique `Souple`, ne renvoie jamais `Err`.
pub fn to_rpn(
    jetons: &[Tok<'_>],
    registre: &Registre,
    politique: Politique,
) -> Result<Vec<String>, ErreurCalc> {
    let mut out: Vec<String> = Vec::new();
    let mut ops: Vec<Tok<'_>> = Vec::new();

    for tok in jetons.iter().copied() {
        match tok {
            Tok::Nombre(t) | Tok::Constante(t) | Tok::Variable(t) => out.push(t.to_string()),

            Tok::Fonction(_) | Tok::LPar => ops.push(tok),

            Tok::Operateur(nom) => {
                while let Some(&top) = ops.last() {
                    if !doit_depiler(top, nom, registre) {
                        break;
                    }
                    out.push(top.to_string());
                    ops.pop();
                }
                ops.push(tok);
            }

            Tok::RPar => loop {
                match ops.pop() {
                    Some(Tok::LPar) => break,
                    Some(top) => out.push(top.to_string()),
                    None => {
                        if politique == Politique::Stricte {
                            return Err(ErreurCalc::ParentheseFermanteOrpheline);
                        }
                        log::warn!("parenthèse fermante sans ouvrante : ignorée");
                        break;
                    }
                }
            },

            Tok::Inconnu {
                caractere,
                position,
            } => {
                if politique == Politique::Stricte {
                    return Err(ErreurCalc::CaractereInattendu {
                        caractere,
                        position,
                    });
                }
                // abandon : la pile n'est PAS vidée
                log::warn!(
                    "caractère inattendu '{caractere}' (position {position}) : sortie tronquée"
                );
                return Ok(out);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            if politique == Politique::Stricte {
                return Err(ErreurCalc::ParenthesesNonFermees);
            }
            log::warn!("parenthèse ouvrante non fermée : ignorée");
            continue;
        }
        out.push(op.to_string());
    }

    Ok(out)
}

/// Le sommet `top` doit-il sortir avant d'empiler l'opérateur `nom` ?
fn doit_depiler(top: Tok<'_>, nom: &str, registre: &Registre) -> bool {
    match top {
        Tok::Fonction(_) => true,
        Tok::Operateur(haut) => {
            let p_top = registre.precedence(haut);
            let p_tok = registre.precedence(nom);
            p_top > p_tok
                || (p_top == p_tok && registre.associativite(haut) == Associativite::Gauche)
        }
        // '(' bloque ; le reste n'est jamais empilé
        _ => false,
    }
}

/// Format utilitaire : RPN en texte.
pub fn format_postfix<S: AsRef<str>>(postfix: &[S]) -> String {
    postfix
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
