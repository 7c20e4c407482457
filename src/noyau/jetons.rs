// src/noyau/jetons.rs
//
// Balayage gauche -> droite du texte brut en jetons.
//
// Règles:
// - espaces et virgules : ignorés
// - nombre : chiffres, au plus un '.', au plus un '-' en tête
// - '-' en tête de nombre seulement quand on attend une valeur
//   (début, après opérateur, fonction ou '(') ; sinon c'est la soustraction
// - '-' seul en position de valeur ("-x", "-(...)") => fonction `neg`
// - sinon plus long préfixe : fonctions/opérateurs, constantes, variables
// - ( { [ et ) } ] : parenthèses
// - tout autre caractère : jeton Inconnu, et le balayage s'arrête là

use std::fmt;

use super::symboles::{Classe, Registre, Variables, NEGATION};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tok<'a> {
    Nombre(&'a str),
    Constante(&'a str),
    Variable(&'a str),
    /// Fonction unaire (préfixe), dont `neg`.
    Fonction(&'a str),
    /// Opérateur binaire infixe.
    Operateur(&'a str),
    LPar,
    RPar,
    /// `position` : indice de caractère dans l'expression.
    Inconnu { caractere: char, position: usize },
}

impl Tok<'_> {
    /// Nombre, constante ou variable.
    pub fn est_operande(&self) -> bool {
        matches!(self, Tok::Nombre(_) | Tok::Constante(_) | Tok::Variable(_))
    }
}

impl fmt::Display for Tok<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Nombre(s)
            | Tok::Constante(s)
            | Tok::Variable(s)
            | Tok::Fonction(s)
            | Tok::Operateur(s) => f.write_str(s),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Inconnu { caractere, .. } => write!(f, "?{caractere}"),
        }
    }
}

/// Tokenize une expression.
///
/// Ne renvoie jamais d'erreur : un caractère non reconnu devient le dernier
/// jeton (`Tok::Inconnu`), c'est à l'étape suivante de décider quoi en faire.
pub fn tokenize<'a>(expr: &'a str, registre: &Registre, variables: &Variables) -> Vec<Tok<'a>> {
    let mut out = Vec::new();
    let mut i: usize = 0; // indice d'octet
    let mut attend_valeur = true;

    while let Some(c) = expr[i..].chars().next() {
        if c.is_whitespace() || c == ',' {
            i += c.len_utf8();
            continue;
        }

        // Nombre (ou '-' de signe)
        if c.is_ascii_digit() || c == '.' || (c == '-' && attend_valeur) {
            let fin = fin_nombre(expr, i);
            let texte = &expr[i..fin];
            i = fin;

            if texte == "-" {
                // '-' qui ne prolonge aucun nombre : négation si le registre la connaît,
                // sinon simple soustraction (et la pile d'arbre le signalera)
                if registre.fonction(NEGATION).is_some() {
                    out.push(Tok::Fonction(NEGATION));
                } else {
                    out.push(Tok::Operateur("-"));
                }
            } else {
                out.push(Tok::Nombre(texte));
                attend_valeur = false;
            }
            continue;
        }

        // Symboles nommés
        let reste = &expr[i..];
        if let Some(m) = registre.plus_long_prefixe(reste, variables) {
            let nom = &reste[..m.longueur];
            let tok = match m.classe {
                Classe::Fonction => match registre.fonction(nom) {
                    Some(f) if f.est_operateur() => Tok::Operateur(nom),
                    _ => Tok::Fonction(nom),
                },
                Classe::Constante => Tok::Constante(nom),
                Classe::Variable => Tok::Variable(nom),
            };
            attend_valeur = !tok.est_operande();
            out.push(tok);
            i += m.longueur;
            continue;
        }

        // Parenthèses (normalisées)
        match c {
            '(' | '{' | '[' => {
                out.push(Tok::LPar);
                attend_valeur = true;
            }
            ')' | '}' | ']' => {
                out.push(Tok::RPar);
                attend_valeur = false;
            }
            _ => {
                out.push(Tok::Inconnu {
                    caractere: c,
                    position: expr[..i].chars().count(),
                });
                break;
            }
        }
        i += c.len_utf8();
    }

    log::debug!("jetons {:?} -> {}", expr, format_tokens(&out));
    out
}

/// Fin (exclue, en octets) du nombre qui commence à `debut`.
fn fin_nombre(expr: &str, debut: usize) -> usize {
    let mut point_vu = false;
    let mut fin = debut;

    for (k, c) in expr[debut..].char_indices() {
        let accepte = match c {
            '-' => k == 0,
            '.' if !point_vu => {
                point_vu = true;
                true
            }
            c => c.is_ascii_digit(),
        };
        if !accepte {
            break;
        }
        fin = debut + k + c.len_utf8();
    }
    fin
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok<'_>]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
