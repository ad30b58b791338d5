// src/noyau/expr.rs
//
// Arbre d’expression (exact) + ses deux lectures :
// - eval()  : valeur exacte (Fraction), récursive, synchrone
// - latex() : texte LaTeX + priorité (le parent décide des parenthèses)
//
// La soustraction n’existe pas comme nœud : a - b = Add(a, Neg { b, seule: false }).
// `seule` distingue le “-x” tapé par l’utilisateur du “-” fabriqué pour la soustraction
// (sinon le rendu donnerait “a + -b”).
//
// Les évaluations ne modifient jamais l’arbre : deux lectures successives donnent
// le même résultat.

use std::fmt;

use num_traits::ToPrimitive;

use super::erreur::Erreur;
use super::fraction::Fraction;
use super::predefinis::registre;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Const(Fraction),
    /// Constante prédéfinie (pi, e, phi)
    Var(String),
    /// Fonction prédéfinie appliquée à un argument
    Appel { nom: String, argument: Box<Expr> },

    Add(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Neg { x: Box<Expr>, seule: bool },
    Fact(Box<Expr>),
}

/// Priorités de rendu, de la plus lâche à la plus serrée.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priorite {
    Terme,
    Facteur,
    Puissance,
    Unaire,
    Atome,
}

/* ------------------------ Constructeurs ------------------------ */

impl Expr {
    pub fn add(a: Expr, b: Expr) -> Expr {
        Expr::Add(Box::new(a), Box::new(b))
    }

    pub fn sub(a: Expr, b: Expr) -> Expr {
        Expr::Add(
            Box::new(a),
            Box::new(Expr::Neg {
                x: Box::new(b),
                seule: false,
            }),
        )
    }

    pub fn mul(a: Expr, b: Expr) -> Expr {
        Expr::Mul(Box::new(a), Box::new(b))
    }

    pub fn div(a: Expr, b: Expr) -> Expr {
        Expr::Div(Box::new(a), Box::new(b))
    }

    pub fn pow(a: Expr, b: Expr) -> Expr {
        Expr::Pow(Box::new(a), Box::new(b))
    }

    /// “-x” tapé par l’utilisateur.
    pub fn neg(x: Expr) -> Expr {
        Expr::Neg {
            x: Box::new(x),
            seule: true,
        }
    }

    pub fn fact(x: Expr) -> Expr {
        Expr::Fact(Box::new(x))
    }

    pub fn appel(nom: impl Into<String>, argument: Expr) -> Expr {
        Expr::Appel {
            nom: nom.into(),
            argument: Box::new(argument),
        }
    }
}

/* ------------------------ Évaluation exacte ------------------------ */

impl Expr {
    pub fn eval(&self) -> Result<Fraction, Erreur> {
        use Expr::*;

        match self {
            Const(f) => Ok(f.clone()),

            Var(nom) => registre()
                .constante(nom)
                .map(|c| c.valeur.clone())
                .ok_or_else(|| Erreur::IdentifiantInconnu(nom.clone())),

            Appel { nom, argument } => {
                let fonction = registre()
                    .fonction(nom)
                    .ok_or_else(|| Erreur::IdentifiantInconnu(nom.clone()))?;
                let x = argument.eval()?;
                fonction.appliquer(nom, &x)
            }

            Add(a, b) => Ok(&a.eval()? + &b.eval()?),
            Mul(a, b) => Ok(&a.eval()? * &b.eval()?),
            Div(a, b) => a.eval()?.checked_div(&b.eval()?),
            Pow(a, b) => a.eval()?.pow(&b.eval()?),

            Neg { x, .. } => Ok(-&x.eval()?),
            Fact(x) => factorielle(&x.eval()?),
        }
    }
}

/// n! pour n entier >= 0 ; opérande et résultat tiennent sur i64 (20! au plus).
fn factorielle(f: &Fraction) -> Result<Fraction, Erreur> {
    if !f.is_integer() || f.is_negative() {
        return Err(Erreur::HorsDomaine {
            valeur: f.to_string(),
            espace: "N".into(),
        });
    }

    let n = f
        .numer()
        .to_i64()
        .ok_or_else(|| Erreur::TropGrand(format!("{f}!")))?;

    let mut acc: i64 = 1;
    for k in 2..=n {
        acc = acc
            .checked_mul(k)
            .ok_or_else(|| Erreur::TropGrand(format!("{f}!")))?;
    }
    Ok(Fraction::from(acc))
}

/* ------------------------ Rendu LaTeX ------------------------ */

/// Entoure de \left( \right) si la priorité du fils est trop faible
/// ET que son texte est composé (contient un espace).
fn parenthese(s: String, p: Priorite, requise: Priorite) -> String {
    if p < requise && s.contains(' ') {
        entoure(&s)
    } else {
        s
    }
}

fn entoure(s: &str) -> String {
    format!("\\left({s}\\right)")
}

impl Expr {
    pub fn latex(&self) -> Result<(String, Priorite), Erreur> {
        use Expr::*;

        match self {
            Const(f) => {
                let s = if f.is_integer() {
                    f.to_string()
                } else {
                    format!("\\frac{{{}}}{{{}}}", f.numer(), f.denom())
                };
                Ok((s, Priorite::Atome))
            }

            Var(nom) => {
                let c = registre()
                    .constante(nom)
                    .ok_or_else(|| Erreur::IdentifiantInconnu(nom.clone()))?;
                Ok((c.latex(nom), Priorite::Atome))
            }

            Appel { nom, argument } => {
                let fonction = registre()
                    .fonction(nom)
                    .ok_or_else(|| Erreur::IdentifiantInconnu(nom.clone()))?;
                let (arg, _) = argument.latex()?;
                Ok((fonction.latex(&arg), Priorite::Atome))
            }

            Add(a, b) => {
                let (g, pg) = a.latex()?;
                let (d, pd) = b.latex()?;
                let op = match b.as_ref() {
                    Neg { seule: false, .. } => "-",
                    _ => "+",
                };
                Ok((
                    format!(
                        "{} {op} {}",
                        parenthese(g, pg, Priorite::Terme),
                        parenthese(d, pd, Priorite::Terme)
                    ),
                    Priorite::Terme,
                ))
            }

            Mul(a, b) => {
                let (g, pg) = a.latex()?;
                let (d, pd) = b.latex()?;
                Ok((
                    format!(
                        "{} \\times {}",
                        parenthese(g, pg, Priorite::Facteur),
                        parenthese(d, pd, Priorite::Facteur)
                    ),
                    Priorite::Facteur,
                ))
            }

            // la barre de fraction délimite déjà
            Div(a, b) => {
                let (g, _) = a.latex()?;
                let (d, _) = b.latex()?;
                Ok((format!("\\frac{{{g}}}{{{d}}}"), Priorite::Facteur))
            }

            Pow(a, b) => {
                let (base, pb) = a.latex()?;
                let (exposant, _) = b.latex()?;

                // (3^2)^3 : sans parenthèses, “3^2^3” serait faux en LaTeX
                let base = if pb == Priorite::Puissance {
                    entoure(&base)
                } else {
                    parenthese(base, pb, Priorite::Puissance)
                };
                let exposant = if exposant.chars().count() > 1 {
                    format!("{{{exposant}}}")
                } else {
                    exposant
                };
                Ok((format!("{base}^{exposant}"), Priorite::Puissance))
            }

            Neg { x, seule: true } => {
                let (s, p) = x.latex()?;
                Ok((
                    format!("-{}", parenthese(s, p, Priorite::Unaire)),
                    Priorite::Unaire,
                ))
            }

            // signe porté par l’Add parent ; l’opérande est entouré comme sous un moins unaire
            Neg { x, seule: false } => {
                let (s, p) = x.latex()?;
                Ok((parenthese(s, p, Priorite::Unaire), Priorite::Atome))
            }

            Fact(x) => {
                let (s, p) = x.latex()?;
                let s = if p == Priorite::Puissance {
                    entoure(&s)
                } else {
                    parenthese(s, p, Priorite::Unaire)
                };
                Ok((format!("{s}!"), Priorite::Unaire))
            }
        }
    }
}

/* ------------------------ Affichage debug (parenthésé, pas “joli”) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Const(r) => write!(f, "{r}"),
            Var(s) => write!(f, "{s}"),
            Appel { nom, argument } => write!(f, "{nom}({argument})"),
            Add(a, b) => match b.as_ref() {
                Neg { x, seule: false } => write!(f, "({a}-{x})"),
                _ => write!(f, "({a}+{b})"),
            },
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
            Neg { x, .. } => write!(f, "(-{x})"),
            Fact(x) => write!(f, "({x}!)"),
        }
    }
}
