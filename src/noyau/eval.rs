//! Noyau — pipeline public
//!
//! texte -> jetons -> arbre (Expr) -> instruction (Calcul | Latex) -> sortie
//!
//! Trois entrées :
//! - parse                      : valeur exacte + lectures (approx, exactitude, LaTeX)
//! - parse_and_calculate        : texte direct (exact ou décimal selon Options)
//! - parse_and_convert_to_latex : texte LaTeX (sans évaluer)

use std::fmt;

use tracing::debug;

use super::analyse::parse_expr;
use super::erreur::Erreur;
use super::expr::Expr;
use super::fraction::Fraction;
use super::instruction::{GenreInstruction, Instruction, Options};
use super::jetons::{format_jetons, tokenize};

/// Ce que l’UI affiche dans “Démarche”.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub arbre: String,
}

/// Expression analysée ET évaluée (valeur exacte).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resultat {
    expr: Expr,
    fraction: Fraction,
    demarche: DemarcheNoyau,
}

impl Resultat {
    pub fn fraction(&self) -> &Fraction {
        &self.fraction
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn demarche(&self) -> &DemarcheNoyau {
        &self.demarche
    }

    /// Lecture décimale tronquée.
    pub fn approx(&self, precision: usize) -> String {
        self.fraction.approx(precision)
    }

    /// La lecture décimale à `precision` chiffres est-elle exacte ?
    pub fn is_exact(&self, precision: usize) -> bool {
        self.fraction.can_be_represented_exactly(precision)
    }

    pub fn to_latex(&self) -> Result<String, Erreur> {
        self.expr.latex().map(|(s, _)| s)
    }
}

/// Forme exacte ("n" ou "n/d").
impl fmt::Display for Resultat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fraction)
    }
}

/// texte -> (arbre, jetons formatés)
fn analyse(expression: &str) -> Result<(Expr, String), Erreur> {
    let s = expression.trim();

    let jetons = tokenize(s)?;
    debug!(expression = s, jetons = jetons.len(), "jetons");

    let expr = parse_expr(&jetons)?;
    debug!(arbre = %expr, "arbre");

    Ok((expr, format_jetons(&jetons)))
}

/// Analyse sans évaluer : instruction de calcul + démarche.
/// Le même arbre se relit ensuite en LaTeX via `with_genre`.
pub fn parse_instruction(expression: &str) -> Result<(Instruction, DemarcheNoyau), Erreur> {
    let (expr, jetons) = analyse(expression)?;
    let demarche = DemarcheNoyau {
        jetons,
        arbre: expr.to_string(),
    };
    Ok((Instruction::calcul(expr), demarche))
}

/// Analyse et évalue exactement.
pub fn parse(expression: &str) -> Result<Resultat, Erreur> {
    let (Instruction { expr, .. }, demarche) = parse_instruction(expression)?;
    let fraction = expr.eval()?;
    debug!(valeur = %fraction, "évaluation");

    Ok(Resultat {
        expr,
        fraction,
        demarche,
    })
}

pub fn parse_and_calculate(expression: &str, options: &Options) -> Result<String, Erreur> {
    let (instruction, _) = parse_instruction(expression)?;
    Ok(instruction.eval(options)?.texte)
}

/// Rendu seul : un arbre hors domaine (ex: tan(pi/2)) se rend quand même.
pub fn parse_and_convert_to_latex(expression: &str, options: &Options) -> Result<String, Erreur> {
    let (instruction, _) = parse_instruction(expression)?;
    Ok(instruction
        .with_genre(GenreInstruction::Latex)
        .eval(options)?
        .texte)
}
