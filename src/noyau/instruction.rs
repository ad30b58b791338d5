// src/noyau/instruction.rs
//
// Une instruction = un arbre + ce qu’on veut en faire :
// - Calcul : valeur exacte (ou lecture décimale selon Options)
// - Latex  : rendu LaTeX
// Le même arbre peut être relu dans l’autre genre (with_genre).

use tracing::debug;

use super::erreur::Erreur;
use super::expr::Expr;
use super::fraction::Fraction;

/// Réglages de sortie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// true : lecture décimale tronquée ; false : fraction exacte
    pub decimal: bool,
    /// chiffres après la virgule en mode décimal
    pub precision: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            decimal: false,
            precision: 6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreInstruction {
    Calcul,
    Latex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub genre: GenreInstruction,
    pub expr: Expr,
}

/// Résultat d’une instruction : le texte, et la valeur si c’était un calcul.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sortie {
    pub texte: String,
    pub fraction: Option<Fraction>,
}

impl Instruction {
    pub fn calcul(expr: Expr) -> Self {
        Self {
            genre: GenreInstruction::Calcul,
            expr,
        }
    }

    pub fn latex(expr: Expr) -> Self {
        Self {
            genre: GenreInstruction::Latex,
            expr,
        }
    }

    pub fn with_genre(self, genre: GenreInstruction) -> Self {
        Self { genre, ..self }
    }

    pub fn eval(&self, options: &Options) -> Result<Sortie, Erreur> {
        debug!(genre = ?self.genre, expr = %self.expr, "instruction");

        match self.genre {
            GenreInstruction::Calcul => {
                let f = self.expr.eval()?;
                let texte = if options.decimal {
                    f.approx(options.precision)
                } else {
                    f.to_string()
                };
                Ok(Sortie {
                    texte,
                    fraction: Some(f),
                })
            }
            GenreInstruction::Latex => {
                let (texte, _) = self.expr.latex()?;
                Ok(Sortie {
                    texte,
                    fraction: None,
                })
            }
        }
    }
}
