//! Noyau exact (calcul rationnel + rendu LaTeX)
//!
//! Organisation interne :
//! - erreur.rs      : erreurs typées (thiserror) + genre
//! - fraction.rs    : rationnel exact (BigRational), opérations qui peuvent échouer
//! - lecture.rs     : lecture décimale tronquée + test d’exactitude
//! - espace.rs      : ensembles de définition (intervalles, périodiques…)
//! - predefinis.rs  : registre pi / e / phi + fonctions (initialisé une fois)
//! - jetons.rs      : découpage en jetons
//! - analyse.rs     : descente récursive -> Expr
//! - expr.rs        : arbre + eval exacte + rendu LaTeX
//! - instruction.rs : Calcul | Latex + Options
//! - eval.rs        : pipeline public

pub mod analyse;
pub mod erreur;
pub mod espace;
pub mod eval;
pub mod expr;
pub mod fraction;
pub mod instruction;
pub mod jetons;
pub mod lecture;
pub mod predefinis;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{Erreur, GenreErreur};
pub use eval::{
    parse, parse_and_calculate, parse_and_convert_to_latex, parse_instruction, DemarcheNoyau,
    Resultat,
};
pub use fraction::Fraction;
pub use instruction::{GenreInstruction, Instruction, Options, Sortie};
pub use predefinis::registre;
