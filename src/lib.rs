//! Calculatrice exacte : texte -> fraction exacte (ou LaTeX).
//!
//! ```
//! use calculatrice_exacte::{parse, parse_and_calculate, Options};
//!
//! assert_eq!(parse("2(3+2)^2").unwrap().to_string(), "50");
//! assert_eq!(parse_and_calculate("2/3", &Options::default()).unwrap(), "2/3");
//! ```

pub mod noyau;

pub use noyau::{
    parse, parse_and_calculate, parse_and_convert_to_latex, parse_instruction, registre,
    DemarcheNoyau, Erreur, Fraction, GenreErreur, GenreInstruction, Instruction, Options,
    Resultat, Sortie,
};
