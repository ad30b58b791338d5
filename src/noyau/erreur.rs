// src/noyau/erreur.rs
//
// Erreurs du noyau (typées, jamais avalées).
// Chaque étape du pipeline (jetons -> arbre -> évaluation / LaTeX) renvoie
// Result<_, Erreur> ; l’appelant (UI) décide de l’affichage.

use thiserror::Error;

/// Famille d’une erreur (ce que l’appelant teste en général).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreErreur {
    Lexique,
    Syntaxe,
    IdentifiantInconnu,
    OperationIllegale,
    OperationNonSupportee,
    Domaine,
    Debordement,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Erreur {
    /* ------------------------ Jetons ------------------------ */
    #[error("deux nombres se suivent sans opérateur : '{gauche}' '{droite}'")]
    NombresAdjacents { gauche: String, droite: String },

    /* ------------------------ Syntaxe ------------------------ */
    #[error("expression vide")]
    ExpressionVide,

    #[error("jeton inattendu '{0}' : une expression littérale est attendue")]
    JetonInattendu(String),

    #[error("'(' attendue après la fonction {0}")]
    ParentheseOuvranteAttendue(String),

    #[error("')' attendue, trouvé {}", .0.as_deref().map(|t| format!("'{t}'")).unwrap_or_else(|| "la fin".to_string()))]
    ParentheseFermanteAttendue(Option<String>),

    #[error("opérande manquant après '{0}'")]
    OperandeManquant(String),

    #[error("fin d’expression inattendue")]
    FinInattendue,

    #[error("impossible d’analyser la suite de l’expression à partir de '{0}'")]
    JetonsRestants(String),

    #[error("expression trop imbriquée (profondeur max {0})")]
    TropImbriquee(usize),

    #[error("expression trop longue ({0} jetons max)")]
    TropLongue(usize),

    /* ------------------------ Identifiants ------------------------ */
    #[error("identifiant inconnu : {0}")]
    IdentifiantInconnu(String),

    /* ------------------------ Arithmétique ------------------------ */
    #[error("opération illégale : {0}")]
    OperationIllegale(String),

    #[error("opération non supportée : {0}")]
    OperationNonSupportee(String),

    #[error("{valeur} n’est pas dans l’ensemble de définition {espace}")]
    HorsDomaine { valeur: String, espace: String },

    #[error("{0} n’est pas un entier")]
    NonEntier(String),

    #[error("nombre trop grand : {0}")]
    TropGrand(String),
}

impl Erreur {
    pub fn genre(&self) -> GenreErreur {
        use Erreur::*;

        match self {
            NombresAdjacents { .. } => GenreErreur::Lexique,

            ExpressionVide
            | JetonInattendu(_)
            | ParentheseOuvranteAttendue(_)
            | ParentheseFermanteAttendue(_)
            | OperandeManquant(_)
            | FinInattendue
            | JetonsRestants(_)
            | TropImbriquee(_)
            | TropLongue(_) => GenreErreur::Syntaxe,

            IdentifiantInconnu(_) => GenreErreur::IdentifiantInconnu,
            OperationIllegale(_) => GenreErreur::OperationIllegale,
            OperationNonSupportee(_) => GenreErreur::OperationNonSupportee,
            HorsDomaine { .. } => GenreErreur::Domaine,
            NonEntier(_) | TropGrand(_) => GenreErreur::Debordement,
        }
    }
}
