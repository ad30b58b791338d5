// src/noyau/predefinis.rs
//
// Registre des noms prédéfinis (constantes + fonctions).
// Construit une seule fois (OnceLock), jamais modifié ensuite :
// lecture concurrente sans verrou.
//
// Constantes : pi, e, phi
// Fonctions  : exp, sqrt, sin, cos, tan, ln, log2, log, log10
//              chacune avec son ensemble de définition (Espace).

use std::collections::HashMap;
use std::f64::consts;
use std::sync::OnceLock;

use tracing::trace;

use super::erreur::Erreur;
use super::espace::{Borne, Espace, Intervalle};
use super::fraction::Fraction;

/// Nombre d’or (pas encore de constante stable dans std).
const PHI: f64 = 1.618033988749895;

#[derive(Clone, Debug)]
pub struct Constante {
    pub valeur: Fraction,
    /// `e` s’écrit “e” en LaTeX, les autres “\nom”.
    pub sans_antislash: bool,
}

impl Constante {
    pub fn latex(&self, nom: &str) -> String {
        if self.sans_antislash {
            nom.to_string()
        } else {
            format!("\\{nom}")
        }
    }
}

/// Forme LaTeX d’un appel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenduLatex {
    /// `\cmd\left(arg\right)`
    Commande(&'static str),
    /// `\sqrt{arg}`
    Racine,
}

#[derive(Clone, Debug)]
pub struct Fonction {
    pub domaine: Espace,
    relation: fn(f64) -> f64,
    pub rendu: RenduLatex,
}

impl Fonction {
    /// Vérifie l’ensemble de définition puis applique la relation.
    /// Passage par f64 : le résultat n’est plus exact.
    pub fn appliquer(&self, nom: &str, x: &Fraction) -> Result<Fraction, Erreur> {
        if !self.domaine.contains(x) {
            trace!(fonction = nom, argument = %x, domaine = %self.domaine, "hors domaine");
            return Err(Erreur::HorsDomaine {
                valeur: x.to_string(),
                espace: self.domaine.to_string(),
            });
        }

        let y = (self.relation)(x.to_f64());
        Fraction::from_f64(y).ok_or_else(|| Erreur::TropGrand(format!("{nom}({x})")))
    }

    pub fn latex(&self, argument: &str) -> String {
        match self.rendu {
            RenduLatex::Commande(cmd) => format!("{cmd}\\left({argument}\\right)"),
            RenduLatex::Racine => format!("\\sqrt{{{argument}}}"),
        }
    }
}

#[derive(Debug)]
pub struct Registre {
    constantes: HashMap<&'static str, Constante>,
    fonctions: HashMap<&'static str, Fonction>,
}

impl Registre {
    pub fn constante(&self, nom: &str) -> Option<&Constante> {
        self.constantes.get(nom)
    }

    pub fn fonction(&self, nom: &str) -> Option<&Fonction> {
        self.fonctions.get(nom)
    }

    /// Noms triés (affichage / tests).
    pub fn noms(&self) -> Vec<&'static str> {
        let mut v: Vec<&'static str> = self
            .constantes
            .keys()
            .chain(self.fonctions.keys())
            .copied()
            .collect();
        v.sort_unstable();
        v
    }
}

pub fn registre() -> &'static Registre {
    static REGISTRE: OnceLock<Registre> = OnceLock::new();
    REGISTRE.get_or_init(construire)
}

/* ------------------------ Construction ------------------------ */

fn depuis_flottant(x: f64) -> Fraction {
    // constantes finies connues à la compilation
    Fraction::from_f64(x).expect("constante finie")
}

fn construire() -> Registre {
    let pi = depuis_flottant(consts::PI);

    let mut constantes = HashMap::new();
    constantes.insert(
        "pi",
        Constante {
            valeur: pi.clone(),
            sans_antislash: false,
        },
    );
    constantes.insert(
        "e",
        Constante {
            valeur: depuis_flottant(consts::E),
            sans_antislash: true,
        },
    );
    constantes.insert(
        "phi",
        Constante {
            valeur: depuis_flottant(PHI),
            sans_antislash: false,
        },
    );

    let positifs = Espace::Intervalle(Intervalle::new(
        Borne::fermee(Fraction::zero()),
        Borne::plus_infini(),
    ));
    let strictement_positifs = Espace::Intervalle(Intervalle::new(
        Borne::ouverte(Fraction::zero()),
        Borne::plus_infini(),
    ));

    // tan : ] -π/2 ; π/2 [ mod π  (même π que la constante)
    let demi_pi = &pi * &Fraction::new(1, 2).expect("1/2");
    let base_tan = Intervalle::new(Borne::ouverte(-&demi_pi), Borne::ouverte(demi_pi));
    let domaine_tan = Espace::periodique(base_tan, pi)
        .expect("période π > 0")
        .nomme("] -π/2 ; π/2 [ mod π");

    let f = |domaine: &Espace, relation: fn(f64) -> f64, rendu| Fonction {
        domaine: domaine.clone(),
        relation,
        rendu,
    };

    let mut fonctions = HashMap::new();
    fonctions.insert("exp", f(&Espace::Reels, f64::exp, RenduLatex::Commande("\\exp")));
    fonctions.insert("sqrt", f(&positifs, f64::sqrt, RenduLatex::Racine));
    fonctions.insert("sin", f(&Espace::Reels, f64::sin, RenduLatex::Commande("\\sin")));
    fonctions.insert("cos", f(&Espace::Reels, f64::cos, RenduLatex::Commande("\\cos")));
    fonctions.insert("tan", f(&domaine_tan, f64::tan, RenduLatex::Commande("\\tan")));
    fonctions.insert(
        "ln",
        f(&strictement_positifs, f64::ln, RenduLatex::Commande("\\ln")),
    );
    fonctions.insert(
        "log2",
        f(&strictement_positifs, f64::log2, RenduLatex::Commande("\\log_{2}")),
    );
    fonctions.insert(
        "log",
        f(&strictement_positifs, f64::log10, RenduLatex::Commande("\\log")),
    );
    fonctions.insert(
        "log10",
        f(&strictement_positifs, f64::log10, RenduLatex::Commande("\\log_{10}")),
    );

    Registre {
        constantes,
        fonctions,
    }
}
