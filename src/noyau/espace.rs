// src/noyau/espace.rs
//
// Espaces (ensembles de définition) : prédicat exact sur Fraction + nom affichable.
// - Reels                 : tout R
// - Intervalle            : deux bornes (finie ouverte/fermée, ou infinie)
// - Union                 : ATTENTION, appartenance = à TOUS les espaces listés
//                           (c’est une intersection ; le nom est historique et conservé)
// - Periodique            : intervalle de base + période > 0
// - Nomme                 : un espace quelconque avec un nom d’affichage imposé
//
// Valeurs immuables : aucune méthode ne modifie un espace.

use std::fmt;

use super::erreur::Erreur;
use super::fraction::Fraction;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Borne {
    Finie { valeur: Fraction, incluse: bool },
    Infinie { positive: bool },
}

impl Borne {
    pub fn fermee(valeur: Fraction) -> Self {
        Borne::Finie {
            valeur,
            incluse: true,
        }
    }

    pub fn ouverte(valeur: Fraction) -> Self {
        Borne::Finie {
            valeur,
            incluse: false,
        }
    }

    pub fn plus_infini() -> Self {
        Borne::Infinie { positive: true }
    }

    pub fn moins_infini() -> Self {
        Borne::Infinie { positive: false }
    }

    fn valeur_finie(&self) -> Option<&Fraction> {
        match self {
            Borne::Finie { valeur, .. } => Some(valeur),
            Borne::Infinie { .. } => None,
        }
    }

    fn texte(&self) -> String {
        match self {
            Borne::Finie { valeur, .. } => valeur.to_string(),
            Borne::Infinie { positive: true } => "+inf".into(),
            Borne::Infinie { positive: false } => "-inf".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intervalle {
    pub bas: Borne,
    pub haut: Borne,
}

impl Intervalle {
    pub fn new(bas: Borne, haut: Borne) -> Self {
        Self { bas, haut }
    }

    pub fn contains(&self, f: &Fraction) -> bool {
        sous_borne_haute(f, &self.haut) && sur_borne_basse(f, &self.bas)
    }
}

/// f est-il “sous” la borne haute ?
fn sous_borne_haute(f: &Fraction, b: &Borne) -> bool {
    match b {
        Borne::Infinie { positive } => *positive,
        Borne::Finie {
            valeur,
            incluse: true,
        } => f <= valeur,
        Borne::Finie {
            valeur,
            incluse: false,
        } => f < valeur,
    }
}

/// f est-il “au-dessus” de la borne basse ?
fn sur_borne_basse(f: &Fraction, b: &Borne) -> bool {
    match b {
        Borne::Infinie { positive } => !*positive,
        Borne::Finie {
            valeur,
            incluse: true,
        } => f >= valeur,
        Borne::Finie {
            valeur,
            incluse: false,
        } => f > valeur,
    }
}

impl fmt::Display for Intervalle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ouvrant = match self.bas {
            Borne::Finie { incluse: true, .. } => "[",
            _ => "]",
        };
        let fermant = match self.haut {
            Borne::Finie { incluse: true, .. } => "]",
            _ => "[",
        };
        write!(
            f,
            "{ouvrant} {} ; {} {fermant}",
            self.bas.texte(),
            self.haut.texte()
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Espace {
    Reels,
    Intervalle(Intervalle),
    Union(Vec<Espace>),
    Periodique { base: Intervalle, periode: Fraction },
    Nomme { espace: Box<Espace>, nom: String },
}

impl Espace {
    /// Espace périodique ; la période doit être strictement positive
    /// (sinon la normalisation ne convergerait pas).
    pub fn periodique(base: Intervalle, periode: Fraction) -> Result<Self, Erreur> {
        if periode <= Fraction::zero() {
            return Err(Erreur::OperationIllegale(format!(
                "période {periode} : elle doit être strictement positive"
            )));
        }
        Ok(Espace::Periodique { base, periode })
    }

    pub fn nomme(self, nom: impl Into<String>) -> Self {
        Espace::Nomme {
            espace: Box::new(self),
            nom: nom.into(),
        }
    }

    pub fn contains(&self, f: &Fraction) -> bool {
        match self {
            Espace::Reels => true,
            Espace::Intervalle(i) => i.contains(f),
            // intersection (voir en-tête)
            Espace::Union(espaces) => espaces.iter().all(|e| e.contains(f)),
            Espace::Periodique { base, periode } => contient_modulo(base, periode, f),
            Espace::Nomme { espace, .. } => espace.contains(f),
        }
    }
}

/// Ramène f dans la zone de l’intervalle de base à coups de période, puis teste.
///
/// Même résultat que “soustraire la période tant que f > haut” (resp. “ajouter
/// tant que f < bas”), mais le nombre de pas k est calculé d’un coup :
/// k = ⌈(f - haut) / p⌉ (resp. ⌈(bas - f) / p⌉). Temps borné même pour f énorme.
fn contient_modulo(base: &Intervalle, periode: &Fraction, f: &Fraction) -> bool {
    if base.contains(f) {
        return true;
    }
    // variante construite à la main sans passer par `periodique` : pas de report possible
    if periode <= &Fraction::zero() {
        return false;
    }

    if let Some(haut) = base.haut.valeur_finie() {
        if f > haut {
            let k = nombre_de_periodes(&(f - haut), periode);
            let ramene = f - &(&k * periode);
            return base.contains(&ramene);
        }
    }

    // ici f est forcément sous la borne basse
    if let Some(bas) = base.bas.valeur_finie() {
        if f < bas {
            let k = nombre_de_periodes(&(bas - f), periode);
            let ramene = f + &(&k * periode);
            return base.contains(&ramene);
        }
    }

    false
}

/// ⌈ecart / periode⌉ pour ecart > 0, periode > 0.
fn nombre_de_periodes(ecart: &Fraction, periode: &Fraction) -> Fraction {
    let q = ecart.as_ratio() / periode.as_ratio();
    Fraction::from(q.ceil())
}

impl fmt::Display for Espace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Espace::Reels => write!(f, "R"),
            Espace::Intervalle(i) => write!(f, "{i}"),
            Espace::Union(espaces) => {
                let noms: Vec<String> = espaces.iter().map(|e| e.to_string()).collect();
                write!(f, "{}", noms.join(" ∩ "))
            }
            Espace::Periodique { base, periode } => write!(f, "{base} mod {periode}"),
            Espace::Nomme { nom, .. } => write!(f, "{nom}"),
        }
    }
}
