// src/noyau/jetons.rs
//
// Découpage en jetons : texte -> liste plate (Nombre / Littéral / Séparateur / Opérateur).
// 1) découpe par mots (espaces)
// 2) un mot qui est un nombre décimal (signé ou non) donne un jeton Nombre
//    (le '-' devient un opérateur à part, le '+' est simplement retiré)
// 3) sinon le mot est relu caractère par caractère :
//    - chiffres (et '.' dans un nombre) : Nombre, regroupés
//    - lettres & co                     : Littéral, regroupés ; un chiffre
//                                         prolonge un littéral (log10, log2)
//    - opérateurs / séparateurs         : un jeton par caractère
// Deux Nombres consécutifs sont refusés (ex: "1 +2").

use std::fmt;

use super::erreur::Erreur;

const OPERATEURS: [char; 8] = ['+', '-', '*', '/', '^', '%', '=', '!'];
const SEPARATEURS: [char; 3] = [',', '(', ')'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreJeton {
    Nombre,
    Litteral,
    Separateur,
    Operateur,
}

impl fmt::Display for GenreJeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenreJeton::Nombre => "nombre",
            GenreJeton::Litteral => "littéral",
            GenreJeton::Separateur => "séparateur",
            GenreJeton::Operateur => "opérateur",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub genre: GenreJeton,
    pub texte: String,
}

impl Jeton {
    pub fn new(genre: GenreJeton, texte: impl Into<String>) -> Self {
        Self {
            genre,
            texte: texte.into(),
        }
    }

    /// Opérateur précis ? (ex: est_operateur("^"))
    pub fn est_operateur(&self, op: &str) -> bool {
        self.genre == GenreJeton::Operateur && self.texte == op
    }

    pub fn est_separateur(&self, sep: &str) -> bool {
        self.genre == GenreJeton::Separateur && self.texte == sep
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.genre, self.texte)
    }
}

/// Découpe une expression en jetons.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, Erreur> {
    let mut out = Vec::new();

    for mot in s.split_whitespace() {
        decoupe_mot(mot, &mut out);
    }

    // deux nombres collés : ambigu, refusé
    for paire in out.windows(2) {
        if paire[0].genre == GenreJeton::Nombre && paire[1].genre == GenreJeton::Nombre {
            return Err(Erreur::NombresAdjacents {
                gauche: paire[0].texte.clone(),
                droite: paire[1].texte.clone(),
            });
        }
    }

    Ok(out)
}

/// "12", "-1.5", "+.5", "3." ; pas d’exposant, un seul point, au moins un chiffre.
fn est_nombre(mot: &str) -> bool {
    let corps = mot
        .strip_prefix('-')
        .or_else(|| mot.strip_prefix('+'))
        .unwrap_or(mot);

    let mut points = 0;
    let mut chiffres = 0;
    for c in corps.chars() {
        match c {
            '0'..='9' => chiffres += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    chiffres > 0 && points <= 1
}

fn decoupe_mot(mot: &str, out: &mut Vec<Jeton>) {
    if est_nombre(mot) {
        if let Some(reste) = mot.strip_prefix('-') {
            out.push(Jeton::new(GenreJeton::Operateur, "-"));
            out.push(Jeton::new(GenreJeton::Nombre, reste));
        } else {
            let reste = mot.strip_prefix('+').unwrap_or(mot);
            out.push(Jeton::new(GenreJeton::Nombre, reste));
        }
        return;
    }

    let chars: Vec<char> = mot.chars().collect();
    let mut courant = String::new();
    let mut genre_courant: Option<GenreJeton> = None;

    for (i, &c) in chars.iter().enumerate() {
        let suivant_chiffre = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
        let genre = if c.is_ascii_digit() && genre_courant == Some(GenreJeton::Litteral) {
            GenreJeton::Litteral
        } else if c.is_ascii_digit()
            || (c == '.' && (genre_courant == Some(GenreJeton::Nombre) || suivant_chiffre))
        {
            GenreJeton::Nombre
        } else if OPERATEURS.contains(&c) {
            GenreJeton::Operateur
        } else if SEPARATEURS.contains(&c) {
            GenreJeton::Separateur
        } else {
            GenreJeton::Litteral
        };

        let regroupe = matches!(genre, GenreJeton::Nombre | GenreJeton::Litteral);
        if genre_courant != Some(genre) || !regroupe {
            if let Some(g) = genre_courant {
                out.push(Jeton::new(g, std::mem::take(&mut courant)));
            }
            genre_courant = Some(genre);
        }
        courant.push(c);
    }

    if let Some(g) = genre_courant {
        out.push(Jeton::new(g, courant));
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(|j| j.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
