//! src/app/etat.rs
//!
//! État de la calculatrice, sans egui.
//!
//! L’entrée est analysée une fois (`parse_instruction`), puis l’instruction est
//! relue dans le genre du mode choisi (`with_genre`) avec les `Options` courantes.
//! La vue ne fait que dessiner et appeler les méthodes d’ici.

use tracing::debug;

use calculatrice_exacte::{
    parse_instruction, registre, DemarcheNoyau, Erreur, GenreInstruction, Options, Sortie,
};

/// Garde-fou sur la précision de la lecture décimale.
pub const PRECISION_MAX: usize = 200;

const PRECISION_DEFAUT: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Exact,
    Decimal,
    Latex,
}

impl Mode {
    pub const TOUS: [Mode; 3] = [Mode::Exact, Mode::Decimal, Mode::Latex];

    pub fn libelle(self) -> &'static str {
        match self {
            Mode::Exact => "Exact",
            Mode::Decimal => "Décimal",
            Mode::Latex => "LaTeX",
        }
    }

    fn genre(self) -> GenreInstruction {
        match self {
            Mode::Latex => GenreInstruction::Latex,
            Mode::Exact | Mode::Decimal => GenreInstruction::Calcul,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub entree: String,
    pub mode: Mode,
    pub precision: usize,

    /// texte rendu par l’instruction (fraction, décimal tronqué ou LaTeX)
    pub sortie: String,
    /// forme "n" / "n/d" quand il y a eu calcul
    pub exact: Option<String>,
    /// en mode décimal : la lecture tombe-t-elle juste ?
    pub lecture_exacte: Option<bool>,
    pub erreur: Option<String>,
    pub demarche: DemarcheNoyau,

    /// la vue redonne le focus à l’entrée après un clic
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            mode: Mode::Exact,
            precision: PRECISION_DEFAUT,
            sortie: String::new(),
            exact: None,
            lecture_exacte: None,
            erreur: None,
            demarche: DemarcheNoyau::default(),
            focus_entree: true,
        }
    }
}

impl AppCalc {
    /// Démarrage avec une expression déjà saisie (ligne de commande).
    pub fn avec_entree(entree: impl Into<String>) -> Self {
        let mut app = Self {
            entree: entree.into(),
            ..Self::default()
        };
        if !app.entree.trim().is_empty() {
            app.evaluer();
        }
        app
    }

    pub fn options(&self) -> Options {
        Options {
            decimal: self.mode == Mode::Decimal,
            precision: self.precision,
        }
    }

    /* ------------------------ Évaluation ------------------------ */

    pub fn evaluer(&mut self) {
        match self.executer() {
            Ok((sortie, demarche)) => self.poser_sortie(sortie, demarche),
            Err(e) => {
                debug!(erreur = %e, genre = ?e.genre(), "entrée refusée");
                self.poser_erreur(&e);
            }
        }
        self.focus_entree = true;
    }

    fn executer(&self) -> Result<(Sortie, DemarcheNoyau), Erreur> {
        let (instruction, demarche) = parse_instruction(&self.entree)?;
        let sortie = instruction
            .with_genre(self.mode.genre())
            .eval(&self.options())?;
        Ok((sortie, demarche))
    }

    fn poser_sortie(&mut self, sortie: Sortie, demarche: DemarcheNoyau) {
        self.exact = sortie.fraction.as_ref().map(|f| f.to_string());
        self.lecture_exacte = match self.mode {
            Mode::Decimal => sortie
                .fraction
                .as_ref()
                .map(|f| f.can_be_represented_exactly(self.precision)),
            Mode::Exact | Mode::Latex => None,
        };
        self.sortie = sortie.texte;
        self.erreur = None;
        self.demarche = demarche;
    }

    /// On garde la dernière sortie affichée : une faute de frappe n’efface pas l’écran.
    fn poser_erreur(&mut self, e: &Erreur) {
        self.erreur = Some(e.to_string());
        self.lecture_exacte = None;
        self.demarche = DemarcheNoyau::default();
    }

    /// Un changement de mode ou de précision relit la dernière entrée valide.
    fn relire(&mut self) {
        if self.erreur.is_none() && !self.sortie.is_empty() {
            self.evaluer();
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.relire();
        }
    }

    pub fn set_precision(&mut self, precision: usize) {
        let p = precision.min(PRECISION_MAX);
        if self.precision != p {
            self.precision = p;
            self.relire();
        }
    }

    /* ------------------------ Édition ------------------------ */

    /// Ajoute un morceau d’expression. Un espace sépare deux mots collés :
    /// "pi" puis "2" donnerait le littéral "pi2", "pi" puis "cos(" le littéral "picos".
    pub fn inserer(&mut self, morceau: &str) {
        let colle = self
            .entree
            .chars()
            .last()
            .is_some_and(|c| c.is_alphabetic());
        let debut_mot = morceau
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric());
        if colle && debut_mot {
            self.entree.push(' ');
        }
        self.entree.push_str(morceau);
        self.focus_entree = true;
    }

    /// DEL : retire d’un bloc un nom du registre ("cos(", "pi"), sinon un caractère.
    pub fn effacer_dernier(&mut self) {
        let r = registre();
        let mut blocs: Vec<String> = r
            .noms()
            .into_iter()
            .map(|nom| {
                if r.fonction(nom).is_some() {
                    format!("{nom}(")
                } else {
                    nom.to_string()
                }
            })
            .collect();
        // "log10(" avant "log(" … et "phi" avant "pi"
        blocs.sort_by_key(|b| std::cmp::Reverse(b.len()));

        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);
        match blocs.iter().find(|b| self.entree.ends_with(b.as_str())) {
            Some(b) => self.entree.truncate(self.entree.len() - b.len()),
            None => {
                self.entree.pop();
            }
        }
        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);

        self.focus_entree = true;
    }

    /// C : l’entrée seulement.
    pub fn effacer_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// AC : tout, sauf le mode et la précision choisis.
    pub fn tout_effacer(&mut self) {
        *self = Self {
            mode: self.mode,
            precision: self.precision,
            ..Self::default()
        };
    }
}
