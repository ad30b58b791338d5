// src/noyau/analyse.rs
//
// Jetons -> Expr (descente récursive, un niveau par priorité).
//
// Du plus lâche au plus serré :
//   terme              : a + b, a - b
//   implicite_paren    : a (b)        multiplication implicite devant '('
//   facteur            : a * b, a / b
//   implicite_litteral : a pi, a cos(x)  multiplication implicite devant un littéral
//   puissance          : a ^ b  (+ '!' postfixé sur le résultat)
//   atome              : nombre, constante, f(…), ( … ), -x, +x
//
// Conséquences voulues :
// - 2(3+2)^2 = 50, 6/2(1+2) = 9 (le '(' implicite est plus lâche que '/')
// - 6/2cos(1) = 6 / (2·cos(1)) (le littéral implicite est plus serré que '/')
// - -3^2 = -9 (le moins unaire reprend au niveau puissance)
//
// Toute la liste doit être consommée, sinon erreur.

use super::erreur::Erreur;
use super::expr::Expr;
use super::fraction::Fraction;
use super::jetons::{GenreJeton, Jeton};
use super::predefinis::registre;

/// Imbrication max (parenthèses, fonctions, unaires).
/// Un niveau coûte une huitaine de cadres de pile (terme -> … -> atome) :
/// 64 niveaux tiennent dans une pile de 2 Mo, même en debug.
pub const PROFONDEUR_MAX: usize = 64;

/// Taille max d’une expression (borne aussi la hauteur de l’arbre, donc la
/// récursion de eval / latex / Display).
pub const JETONS_MAX: usize = 512;

struct Curseur<'a> {
    jetons: &'a [Jeton],
    pos: usize,
    profondeur: usize,
}

/// Construit l’arbre d’une expression complète.
pub fn parse_expr(jetons: &[Jeton]) -> Result<Expr, Erreur> {
    if jetons.is_empty() {
        return Err(Erreur::ExpressionVide);
    }
    if jetons.len() > JETONS_MAX {
        return Err(Erreur::TropLongue(JETONS_MAX));
    }

    let mut c = Curseur {
        jetons,
        pos: 0,
        profondeur: 0,
    };
    let e = c.terme()?;

    match c.courant() {
        None => Ok(e),
        Some(j) => Err(Erreur::JetonsRestants(j.texte.clone())),
    }
}

impl<'a> Curseur<'a> {
    fn courant(&self) -> Option<&'a Jeton> {
        self.jetons.get(self.pos)
    }

    fn avance(&mut self) {
        self.pos += 1;
    }

    fn sur_operateur(&self, op: &str) -> bool {
        self.courant().is_some_and(|j| j.est_operateur(op))
    }

    fn sur_separateur(&self, sep: &str) -> bool {
        self.courant().is_some_and(|j| j.est_separateur(sep))
    }

    /// Consomme l’opérateur binaire courant ; il doit être suivi de quelque chose.
    fn consomme_binaire(&mut self, op: &str) -> Result<(), Erreur> {
        self.avance();
        if self.courant().is_none() {
            return Err(Erreur::OperandeManquant(op.to_string()));
        }
        Ok(())
    }

    fn imbrique<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Erreur>,
    ) -> Result<T, Erreur> {
        if self.profondeur >= PROFONDEUR_MAX {
            return Err(Erreur::TropImbriquee(PROFONDEUR_MAX));
        }
        self.profondeur += 1;
        let r = f(self);
        self.profondeur -= 1;
        r
    }

    /* ------------------------ Niveaux ------------------------ */

    fn terme(&mut self) -> Result<Expr, Erreur> {
        let mut gauche = self.implicite_paren()?;
        loop {
            if self.sur_operateur("+") {
                self.consomme_binaire("+")?;
                gauche = Expr::add(gauche, self.implicite_paren()?);
            } else if self.sur_operateur("-") {
                self.consomme_binaire("-")?;
                gauche = Expr::sub(gauche, self.implicite_paren()?);
            } else {
                return Ok(gauche);
            }
        }
    }

    fn implicite_paren(&mut self) -> Result<Expr, Erreur> {
        let mut gauche = self.facteur()?;
        while self.sur_separateur("(") {
            gauche = Expr::mul(gauche, self.facteur()?);
        }
        Ok(gauche)
    }

    fn facteur(&mut self) -> Result<Expr, Erreur> {
        let mut gauche = self.implicite_litteral()?;
        loop {
            if self.sur_operateur("*") {
                self.consomme_binaire("*")?;
                gauche = Expr::mul(gauche, self.implicite_litteral()?);
            } else if self.sur_operateur("/") {
                self.consomme_binaire("/")?;
                gauche = Expr::div(gauche, self.implicite_litteral()?);
            } else {
                return Ok(gauche);
            }
        }
    }

    fn implicite_litteral(&mut self) -> Result<Expr, Erreur> {
        let mut gauche = self.puissance()?;
        while self
            .courant()
            .is_some_and(|j| j.genre == GenreJeton::Litteral)
        {
            gauche = Expr::mul(gauche, self.puissance()?);
        }
        Ok(gauche)
    }

    /// ATTENTION : '^' est associatif À GAUCHE ici.
    /// 3^2^3 = (3^2)^3 = 729, et non 3^(2^3) = 6561.
    fn puissance(&mut self) -> Result<Expr, Erreur> {
        let mut base = self.atome()?;
        while self.sur_operateur("^") {
            self.consomme_binaire("^")?;
            base = Expr::pow(base, self.atome()?);
        }

        // '!' s’applique à toute la puissance : 3^2! = (3^2)!
        if self.sur_operateur("!") {
            self.avance();
            base = Expr::fact(base);
        }
        Ok(base)
    }

    fn atome(&mut self) -> Result<Expr, Erreur> {
        let j = self.courant().ok_or(Erreur::FinInattendue)?;

        match j.genre {
            GenreJeton::Nombre => {
                let f = Fraction::from_decimal_str(&j.texte)
                    .ok_or_else(|| Erreur::JetonInattendu(j.texte.clone()))?;
                self.avance();
                Ok(Expr::Const(f))
            }

            GenreJeton::Litteral => {
                self.avance();
                self.litteral(&j.texte)
            }

            GenreJeton::Separateur if j.texte == "(" => {
                self.avance();
                self.imbrique(|c| {
                    let e = c.terme()?;
                    c.ferme()?;
                    Ok(e)
                })
            }

            GenreJeton::Operateur if j.texte == "-" || j.texte == "+" => {
                self.avance();
                if self.courant().is_none() {
                    return Err(Erreur::OperandeManquant(j.texte.clone()));
                }
                let x = self.imbrique(|c| c.puissance())?;
                if j.texte == "-" {
                    Ok(Expr::neg(x))
                } else {
                    Ok(x)
                }
            }

            _ => Err(Erreur::JetonInattendu(j.texte.clone())),
        }
    }

    /// Littéral déjà consommé : constante ou appel de fonction.
    fn litteral(&mut self, nom: &str) -> Result<Expr, Erreur> {
        let r = registre();

        if r.constante(nom).is_some() {
            return Ok(Expr::Var(nom.to_string()));
        }

        if r.fonction(nom).is_some() {
            if !self.sur_separateur("(") {
                return Err(Erreur::ParentheseOuvranteAttendue(nom.to_string()));
            }
            self.avance();
            let argument = self.imbrique(|c| {
                let e = c.terme()?;
                c.ferme()?;
                Ok(e)
            })?;
            return Ok(Expr::appel(nom, argument));
        }

        Err(Erreur::IdentifiantInconnu(nom.to_string()))
    }

    fn ferme(&mut self) -> Result<(), Erreur> {
        if self.sur_separateur(")") {
            self.avance();
            return Ok(());
        }
        Err(Erreur::ParentheseFermanteAttendue(
            self.courant().map(|j| j.texte.clone()),
        ))
    }
}
