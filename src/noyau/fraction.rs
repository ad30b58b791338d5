// src/noyau/fraction.rs
//
// Fraction exacte (rationnel big int), toujours réduite.
// - dénominateur > 0 (signe porté par le numérateur)
// - jamais de dénominateur nul : inversion / division par zéro => Erreur
// - comparaisons exactes (produit en croix via BigRational), jamais en flottant
//
// La lecture décimale (approx / représentation exacte) vit dans lecture.rs.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::erreur::Erreur;

/// Garde-fou : |n| max pour x^n (au-delà, le calcul exact ne finit plus “à l’échelle humaine”).
pub const EXPOSANT_MAX: u64 = 100_000;

/// Garde-fou : taille max (en bits) estimée pour le numérateur ou le dénominateur de x^n.
/// 2^100000^2 passe, 2^100000^100000 non.
pub const BITS_MAX: u64 = 1 << 22;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fraction(BigRational);

impl Fraction {
    /// a/b réduit ; b == 0 => opération illégale.
    pub fn new(a: impl Into<BigInt>, b: impl Into<BigInt>) -> Result<Self, Erreur> {
        let b = b.into();
        if b.is_zero() {
            return Err(Erreur::OperationIllegale(
                "dénominateur nul dans une fraction".into(),
            ));
        }
        Ok(Fraction(BigRational::new(a.into(), b)))
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Fraction(BigRational::from_integer(n.into()))
    }

    pub fn zero() -> Self {
        Fraction(BigRational::zero())
    }

    pub fn one() -> Self {
        Fraction(BigRational::one())
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /* ------------------------ Conversions ------------------------ */

    /// Littéral décimal exact : "12", "1.25", ".5", "5.", "-0.75".
    /// Aucun passage par un flottant binaire.
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let (neg, corps) = match s.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (ent, dec) = corps.split_once('.').unwrap_or((corps, ""));
        if ent.is_empty() && dec.is_empty() {
            return None;
        }
        if !ent.bytes().chain(dec.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let chiffres = format!("{ent}{dec}");
        let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
        let d = BigInt::from(10).pow(dec.len() as u32);

        let n = if neg { -n } else { n };
        Some(Fraction(BigRational::new(n, d)))
    }

    /// Flottant -> fraction via son écriture décimale la plus courte
    /// (3.141592653589793 -> 3141592653589793/10^15).
    /// None si NaN / infini.
    pub fn from_f64(x: f64) -> Option<Self> {
        if !x.is_finite() {
            return None;
        }
        Self::from_decimal_str(&format!("{x}"))
    }

    /// Approximation flottante : ce qui passe par ici n’est plus exact.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn to_integer(&self) -> Result<BigInt, Erreur> {
        if !self.is_integer() {
            return Err(Erreur::NonEntier(self.to_string()));
        }
        Ok(self.0.to_integer())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /* ------------------------ Opérations qui peuvent échouer ------------------------ */

    pub fn inverse(&self) -> Result<Fraction, Erreur> {
        if self.is_zero() {
            return Err(Erreur::OperationIllegale(
                "impossible d’inverser une fraction nulle".into(),
            ));
        }
        Ok(Fraction(self.0.recip()))
    }

    pub fn checked_div(&self, autre: &Fraction) -> Result<Fraction, Erreur> {
        if autre.is_zero() {
            return Err(Erreur::OperationIllegale(format!("division de {self} par zéro")));
        }
        Ok(Fraction(&self.0 / &autre.0))
    }

    /// self^exposant, exposant entier seulement.
    /// Un exposant réel n’est pas implémenté : erreur explicite, pas d’approximation.
    pub fn pow(&self, exposant: &Fraction) -> Result<Fraction, Erreur> {
        if !exposant.is_integer() {
            return Err(Erreur::OperationNonSupportee(format!(
                "{self}^{exposant} : l’exposant doit être entier"
            )));
        }

        let n = exposant
            .numer()
            .to_i64()
            .filter(|n| n.unsigned_abs() <= EXPOSANT_MAX)
            .ok_or_else(|| Erreur::TropGrand(format!("exposant {exposant}")))?;

        if self.is_zero() {
            return match n {
                0 => Ok(Fraction::one()),
                n if n < 0 => Err(Erreur::OperationIllegale(
                    "zéro élevé à une puissance négative".into(),
                )),
                _ => Ok(Fraction::zero()),
            };
        }

        // taille du résultat ≈ taille de la base × |n|
        let bits = self
            .numer()
            .bits()
            .max(self.denom().bits())
            .saturating_mul(n.unsigned_abs());
        if bits > BITS_MAX {
            return Err(Erreur::TropGrand(format!("puissance (~{bits} bits)")));
        }

        Ok(Fraction(rational_pow_int(self.0.clone(), n)))
    }
}

/// Exponentiation rapide (carré-multiplie), exposant signé, base non nulle si exp < 0.
fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        return rational_pow_int(base, -exp).recip();
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/* ------------------------ Opérations fermées ------------------------ */

impl Add for &Fraction {
    type Output = Fraction;
    fn add(self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 + &autre.0)
    }
}

impl Sub for &Fraction {
    type Output = Fraction;
    fn sub(self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 - &autre.0)
    }
}

impl Mul for &Fraction {
    type Output = Fraction;
    fn mul(self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 * &autre.0)
    }
}

impl Neg for &Fraction {
    type Output = Fraction;
    fn neg(self) -> Fraction {
        Fraction(-&self.0)
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Fraction::from_integer(n)
    }
}

impl From<BigRational> for Fraction {
    fn from(r: BigRational) -> Self {
        Fraction(r)
    }
}

/// "n" si entier, sinon "n/d" (forme réduite).
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.numer();
        let d = self.0.denom();
        if d.is_one() {
            write!(f, "{n}")
        } else {
            write!(f, "{n}/{d}")
        }
    }
}
