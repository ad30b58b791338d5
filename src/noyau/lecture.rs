// src/noyau/lecture.rs
//
// Lecture décimale d’une Fraction :
// - approx(precision)  : décimal tronqué (vers zéro), zéros finaux retirés
// - can_be_represented_exactly(precision) : le développement décimal s’arrête-t-il
//   avant `precision` chiffres ? (division posée, reste par reste)

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::fraction::Fraction;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }
    // -0.00 n’existe pas : le signe ne survit pas à une troncature nulle
    let signe = if neg && !scaled.is_zero() { "-" } else { "" };

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// r -> entier “scalé” = trunc(r * 10^digits)
fn rational_scaled(r: &Fraction, digits: usize) -> BigInt {
    let scale = pow10(digits);
    (r.numer() * scale) / r.denom()
}

/// "0.2500" -> "0.25" ; "3.000" -> "3"
fn retire_zeros_finaux(mut s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

impl Fraction {
    /// Lecture décimale tronquée à `precision` chiffres après la virgule.
    /// Un entier s’écrit tel quel, quelle que soit la précision.
    pub fn approx(&self, precision: usize) -> String {
        if self.is_integer() {
            return self.numer().to_string();
        }
        let scaled = rational_scaled(self, precision);
        retire_zeros_finaux(scaled_to_decimal(scaled, precision))
    }

    /// Vrai si le développement décimal se termine en au plus `precision` chiffres.
    ///
    /// On pose la division : reste <- (reste * 10) mod dénominateur, au plus
    /// `precision` fois ; exact ssi le reste tombe à zéro.
    pub fn can_be_represented_exactly(&self, precision: usize) -> bool {
        if self.is_integer() {
            return true;
        }
        if precision == 0 {
            return false;
        }

        let denom = self.denom();
        let dix = BigInt::from(10);
        // le signe ne change rien à la terminaison : on travaille sur |n|
        let mut reste = self.numer().abs() % denom;

        for _ in 0..precision {
            if reste.is_zero() {
                break;
            }
            reste = (reste * &dix) % denom;
        }

        reste.is_zero()
    }
}
