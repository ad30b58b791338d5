//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur doit être typée (jamais de panique), et d’un genre plausible
//! - invariants : mêmes entrées => mêmes sorties ; rendu LaTeX stable

use std::time::{Duration, Instant};

use super::analyse::parse_expr;
use super::erreur::GenreErreur;
use super::expr::Expr;
use super::jetons::tokenize;
use super::{parse, parse_and_calculate, parse_and_convert_to_latex, Options};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let a = rng.pick(10);
    match rng.pick(4) {
        0 => format!("{a}.{}", rng.pick(100)),
        1 => format!("{a}/{}", rng.pick(8)), // dénominateur 0 possible : voulu
        _ => format!("{a}"),
    }
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        _ => "phi".to_string(),
    }
}

const FONCTIONS: [&str; 9] = [
    "exp", "sqrt", "sin", "cos", "tan", "ln", "log2", "log", "log10",
];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    let g = |rng: &mut Rng| gen_expr(rng, depth - 1);
    match rng.pick(11) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", g(rng), g(rng)),
        2 => format!("({}-{})", g(rng), g(rng)),
        3 => format!("({}*{})", g(rng), g(rng)),
        4 => format!("({}/{})", g(rng), g(rng)),
        // exposant petit : pas de gel
        5 => format!("({})^{}", g(rng), rng.pick(4)),
        6 => format!("-{}", g(rng)),
        7 => format!("{}({})", rng.pick(5), g(rng)), // multiplication implicite
        8 => format!("({})!", rng.pick(8)),
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", g(rng))
        }
    }
}

/// Bruit : caractères pris au hasard dans l’alphabet du langage (et un peu au-delà).
fn gen_bruit(rng: &mut Rng, n: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '9', '.', '+', '-', '*', '/', '^', '!', '(', ')', ',', '%', '=', 'p', 'i', 'e',
        'x', ' ', 'c', 'o', 's', 'π',
    ];
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/// L’arbre contient-il un “-x” tapé tel quel ? Seul lui peut produire “+ -” en LaTeX.
fn a_un_moins_unaire(e: &Expr) -> bool {
    match e {
        Expr::Const(_) | Expr::Var(_) => false,
        Expr::Neg { seule: true, .. } => true,
        Expr::Neg { x, .. } | Expr::Fact(x) => a_un_moins_unaire(x),
        Expr::Appel { argument, .. } => a_un_moins_unaire(argument),
        Expr::Add(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) | Expr::Pow(a, b) => {
            a_un_moins_unaire(a) || a_un_moins_unaire(b)
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_erreurs_typees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let a = parse(&expr);
        let b = parse(&expr);

        match (a, b) {
            (Ok(ra), Ok(rb)) => {
                assert_eq!(ra.to_string(), rb.to_string(), "expr={expr:?}");
                assert_eq!(ra.to_latex(), rb.to_latex(), "expr={expr:?}");
                seen_ok += 1;
            }
            (Err(ea), Err(eb)) => {
                assert_eq!(ea, eb, "expr={expr:?}");
                // l’arbre généré est bien formé : seules des erreurs de calcul sont possibles
                assert!(
                    matches!(
                        ea.genre(),
                        GenreErreur::OperationIllegale
                            | GenreErreur::OperationNonSupportee
                            | GenreErreur::Domaine
                            | GenreErreur::Debordement
                    ),
                    "erreur non attendue: expr={expr:?} err={ea}"
                );
                seen_err += 1;
            }
            _ => panic!("non déterministe: expr={expr:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_latex_toujours_disponible() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // Le rendu ne calcule rien : un arbre bien formé se rend toujours,
    // même s’il divise par zéro ou sort d’un domaine.
    let mut rng = Rng::new(0xBADC0DE_u64);
    let o = Options::default();

    for _ in 0..120 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let l1 = parse_and_convert_to_latex(&expr, &o)
            .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        let l2 = parse_and_convert_to_latex(&expr, &o).unwrap();
        assert_eq!(l1, l2);
        assert!(!l1.is_empty());

        // soustraction : le rendu ne fabrique jamais “+ -” tout seul
        let arbre = parse_expr(&tokenize(&expr).unwrap()).unwrap();
        if !a_un_moins_unaire(&arbre) {
            assert!(!l1.contains("+ -"), "expr={expr:?} latex={l1}");
        }
    }
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0x5EED_u64);
    let o = Options {
        decimal: true,
        precision: 10,
    };

    for _ in 0..400 {
        budget(t0, max);

        let n = 1 + rng.pick(24) as usize;
        let s = gen_bruit(&mut rng, n);

        // seule exigence : un Result, jamais une panique
        let _ = parse(&s);
        let _ = parse_and_calculate(&s, &o);
        let _ = parse_and_convert_to_latex(&s, &o);
    }
}

#[test]
fn fuzz_safe_exactitude_coherente() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xFACADE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let a = rng.pick(1000) as i64 - 500;
        let b = 1 + rng.pick(64) as i64;
        let p = rng.pick(12) as usize;
        let expr = format!("{a}/{b}");

        let r = parse(&expr).unwrap();
        let exacte = r.is_exact(p);
        let lecture = r.approx(p);

        // une lecture exacte se relit à l’identique
        if exacte {
            let relu = parse(&lecture).unwrap_or_else(|e| panic!("lecture={lecture:?} err={e}"));
            assert_eq!(relu.fraction(), r.fraction(), "expr={expr:?} p={p}");
        } else {
            assert!(!r.fraction().is_integer());
        }
    }
}

#[test]
fn fuzz_safe_signes_multiples() {
    let mut rng = Rng::new(0xABCDEF_u64);

    for _ in 0..60 {
        let n = rng.pick(12) as usize;
        let signes: String = (0..n).map(|_| if rng.coin() { '-' } else { '+' }).collect();
        let moins = signes.chars().filter(|&c| c == '-').count();
        let attendu = if moins % 2 == 0 { "3" } else { "-3" };

        // "+-+-3" : chaque signe est un unaire
        let expr = format!("{signes}3");
        let calcule = parse_and_calculate(&expr, &Options::default())
            .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert_eq!(calcule, attendu, "expr={expr:?}");
    }
}
