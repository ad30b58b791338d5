//! Tests scientifiques (campagne) : priorités + exactitude + domaines + limites contrôlées.
//!
//! But : verrouiller le comportement observable du pipeline public.
//! - scénarios de priorité (y compris les choix non usuels : '^' à gauche, '(' implicite)
//! - rendu LaTeX (parenthèses, signes)
//! - rejets typés (domaine, division par zéro, débordements)
//! - stress borné (budget temps global)

use std::time::{Duration, Instant};

use super::erreur::{Erreur, GenreErreur};
use super::{parse, parse_and_calculate, parse_and_convert_to_latex, Options};

fn calc(expr: &str) -> String {
    parse_and_calculate(expr, &Options::default())
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn decimal(expr: &str, precision: usize) -> String {
    let o = Options {
        decimal: true,
        precision,
    };
    parse_and_calculate(expr, &o).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn latex(expr: &str) -> String {
    parse_and_convert_to_latex(expr, &Options::default())
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn genre(expr: &str) -> GenreErreur {
    match parse(expr) {
        Ok(r) => panic!("expr={expr:?} aurait dû échouer, valeur {r}"),
        Err(e) => e.genre(),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Priorités / associativité ------------------------ */

#[test]
fn sci_operations_de_base() {
    assert_eq!(calc("1+2"), "3");
    assert_eq!(calc("1-2"), "-1");
    assert_eq!(calc("2*3"), "6");
    assert_eq!(calc("2/3"), "2/3");
    assert_eq!(calc("3 - 2 - 1"), "0");
    assert_eq!(calc("12/4/3"), "1");
}

#[test]
fn sci_multiplication_implicite() {
    assert_eq!(calc("2*(1+2)^2"), "18");
    assert_eq!(calc("2(3+2)^2"), "50");
    assert_eq!(calc("6/2(1+2)"), "9");
    assert_eq!(calc("2cos(0)"), "2");
    assert_eq!(calc("6/2cos(0)"), "3");
    assert_eq!(calc("(1+1)(2+2)"), "8");
}

#[test]
fn sci_moins_unaire_et_puissance() {
    assert_eq!(calc("-3^2"), "-9");
    assert_eq!(calc("(-3)^2"), "9");
    assert_eq!(calc("2^-1"), "1/2");
    assert_eq!(calc("1 - -1"), "2");
    assert_eq!(calc("+5"), "5");
}

#[test]
fn sci_puissance_associative_a_gauche() {
    // (3^2)^3 et non 3^(2^3) = 6561
    assert_eq!(calc("3^2^3"), "729");
    assert_eq!(calc("2^3^2"), "64");
}

#[test]
fn sci_factorielle() {
    assert_eq!(calc("3!"), "6");
    assert_eq!(calc("0!"), "1");
    assert_eq!(calc("3^2!"), "362880");
    assert_eq!(calc("20!"), "2432902008176640000");
    assert_eq!(calc("2*3!"), "12");
}

/* ------------------------ Lectures décimales / exactitude ------------------------ */

#[test]
fn sci_lecture_decimale() {
    assert_eq!(decimal("1/10", 1), "0.1");
    assert_eq!(decimal("1/10", 5), "0.1");
    assert_eq!(decimal("2/3", 4), "0.6666");
    assert_eq!(decimal("-2/3", 2), "-0.66");
    assert_eq!(decimal("7", 3), "7");
    assert_eq!(decimal("1.25", 6), "1.25");
}

#[test]
fn sci_exactitude() {
    let r = parse("1/16").unwrap();
    assert!(r.is_exact(4));
    assert!(r.is_exact(10));
    assert!(!r.is_exact(3));

    let r = parse("5").unwrap();
    assert!(r.is_exact(0));

    let r = parse("1/3").unwrap();
    assert!(!r.is_exact(100));
}

#[test]
fn sci_aller_retour_entiers() {
    let big = "123456789012345678901234567890123456789";
    for n in ["0", "1", "7", "42", "-5", "1000000", big] {
        assert_eq!(parse(n).unwrap().to_string(), n, "n={n}");
    }
    for n in -50_i64..=50 {
        assert_eq!(parse(&n.to_string()).unwrap().to_string(), n.to_string());
    }
}

#[test]
fn sci_litteraux_decimaux_exacts() {
    // aucun flottant binaire : 0.1 + 0.2 = 3/10 exactement
    assert_eq!(calc("0.1+0.2"), "3/10");
    assert_eq!(calc("1.5*2"), "3");
    assert_eq!(calc(".5"), "1/2");
}

/* ------------------------ Constantes / fonctions ------------------------ */

#[test]
fn sci_fonctions_valeurs_simples() {
    assert_eq!(calc("cos(0)"), "1");
    assert_eq!(calc("exp(0)"), "1");
    assert_eq!(calc("ln(1)"), "0");
    assert_eq!(calc("sqrt(16)"), "4");
    assert_eq!(calc("log2(8)"), "3");
    assert_eq!(decimal("pi", 4), "3.1415");
    assert_eq!(decimal("2pi", 3), "6.283");
    assert_eq!(decimal("e", 3), "2.718");
}

/* ------------------------ Rendu LaTeX ------------------------ */

#[test]
fn sci_latex_scenarios() {
    assert_eq!(latex("(1+2)/3"), "\\frac{1 + 2}{3}");
    assert_eq!(latex("cos(2*pi)"), "\\cos\\left(2 \\times \\pi\\right)");
    assert_eq!(latex("e^5"), "e^5");
    assert_eq!(latex("5(1+2)^5"), "5 \\times \\left(1 + 2\\right)^5");
}

#[test]
fn sci_latex_signes() {
    assert_eq!(latex("1-2"), "1 - 2");
    assert_eq!(latex("1-(2+3)"), "1 - \\left(2 + 3\\right)");
    assert_eq!(latex("1-2*3"), "1 - \\left(2 \\times 3\\right)");
    assert_eq!(latex("1-(1+2)/3"), "1 - \\left(\\frac{1 + 2}{3}\\right)");
    assert_eq!(latex("1-2pi"), "1 - \\left(2 \\times \\pi\\right)");
    assert_eq!(latex("-(1+2)"), "-\\left(1 + 2\\right)");
    assert_eq!(latex("-3^2"), "-3^2");
}

#[test]
fn sci_latex_divers() {
    assert_eq!(latex("2^(1+2)"), "2^{1 + 2}");
    assert_eq!(latex("2^10"), "2^{10}");
    assert_eq!(latex("3^2^3"), "\\left(3^2\\right)^3");
    assert_eq!(latex("sqrt(2)"), "\\sqrt{2}");
    assert_eq!(latex("log10(100)"), "\\log_{10}\\left(100\\right)");
    assert_eq!(latex("1.5"), "\\frac{3}{2}");
    assert_eq!(latex("2pi"), "2 \\times \\pi");
    assert_eq!(latex("phi"), "\\phi");
    assert_eq!(latex("3!"), "3!");
}

/* ------------------------ Rejets typés ------------------------ */

#[test]
fn sci_rejets_domaine() {
    assert_eq!(genre("tan(pi/2)"), GenreErreur::Domaine);
    assert_eq!(genre("tan(3pi/2)"), GenreErreur::Domaine);
    assert_eq!(genre("tan(-pi/2)"), GenreErreur::Domaine);
    assert_eq!(genre("ln(-1)"), GenreErreur::Domaine);
    assert_eq!(genre("ln(0)"), GenreErreur::Domaine);
    assert_eq!(genre("sqrt(-1)"), GenreErreur::Domaine);
    assert_eq!(genre("(-1)!"), GenreErreur::Domaine);
    assert_eq!(genre("0.5!"), GenreErreur::Domaine);

    // tan reste défini ailleurs
    assert_eq!(calc("tan(0)"), "0");
    assert!(parse("tan(pi)").is_ok());
}

#[test]
fn sci_rejets_arithmetiques() {
    assert_eq!(genre("1/0"), GenreErreur::OperationIllegale);
    assert_eq!(genre("1/(2-2)"), GenreErreur::OperationIllegale);
    assert_eq!(genre("0^-1"), GenreErreur::OperationIllegale);
    assert_eq!(genre("2^0.5"), GenreErreur::OperationNonSupportee);
    assert_eq!(genre("21!"), GenreErreur::Debordement);
    assert_eq!(genre("2^100001"), GenreErreur::Debordement);
}

#[test]
fn sci_rejets_syntaxe() {
    assert_eq!(genre("1 +2"), GenreErreur::Lexique);
    assert_eq!(genre("(1+2"), GenreErreur::Syntaxe);
    assert_eq!(genre("1+"), GenreErreur::Syntaxe);
    assert_eq!(genre("1)"), GenreErreur::Syntaxe);
    assert_eq!(genre("cos"), GenreErreur::Syntaxe);
    assert_eq!(genre(""), GenreErreur::Syntaxe);
    assert_eq!(genre("foo"), GenreErreur::IdentifiantInconnu);
    assert_eq!(genre("2x"), GenreErreur::IdentifiantInconnu);

    assert_eq!(
        parse("ln(-1)").unwrap_err(),
        Erreur::HorsDomaine {
            valeur: "-1".into(),
            espace: "] 0 ; +inf [".into()
        }
    );
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn sci_idempotence() {
    for expr in ["(1+2)/3", "cos(2*pi)", "5(1+2)^5", "1-2*3!", "sqrt(2)^2"] {
        let r = parse(expr).unwrap();
        assert_eq!(r.to_latex().unwrap(), r.to_latex().unwrap(), "expr={expr:?}");
        assert_eq!(r.expr().eval().unwrap(), r.expr().eval().unwrap());
        assert_eq!(&r.expr().eval().unwrap(), r.fraction());
        assert_eq!(r.to_string(), parse(expr).unwrap().to_string());
    }
}

/* ------------------------ Concurrence (registre partagé) ------------------------ */

#[test]
fn sci_appels_concurrents() {
    std::thread::scope(|s| {
        let fils: Vec<_> = (0..4)
            .map(|k| s.spawn(move || parse(&format!("{k}*pi + tan(1) - ln({k}+1)")).map(|r| r.to_string())))
            .collect();
        for f in fils {
            assert!(f.join().unwrap().is_ok());
        }
    });
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = vec!["1/2"; 80].join(" + ");
    budget(t0, max);

    // 80*(1/2)=40
    assert_eq!(calc(&expr), "40");
    budget(t0, max);
}

#[test]
fn sci_stress_bigint_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 99…9 (100 chiffres) / 7 + 1/7 = 10^100 / 7
    let big = "9".repeat(100);
    let expr = format!("{big}/7 + 1/7");
    let attendu = format!("1{}/7", "0".repeat(100));
    assert_eq!(calc(&expr), attendu);

    assert_eq!(calc("2^1000").len(), 302);
    budget(t0, max);
}

#[test]
fn sci_stress_puissances_en_chaine_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // '^' à gauche : chaque exposant est petit, mais le résultat explose
    assert_eq!(genre("2^100000^100000"), GenreErreur::Debordement);
    assert_eq!(genre("2^100000^300"), GenreErreur::Debordement);
    assert_eq!(genre("(1/3)^100000^100"), GenreErreur::Debordement);
    budget(t0, max);
}

#[test]
fn sci_stress_imbrication_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = format!("{}1{}", "(".repeat(60), ")".repeat(60));
    assert_eq!(calc(&expr), "1");

    let trop = format!("{}1{}", "(".repeat(400), ")".repeat(400));
    assert_eq!(genre(&trop), GenreErreur::Syntaxe);
    budget(t0, max);
}
