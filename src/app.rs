// src/app.rs
//
// Application eframe : état (etat.rs) + dessin (vue.rs).
// Raccourcis globaux : Échap vide l’entrée, F2 fait tourner le mode.

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

use etat::Mode;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (echap, f2) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::F2),
            )
        });
        if echap {
            self.effacer_entree();
        }
        if f2 {
            let suivant = match self.mode {
                Mode::Exact => Mode::Decimal,
                Mode::Decimal => Mode::Latex,
                Mode::Latex => Mode::Exact,
            };
            self.set_mode(suivant);
        }

        egui::CentralPanel::default().show(ctx, |ui| self.ui(ui));
    }
}
