// src/app/vue.rs
//
// Dessin egui (natif + web). Aucune logique de calcul : tout passe par etat.rs.
// - ligne d’entrée (Enter évalue)
// - mode Exact | Décimal | LaTeX, précision (mode décimal seulement)
// - pavé : chiffres, opérateurs, puis un bouton par nom du registre
// - sortie, valeur exacte, erreur, démarche (jetons + arbre)

use eframe::egui;

use calculatrice_exacte::registre;

use super::etat::{AppCalc, Mode, PRECISION_MAX};

const TOUCHE: [f32; 2] = [44.0, 30.0];

/// Pavé fixe, ligne par ligne.
const PAVE: [&[&str]; 4] = [
    &["7", "8", "9", "(", ")"],
    &["4", "5", "6", "*", "/"],
    &["1", "2", "3", "+", "-"],
    &["0", ".", "^", "!"],
];

impl AppCalc {
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice exacte");
                self.ui_entree(ui);
                self.ui_reglages(ui);
                ui.separator();
                self.ui_pave(ui);
                ui.separator();
                self.ui_sortie(ui);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .id_source("entree")
                .code_editor()
                .desired_width(ui.available_width())
                .hint_text("2(3+2)^2   6/2cos(0)   tan(pi/4)   3^2!"),
        );
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }
        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.evaluer();
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut mode = self.mode;
            for m in Mode::TOUS {
                ui.selectable_value(&mut mode, m, m.libelle());
            }
            self.set_mode(mode);

            ui.separator();

            let mut p = self.precision;
            ui.add_enabled(
                self.mode == Mode::Decimal,
                egui::DragValue::new(&mut p)
                    .range(0..=PRECISION_MAX)
                    .prefix("précision ")
                    .suffix(" chiffres"),
            );
            self.set_precision(p);
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave")
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for &t in ligne {
                        if ui.add_sized(TOUCHE, egui::Button::new(t)).clicked() {
                            self.inserer(t);
                        }
                    }
                    ui.end_row();
                }
            });

        // constantes et fonctions : directement depuis le registre
        ui.horizontal_wrapped(|ui| {
            let r = registre();
            for nom in r.noms() {
                let fonction = r.fonction(nom).is_some();
                let bouton = ui.add_sized(TOUCHE, egui::Button::new(nom));
                if bouton.clicked() {
                    if fonction {
                        self.inserer(&format!("{nom}("));
                    } else {
                        self.inserer(nom);
                    }
                }
            }
        });

        ui.horizontal(|ui| {
            if ui.button("DEL").on_hover_text("dernier symbole").clicked() {
                self.effacer_dernier();
            }
            if ui.button("C").on_hover_text("entrée seulement").clicked() {
                self.effacer_entree();
            }
            if ui.button("AC").on_hover_text("tout").clicked() {
                self.tout_effacer();
            }
            if ui.add_sized([72.0, 30.0], egui::Button::new("=")).clicked() {
                self.evaluer();
            }
        });
    }

    fn ui_sortie(&mut self, ui: &mut egui::Ui) {
        let titre = match (self.mode, self.lecture_exacte) {
            (Mode::Decimal, Some(true)) => "Décimal (exact)",
            (Mode::Decimal, _) => "Décimal (tronqué)",
            (m, _) => m.libelle(),
        };
        ui.label(titre);
        cadre(ui, "sortie", &self.sortie);

        // en mode décimal, la fraction reste visible
        if self.mode == Mode::Decimal {
            if let Some(exact) = &self.exact {
                ui.label("Exact");
                cadre(ui, "exact", exact);
            }
        }

        if let Some(e) = &self.erreur {
            ui.colored_label(ui.visuals().error_fg_color, e);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                ui.label("Jetons");
                cadre(ui, "jetons", &self.demarche.jetons);
                ui.label("Arbre");
                cadre(ui, "arbre", &self.demarche.arbre);
            });
    }
}

/// Texte monospace sélectionnable, dans un cadre.
fn cadre(ui: &mut egui::Ui, id: &str, texte: &str) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.push_id(id, |ui| {
                ui.set_min_width(ui.available_width());
                ui.add(egui::Label::new(egui::RichText::new(texte).monospace()).selectable(true));
            });
        });
}
