// src/main.rs
//
// Lanceur de la calculatrice : fenêtre native ou <canvas> web.
//
//   calculatrice_exacte                 fenêtre vide
//   calculatrice_exacte "6/2(1+2)"      fenêtre déjà évaluée
//   RUST_LOG=debug calculatrice_exacte  traces jetons -> arbre -> valeur
//
// Web : la page doit fournir <canvas id="calculatrice"></canvas>.

#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

mod app;

use app::AppCalc;

const TITRE: &str = "Calculatrice exacte";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(niveau_traces())
        .with_target(false)
        .init();

    let entree = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    tracing::info!(entree = %entree, "démarrage");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(TITRE)
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([380.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        TITRE,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::avec_entree(entree)))),
    )
}

/// RUST_LOG=trace|debug|info|warn|error ; info sinon.
#[cfg(not(target_arch = "wasm32"))]
fn niveau_traces() -> tracing::Level {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(tracing::Level::INFO)
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlCanvasElement;

    use super::{AppCalc, TITRE};

    const CANVAS: &str = "calculatrice";

    #[wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("pas de document"))?;
        document.set_title(TITRE);

        let canvas = document
            .get_element_by_id(CANVAS)
            .ok_or_else(|| JsValue::from_str(&format!("canvas #{CANVAS} introuvable")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{CANVAS} n’est pas un <canvas>")))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }
}
