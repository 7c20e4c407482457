//! Couche UI : état (`etat`), rendu egui (`vue`) et branchement sur `eframe::App`.
//! Enter/Backspace sont gérés dans la vue, seulement quand le champ a le focus.

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement l’entrée (comme bouton "C").
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
