// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue, Backspace efface (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Plusieurs équations séparées par ';', une ligne de résultat chacune
// - Éditeur de variables (nom / valeur)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use calculatrice_rpn::noyau::{evaluer_lot, Calculateur};

use super::etat::{AppCalc, LigneResultat};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice RPN");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_variables(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Équations (séparées par ';') :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: x*2; sin(pi/2); (1+2)*3")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        // TextEdit gère déjà Backspace caractère par caractère ;
        // ici on retire les motifs complets ("sin(", "pi", ...).
        let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));
        if resp.has_focus() && backspace {
            self.backspace_entree();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "CLR", "Efface résultats + erreur", Action::ClearResultats);
            self.bouton_action(
                ui,
                "AC",
                "Remise à zéro totale (variables comprises)",
                Action::ResetTotal,
            );
        });

        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "pi", "pi", InsertKind::Word);
            self.bouton_insert(ui, "e", "e", InsertKind::Word);
            self.bouton_insert(ui, "x", "x", InsertKind::Word);

            ui.separator();

            self.bouton_insert(ui, "sqrt", "sqrt(", InsertKind::Func);
            self.bouton_insert(ui, "sin", "sin(", InsertKind::Func);
            self.bouton_insert(ui, "cos", "cos(", InsertKind::Func);
            self.bouton_insert(ui, "abs", "abs(", InsertKind::Func);
            self.bouton_insert(ui, "log", "log(", InsertKind::Func);
            self.bouton_insert(ui, "ln", "ln(", InsertKind::Func);

            ui.separator();

            self.bouton_insert(ui, ";", ";", InsertKind::Separateur);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_rpn")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "*", "*", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.label("");
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                ui.end_row();
            });
    }

    fn ui_variables(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Variables")
            .default_open(true)
            .show(ui, |ui| {
                let mut a_retirer = None;

                egui::Grid::new("grille_variables")
                    .num_columns(3)
                    .spacing([6.0, 4.0])
                    .show(ui, |ui| {
                        for (i, v) in self.variables.iter_mut().enumerate() {
                            ui.push_id(i, |ui| {
                                ui.add(
                                    egui::TextEdit::singleline(&mut v.nom)
                                        .desired_width(80.0)
                                        .hint_text("nom")
                                        .code_editor(),
                                );
                            });
                            ui.push_id(("valeur", i), |ui| {
                                ui.add(
                                    egui::TextEdit::singleline(&mut v.valeur)
                                        .desired_width(140.0)
                                        .hint_text("valeur")
                                        .code_editor(),
                                );
                            });
                            if ui
                                .add_sized([28.0, 22.0], egui::Button::new("🗑"))
                                .on_hover_text("Retirer la variable")
                                .clicked()
                            {
                                a_retirer = Some(i);
                            }
                            ui.end_row();
                        }
                    });

                if let Some(i) = a_retirer {
                    self.retirer_variable(i);
                }

                if ui.button("+ variable").clicked() && !self.ajouter_variable() {
                    self.set_erreur("trop de variables");
                }
            });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultats :");

        if self.resultats.is_empty() {
            ui.monospace("—");
            return;
        }

        for (i, ligne) in self.resultats.iter().enumerate() {
            ui.push_id(("resultat", i), |ui| Self::carte_resultat(ui, ligne));
            ui.add_space(4.0);
        }
    }

    /// Une équation : RPN, arbre, valeur ou erreur.
    fn carte_resultat(ui: &mut egui::Ui, ligne: &LigneResultat) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.monospace(&ligne.equation);

                egui::Grid::new("details")
                    .num_columns(2)
                    .spacing([8.0, 2.0])
                    .show(ui, |ui| {
                        ui.label("RPN :");
                        ui.monospace(&ligne.postfix);
                        ui.end_row();

                        ui.label("Arbre :");
                        ui.monospace(&ligne.arbre);
                        ui.end_row();

                        ui.label("Valeur :");
                        match &ligne.valeur {
                            Ok(v) => {
                                ui.monospace(v.to_string());
                            }
                            Err(msg) => {
                                ui.colored_label(ui.visuals().error_fg_color, msg);
                            }
                        }
                        ui.end_row();
                    });
            });
    }

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sin(", "pi", etc.).
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        for pat in ["sqrt(", "sin(", "cos(", "abs(", "log(", "ln(", "pi"] {
            if self.entree.ends_with(pat) {
                for _ in 0..pat.chars().count() {
                    self.entree.pop();
                }
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                return;
            }
        }

        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen | InsertKind::Func => {
                let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                if let Some(c) = last {
                    if c.is_ascii_digit() || c.is_ascii_alphabetic() || c == ')' {
                        self.entree.push(' ');
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Separateur => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                self.entree.push_str(to_insert);
            }
            InsertKind::Word => {
                // espace si juste avant c’est un chiffre, une lettre ou ')'
                if !self.entree.ends_with(char::is_whitespace) {
                    if let Some(c) = self.entree.chars().last() {
                        if c.is_ascii_alphanumeric() || c == ')' {
                            self.entree.push(' ');
                        }
                    }
                }
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Évalue toutes les équations de l’entrée, puis dépose les lignes dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let entree = self.entree.trim().to_string();
        if entree.is_empty() {
            self.set_erreur("entrée vide");
            return;
        }

        let vars = match self.variables_liees() {
            Ok(v) => v,
            Err(msg) => {
                self.set_erreur(msg);
                return;
            }
        };

        let calc = match Calculateur::new(vars) {
            Ok(c) => c,
            Err(e) => {
                self.set_erreur(format!("variables : {e}"));
                return;
            }
        };

        let lignes = evaluer_lot(&calc, &entree);
        if lignes.is_empty() {
            self.set_erreur("entrée vide");
        } else {
            self.set_resultats(lignes);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
    Separateur,
}
