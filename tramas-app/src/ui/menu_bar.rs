use eframe::egui;
use egui_material_icons::icons::{ICON_CLOSE, ICON_DARK_MODE, ICON_LIGHT_MODE, ICON_SEARCH};

use crate::app::TramasApp;
use crate::app_state::AppScreen;

impl TramasApp {
    /// Draw the sticky top bar: section navigation, search controls, and the
    /// theme toggle. Must be called before `CentralPanel`.
    pub(crate) fn draw_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Tramas");
                ui.separator();

                for screen in AppScreen::ALL {
                    if ui
                        .selectable_label(self.screen == screen, screen.label())
                        .clicked()
                    {
                        self.set_screen(screen);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let dark = self.dark_mode(ui.ctx());
                    let icon = if dark { ICON_LIGHT_MODE } else { ICON_DARK_MODE };
                    if ui
                        .button(icon)
                        .on_hover_text("Alternar tema claro/escuro")
                        .clicked()
                    {
                        self.toggle_theme(ui.ctx());
                    }

                    // The "Sobre" screen has nothing to search.
                    if self.screen != AppScreen::About {
                        self.draw_search_controls(ui);
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn draw_search_controls(&mut self, ui: &mut egui::Ui) {
        if !self.search_input.is_empty() || !self.applied_search.is_empty() {
            if ui.button(ICON_CLOSE).on_hover_text("Limpar busca").clicked() {
                self.clear_search();
            }
        }
        if ui.button(ICON_SEARCH).on_hover_text("Buscar").clicked() {
            self.apply_search();
        }
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.search_input)
                .hint_text("Buscar na pesquisa…")
                .desired_width(200.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.apply_search();
        }
    }
}
