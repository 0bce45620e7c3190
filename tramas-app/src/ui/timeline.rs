use eframe::egui;
use tracing::warn;

use tramas_core::{event_matches, Section, TimelineEvent};

use crate::app::{TramasApp, TIMELINE_THUMB};
use crate::fetch_bridge::FetchSlot;
use crate::ui::highlighted_job;

impl TramasApp {
    pub(crate) fn draw_timeline(&mut self, ui: &mut egui::Ui, section: Section) {
        ui.add_space(12.0);
        ui.heading(format!("Linha do Tempo — {}", section.title()));
        ui.add_space(8.0);

        let events = match self.timelines.get(&section) {
            Some(FetchSlot::Ready(events)) => events.clone(),
            Some(FetchSlot::Failed(message)) => {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("Erro ao carregar timeline. Detalhe: {message}"),
                );
                return;
            }
            _ => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Carregando eventos…");
                });
                return;
            }
        };

        if events.is_empty() {
            ui.label(format!(
                "Nenhum evento encontrado para {}.",
                section.title()
            ));
            return;
        }

        let term = self.applied_search.clone();
        let search_active = !term.trim().is_empty();
        let matched: Vec<&TimelineEvent> = events
            .iter()
            .filter(|event| event_matches(event, &term))
            .collect();

        if matched.is_empty() {
            ui.label("Nenhum resultado encontrado para a busca.");
            return;
        }

        for (position, event) in matched.into_iter().enumerate() {
            self.draw_timeline_event(ui, event, &term, search_active, position);
            ui.add_space(4.0);
        }
    }

    fn draw_timeline_event(
        &mut self,
        ui: &mut egui::Ui,
        event: &TimelineEvent,
        term: &str,
        search_active: bool,
        position: usize,
    ) {
        // Seeded payloads may carry duplicate ids, so the position
        // disambiguates.
        let id = ui.make_persistent_id(("timeline_event", &event.section, event.id, position));
        let mut state =
            egui::collapsing_header::CollapsingState::load_with_default_open(ui.ctx(), id, false);
        // Applying a search expands the matches; clearing it collapses all.
        if self.search_pulse {
            state.set_open(search_active);
        }

        let heading = highlighted_job(ui, &event.heading(), term, 16.0, true);
        let (toggle, _header, _body) = state
            .show_header(ui, |ui| {
                ui.label(heading);
            })
            .body(|ui| self.draw_event_details(ui, event, term));

        if position == 0 && search_active && self.scroll_to_match {
            toggle.scroll_to_me(Some(egui::Align::Center));
            self.scroll_to_match = false;
        }
    }

    fn draw_event_details(&mut self, ui: &mut egui::Ui, event: &TimelineEvent, term: &str) {
        ui.label(egui::RichText::new("📜 Informação:").strong());
        let text = if event.text.is_empty() {
            "Nenhuma descrição disponível.".to_string()
        } else {
            event.text.clone()
        };
        ui.label(highlighted_job(ui, &text, term, 14.0, false));

        let items = event.viewer_items();
        if !items.is_empty() {
            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                for (index, item) in items.iter().enumerate() {
                    let Some(response) = self.asset_thumbnail(
                        ui,
                        &item.file_name,
                        egui::Vec2::splat(TIMELINE_THUMB),
                    ) else {
                        continue;
                    };
                    let response = response.on_hover_text(&item.file_name);
                    if response.clicked() {
                        if let Err(e) = self.viewer.open_scoped(items.clone(), index) {
                            warn!("could not open viewer: {e}");
                        }
                    }
                }
            });
        }

        if let Some(corroboration) = &event.corroboration {
            ui.add_space(6.0);
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(
                    egui::RichText::new("🔎 Corroboração do Evento:")
                        .strong()
                        .small(),
                );
                ui.label(egui::RichText::new(corroboration).small());
            });
        }
    }
}
