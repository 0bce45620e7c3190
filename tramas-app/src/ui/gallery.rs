use eframe::egui;
use egui_material_icons::icons::{ICON_CHEVRON_RIGHT, ICON_EXPAND_MORE};
use tracing::warn;

use tramas_core::{unique_tags, EmptyReason, ImageRecord, TopicBucket, ViewerItem};

use crate::app::{TramasApp, GALLERY_THUMB};
use crate::fetch_bridge::FetchSlot;

impl TramasApp {
    pub(crate) fn draw_gallery(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.heading("Galeria de Imagens da Pesquisa");
        ui.add_space(8.0);

        let master = match &self.gallery {
            FetchSlot::Ready(master) => master.clone(),
            FetchSlot::Failed(message) => {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("Erro ao carregar galeria: {message}"),
                );
                return;
            }
            FetchSlot::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Carregando galeria…");
                });
                return;
            }
        };

        self.draw_tag_filters(ui, &master);

        self.ensure_gallery_view();
        let Some(view) = self.gallery_view.clone() else {
            return;
        };

        if let Some(reason) = view.empty {
            match reason {
                EmptyReason::NoMatches => {
                    ui.label("Nenhuma imagem encontrada para os filtros aplicados.");
                }
                EmptyReason::EmptyCollection => {
                    ui.label("Nenhuma imagem na galeria ainda.");
                }
            }
            self.reset_expansion = false;
            return;
        }

        for bucket in &view.buckets {
            self.draw_topic_bucket(ui, bucket);
        }
        self.reset_expansion = false;
    }

    fn draw_tag_filters(&mut self, ui: &mut egui::Ui, master: &[ImageRecord]) {
        let tags = unique_tags(master);
        if tags.is_empty() {
            return;
        }

        ui.horizontal(|ui| {
            let chevron = if self.tag_row_open {
                ICON_EXPAND_MORE
            } else {
                ICON_CHEVRON_RIGHT
            };
            if ui.button(format!("{chevron} Filtrar por Tags")).clicked() {
                self.tag_row_open = !self.tag_row_open;
            }
            // Only meaningful while a filter is active.
            if !self.active_tags.is_empty() && ui.button("Limpar Filtros de Tags").clicked() {
                self.clear_tags();
            }
        });

        if self.tag_row_open {
            ui.horizontal_wrapped(|ui| {
                for tag in &tags {
                    let active = self.active_tags.contains(tag);
                    if ui.selectable_label(active, tag).clicked() {
                        self.toggle_tag(tag);
                    }
                }
            });
        }
        ui.add_space(8.0);
    }

    fn draw_topic_bucket(&mut self, ui: &mut egui::Ui, bucket: &TopicBucket) {
        let id = ui.make_persistent_id(("gallery_topic", bucket.label));
        let mut state =
            egui::collapsing_header::CollapsingState::load_with_default_open(ui.ctx(), id, bucket.start_expanded);
        // A recomputed view re-applies the expansion policy; afterwards each
        // bucket toggles independently.
        if self.reset_expansion {
            state.set_open(bucket.start_expanded);
        }

        state
            .show_header(ui, |ui| {
                ui.strong(format!("{} ({})", bucket.label, bucket.images.len()));
            })
            .body(|ui| self.draw_bucket_grid(ui, bucket));
        ui.add_space(6.0);
    }

    fn draw_bucket_grid(&mut self, ui: &mut egui::Ui, bucket: &TopicBucket) {
        ui.horizontal_wrapped(|ui| {
            for (index, record) in bucket.images.iter().enumerate() {
                self.draw_gallery_cell(ui, bucket, index, record);
            }
        });
    }

    fn draw_gallery_cell(
        &mut self,
        ui: &mut egui::Ui,
        bucket: &TopicBucket,
        index: usize,
        record: &ImageRecord,
    ) {
        ui.vertical(|ui| {
            ui.set_width(GALLERY_THUMB.x);
            if let Some(response) =
                self.asset_thumbnail(ui, record.trimmed_file_name(), GALLERY_THUMB)
            {
                let response = response.on_hover_text(record.display_name());
                if response.clicked() {
                    let items: Vec<ViewerItem> =
                        bucket.images.iter().map(ViewerItem::from).collect();
                    if let Err(e) = self.viewer.open_scoped(items, index) {
                        warn!("could not open viewer: {e}");
                    }
                }
            }
            ui.add(
                egui::Label::new(egui::RichText::new(record.display_name()).small()).truncate(),
            );
        });
    }
}
