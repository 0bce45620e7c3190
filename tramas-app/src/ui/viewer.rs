use eframe::egui;
use egui_material_icons::icons::{
    ICON_ARROW_BACK, ICON_ARROW_FORWARD, ICON_CLOSE, ICON_OPEN_IN_NEW, ICON_RESTART_ALT,
    ICON_ZOOM_IN, ICON_ZOOM_OUT,
};

use tramas_core::{CursorHint, Offset, ViewerItem, ZoomDirection};

use crate::app::TramasApp;

/// Vertical space reserved below the image for controls and the caption.
const FOOTER_HEIGHT: f32 = 130.0;

impl TramasApp {
    /// Draw the image viewer overlay on top of everything else.
    pub(crate) fn draw_viewer_overlay(&mut self, ctx: &egui::Context) {
        if !self.viewer.is_visible() {
            return;
        }
        let alpha = self.viewer.overlay_alpha();
        let screen = ctx.screen_rect();

        egui::Area::new(egui::Id::new("image_viewer"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                // Dim the page behind and absorb its pointer input.
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter().rect_filled(
                    screen,
                    0.0,
                    egui::Color32::from_black_alpha((180.0 * alpha) as u8),
                );

                let scale = self.viewer.content_scale();
                let content =
                    egui::Rect::from_center_size(screen.center(), screen.size() * 0.92 * scale);
                ui.painter().rect_filled(
                    content,
                    8.0,
                    ui.visuals().panel_fill.gamma_multiply(alpha),
                );

                let mut content_ui = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(content.shrink(12.0))
                        .layout(egui::Layout::top_down(egui::Align::Min)),
                );
                self.draw_viewer_content(&mut content_ui, ctx, alpha);

                // A click on the dimmed backdrop outside the content closes.
                if backdrop.clicked() {
                    let outside = backdrop
                        .interact_pointer_pos()
                        .map(|pos| !content.contains(pos))
                        .unwrap_or(false);
                    if outside {
                        self.viewer.close();
                    }
                }
            });
    }

    fn draw_viewer_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, alpha: f32) {
        let Some(item) = self.viewer.current_item().cloned() else {
            return;
        };

        ui.horizontal(|ui| {
            ui.strong(format!("Visualizar: {}", item.file_name));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(ICON_CLOSE).on_hover_text("Fechar").clicked() {
                    self.viewer.close();
                }
            });
        });
        ui.separator();

        let avail = ui.available_size();
        let region = egui::Vec2::new(avail.x, (avail.y - FOOTER_HEIGHT).max(60.0));
        let (rect, response) = ui.allocate_exact_size(region, egui::Sense::click_and_drag());
        self.draw_viewer_image(ui, ctx, &item, rect, &response, alpha);

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    self.viewer.can_go_prev(),
                    egui::Button::new(ICON_ARROW_BACK),
                )
                .on_hover_text("Imagem anterior")
                .clicked()
            {
                self.viewer.navigate(-1);
            }
            if ui
                .button(ICON_ZOOM_OUT)
                .on_hover_text("Diminuir zoom")
                .clicked()
            {
                self.viewer.zoom(ZoomDirection::Out);
            }
            if ui
                .button(ICON_RESTART_ALT)
                .on_hover_text("Restaurar zoom")
                .clicked()
            {
                self.viewer.reset_view();
            }
            if ui
                .button(ICON_ZOOM_IN)
                .on_hover_text("Aumentar zoom")
                .clicked()
            {
                self.viewer.zoom(ZoomDirection::In);
            }
            if ui
                .button(ICON_OPEN_IN_NEW)
                .on_hover_text("Abrir no navegador")
                .clicked()
            {
                ctx.open_url(egui::OpenUrl::new_tab(self.asset_url(&item.file_name)));
            }
            if ui
                .add_enabled(
                    self.viewer.can_go_next(),
                    egui::Button::new(ICON_ARROW_FORWARD),
                )
                .on_hover_text("Próxima imagem")
                .clicked()
            {
                self.viewer.navigate(1);
            }
        });

        ui.add_space(4.0);
        ui.label(item.caption());
        if let Some(corroboration) = &item.corroboration {
            egui::ScrollArea::vertical()
                .max_height(48.0)
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("Corroboração: {corroboration}")).small(),
                    );
                });
        }
    }

    fn draw_viewer_image(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        item: &ViewerItem,
        rect: egui::Rect,
        response: &egui::Response,
        alpha: f32,
    ) {
        let name = item.file_name.trim();
        // A broken asset stays hidden; navigation keeps working.
        if self.assets.is_failed(name) {
            return;
        }
        let Some(texture) = self.assets.texture(name).cloned() else {
            self.ensure_asset(name);
            ui.put(rect, egui::Spinner::new());
            return;
        };

        // Fit into the region preserving aspect ratio, then apply zoom/pan.
        let tex_size = texture.size_vec2();
        let fit = (rect.width() / tex_size.x)
            .min(rect.height() / tex_size.y)
            .min(1.0);
        let size = tex_size * fit * self.viewer.zoom_level();
        let pan = self.viewer.pan_offset();
        let center = rect.center() + egui::vec2(pan.x, pan.y);
        let image_rect = egui::Rect::from_center_size(center, size);

        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        let tint = egui::Color32::WHITE.gamma_multiply(alpha * self.viewer.image_alpha());
        ui.painter()
            .with_clip_rect(rect)
            .image(texture.id(), image_rect, uv, tint);

        // Dragging pans (mouse and touch both arrive as pointer events);
        // the wheel zooms.
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.viewer.begin_pan(Offset::new(pos.x, pos.y));
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.viewer.move_pan(Offset::new(pos.x, pos.y));
            }
        }
        if response.drag_stopped() {
            self.viewer.end_pan();
        }

        if response.hovered() {
            let scroll = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll > 0.0 {
                self.viewer.zoom(ZoomDirection::In);
            } else if scroll < 0.0 {
                self.viewer.zoom(ZoomDirection::Out);
            }

            let cursor = match self.viewer.cursor() {
                CursorHint::ZoomIn => egui::CursorIcon::ZoomIn,
                CursorHint::Grab => egui::CursorIcon::Grab,
                CursorHint::Grabbing => egui::CursorIcon::Grabbing,
            };
            ctx.set_cursor_icon(cursor);
        }
    }
}
