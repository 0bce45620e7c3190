mod gallery;
mod intro;
mod menu_bar;
mod timeline;
mod viewer;

use eframe::egui;

use tramas_core::highlight_ranges;

use crate::app::TramasApp;

impl TramasApp {
    /// Draw a clickable thumbnail for an asset, or a placeholder while it
    /// loads. Returns `None` when nothing clickable was shown, including for
    /// broken assets, which stay hidden.
    pub(crate) fn asset_thumbnail(
        &mut self,
        ui: &mut egui::Ui,
        file_name: &str,
        size: egui::Vec2,
    ) -> Option<egui::Response> {
        let name = file_name.trim();
        if name.is_empty() || self.assets.is_failed(name) {
            return None;
        }
        if let Some(texture) = self.assets.texture(name).cloned() {
            let image = egui::Image::new(&texture).fit_to_exact_size(size);
            return Some(ui.add(egui::ImageButton::new(image)));
        }
        self.ensure_asset(name);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        ui.put(rect, egui::Spinner::new());
        None
    }
}

/// Layout a text run with every occurrence of `term` highlighted.
///
/// With an empty term this is just a plain label job.
pub(crate) fn highlighted_job(
    ui: &egui::Ui,
    text: &str,
    term: &str,
    size: f32,
    strong: bool,
) -> egui::text::LayoutJob {
    let color = if strong {
        ui.visuals().strong_text_color()
    } else {
        ui.visuals().text_color()
    };
    let font = egui::FontId::proportional(size);
    let plain = egui::TextFormat {
        font_id: font.clone(),
        color,
        ..Default::default()
    };
    let highlight = egui::TextFormat {
        font_id: font,
        color: egui::Color32::BLACK,
        background: egui::Color32::from_rgb(0xfd, 0xe0, 0x47),
        ..Default::default()
    };

    let mut job = egui::text::LayoutJob::default();
    let mut cursor = 0;
    for (start, end) in highlight_ranges(text, term) {
        if start > cursor {
            job.append(&text[cursor..start], 0.0, plain.clone());
        }
        job.append(&text[start..end], 0.0, highlight.clone());
        cursor = end;
    }
    if cursor < text.len() {
        job.append(&text[cursor..], 0.0, plain);
    }
    job
}
