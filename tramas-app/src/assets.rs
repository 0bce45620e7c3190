use std::collections::{HashMap, HashSet};

use eframe::egui;
use tracing::debug;

use crate::fetch_bridge::DecodedImage;

/// Texture cache for fetched image assets, keyed by file name.
///
/// A broken asset lands in `failed` and is simply not rendered again; it
/// never interrupts navigation or filtering.
#[derive(Default)]
pub(crate) struct AssetStore {
    textures: HashMap<String, egui::TextureHandle>,
    loading: HashSet<String>,
    failed: HashSet<String>,
}

impl AssetStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn texture(&self, file_name: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(file_name)
    }

    pub(crate) fn is_failed(&self, file_name: &str) -> bool {
        self.failed.contains(file_name)
    }

    /// Mark `file_name` as in flight. Returns `true` when the caller should
    /// actually issue a request, i.e. the asset is not already loaded,
    /// loading, or known broken.
    pub(crate) fn begin_loading(&mut self, file_name: &str) -> bool {
        if self.textures.contains_key(file_name)
            || self.failed.contains(file_name)
            || self.loading.contains(file_name)
        {
            return false;
        }
        self.loading.insert(file_name.to_string());
        true
    }

    pub(crate) fn insert(&mut self, ctx: &egui::Context, file_name: &str, decoded: DecodedImage) {
        self.loading.remove(file_name);
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [decoded.width, decoded.height],
            &decoded.rgba,
        );
        let handle = ctx.load_texture(file_name, image, egui::TextureOptions::LINEAR);
        debug!(
            asset = file_name,
            w = decoded.width,
            h = decoded.height,
            "asset texture loaded"
        );
        self.textures.insert(file_name.to_string(), handle);
    }

    pub(crate) fn mark_failed(&mut self, file_name: &str) {
        self.loading.remove(file_name);
        self.failed.insert(file_name.to_string());
    }
}
