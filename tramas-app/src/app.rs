use std::collections::{BTreeSet, HashMap};
use std::sync::mpsc;
use std::sync::Arc;

use eframe::egui;
use tracing::info;

use tramas_core::{
    compute_view, GalleryView, ImageRecord, Section, TimelineEvent, ViewerSession,
};
use tramas_data::client::ASSET_PATH;
use tramas_data::ArchiveClient;

use crate::app_state::AppScreen;
use crate::assets::AssetStore;
use crate::fetch_bridge::{spawn_fetch_worker, FetchRequest, FetchResponse, FetchSlot};
use crate::preferences::{AppPreferences, ThemeChoice};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Side length of timeline event thumbnails.
pub(crate) const TIMELINE_THUMB: f32 = 64.0;
/// Gallery grid cell image size.
pub(crate) const GALLERY_THUMB: egui::Vec2 = egui::Vec2::new(150.0, 110.0);
/// Cap on per-frame animation steps so a stalled frame cannot jump states.
const MAX_FRAME_DT: f32 = 0.1;

// ---------------------------------------------------------------------------
// Application struct
// ---------------------------------------------------------------------------

pub(crate) struct TramasApp {
    // Screen state
    pub(crate) screen: AppScreen,
    pub(crate) preferences: AppPreferences,

    // Fetched collections, one slot per container
    pub(crate) gallery: FetchSlot<Arc<Vec<ImageRecord>>>,
    pub(crate) timelines: HashMap<Section, FetchSlot<Arc<Vec<TimelineEvent>>>>,

    // Gallery browsing state
    pub(crate) active_tags: BTreeSet<String>,
    pub(crate) search_input: String,
    pub(crate) applied_search: String,
    /// Cached grouping, rebuilt whenever data, tags, or search change.
    pub(crate) gallery_view: Option<Arc<GalleryView>>,
    /// Re-seed per-bucket expansion from the policy on the next gallery draw.
    pub(crate) reset_expansion: bool,
    pub(crate) tag_row_open: bool,

    // Timeline search state
    /// One-shot: the search term was just applied or cleared this frame.
    pub(crate) search_pulse: bool,
    /// One-shot: scroll the first matching event into view.
    pub(crate) scroll_to_match: bool,

    // Image viewer
    pub(crate) viewer: ViewerSession,

    // Assets & fetch worker
    pub(crate) assets: AssetStore,
    pub(crate) tx_fetch: mpsc::Sender<FetchRequest>,
    pub(crate) rx_fetch: mpsc::Receiver<FetchResponse>,
}

impl TramasApp {
    pub(crate) fn new(egui_ctx: &egui::Context, preferences: AppPreferences) -> Self {
        let client = ArchiveClient::new(&preferences.base_url);
        let (tx_fetch, rx_fetch) = spawn_fetch_worker(egui_ctx.clone(), client);

        let mut timelines = HashMap::new();
        for section in Section::ALL {
            timelines.insert(section, FetchSlot::Loading);
        }

        let mut app = Self {
            screen: AppScreen::Intro,
            preferences,

            gallery: FetchSlot::Loading,
            timelines,

            active_tags: BTreeSet::new(),
            search_input: String::new(),
            applied_search: String::new(),
            gallery_view: None,
            reset_expansion: false,
            tag_row_open: false,

            search_pulse: false,
            scroll_to_match: false,

            viewer: ViewerSession::new(),

            assets: AssetStore::new(),
            tx_fetch,
            rx_fetch,
        };
        app.request_initial_data();
        app
    }

    // -- Navigation & filter lifecycle --------------------------------------

    /// Switch top-level screens. Clears the search buffer and the active tag
    /// filter; filters never leak across sections.
    pub(crate) fn set_screen(&mut self, screen: AppScreen) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        self.search_input.clear();
        self.applied_search.clear();
        self.active_tags.clear();
        self.tag_row_open = false;
        self.search_pulse = true;
        self.scroll_to_match = false;
        self.invalidate_gallery_view();
    }

    /// Apply the current search buffer to the active screen.
    pub(crate) fn apply_search(&mut self) {
        self.applied_search = self.search_input.trim().to_string();
        self.search_pulse = true;
        self.scroll_to_match = !self.applied_search.is_empty();
        self.invalidate_gallery_view();
    }

    /// Clear the search and every active tag filter.
    pub(crate) fn clear_search(&mut self) {
        self.search_input.clear();
        self.applied_search.clear();
        self.active_tags.clear();
        self.search_pulse = true;
        self.scroll_to_match = false;
        self.invalidate_gallery_view();
    }

    pub(crate) fn toggle_tag(&mut self, tag: &str) {
        if !self.active_tags.remove(tag) {
            self.active_tags.insert(tag.to_string());
        }
        self.invalidate_gallery_view();
    }

    pub(crate) fn clear_tags(&mut self) {
        self.active_tags.clear();
        self.invalidate_gallery_view();
    }

    pub(crate) fn invalidate_gallery_view(&mut self) {
        self.gallery_view = None;
        self.reset_expansion = true;
    }

    /// Rebuild the cached gallery grouping if it was invalidated.
    pub(crate) fn ensure_gallery_view(&mut self) {
        if self.gallery_view.is_none() {
            if let FetchSlot::Ready(master) = &self.gallery {
                self.gallery_view = Some(Arc::new(compute_view(
                    master,
                    &self.active_tags,
                    &self.applied_search,
                )));
            }
        }
    }

    // -- Assets --------------------------------------------------------------

    /// Absolute URL of an image asset, for opening in the system browser.
    pub(crate) fn asset_url(&self, file_name: &str) -> String {
        format!(
            "{}{}/{}",
            self.preferences.base_url.trim_end_matches('/'),
            ASSET_PATH,
            file_name.trim()
        )
    }

    // -- Theme ---------------------------------------------------------------

    /// Whether the dark theme is currently in effect, after the saved
    /// preference and the OS color-scheme fallback are resolved.
    pub(crate) fn dark_mode(&self, ctx: &egui::Context) -> bool {
        ctx.theme() == egui::Theme::Dark
    }

    pub(crate) fn toggle_theme(&mut self, ctx: &egui::Context) {
        let choice = if self.dark_mode(ctx) {
            ThemeChoice::Light
        } else {
            ThemeChoice::Dark
        };
        self.preferences.theme = Some(choice);
        self.preferences.save();
    }

    /// An explicit saved choice wins; otherwise follow the OS color scheme.
    fn apply_theme(&self, ctx: &egui::Context) {
        let preference = match self.preferences.theme {
            Some(ThemeChoice::Dark) => egui::ThemePreference::Dark,
            Some(ThemeChoice::Light) => egui::ThemePreference::Light,
            None => egui::ThemePreference::System,
        };
        ctx.set_theme(preference);
    }

    // -- Loading indicator ----------------------------------------------------

    fn any_fetch_in_flight(&self) -> bool {
        self.gallery.is_loading() || self.timelines.values().any(|slot| slot.is_loading())
    }

    fn draw_loading_overlay(&self, ctx: &egui::Context) {
        if !self.any_fetch_in_flight() {
            return;
        }
        egui::Area::new(egui::Id::new("loading_indicator"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new().size(18.0));
                        ui.label("Carregando dados históricos…");
                    });
                });
            });
    }

    // -- Global keys ----------------------------------------------------------

    fn handle_global_keys(&mut self, ctx: &egui::Context) {
        if !self.viewer.is_visible() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.viewer.close();
        }

        let text_editing = ctx.memory(|m| m.focused().is_some());
        if text_editing {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            self.viewer.navigate(-1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            self.viewer.navigate(1);
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for TramasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);
        self.poll_fetch_responses(ctx);

        let dt = ctx.input(|i| i.stable_dt).min(MAX_FRAME_DT);
        self.viewer.advance(dt);
        if self.viewer.pan_active() {
            self.viewer.step_pan();
        }

        self.draw_menu_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                // Background scrolling is suppressed while the viewer is up.
                .enable_scrolling(!self.viewer.is_visible())
                .show(ui, |ui| match self.screen {
                    AppScreen::Intro => self.draw_intro(ui),
                    AppScreen::Timeline(section) => self.draw_timeline(ui, section),
                    AppScreen::Gallery => self.draw_gallery(ui),
                    AppScreen::About => self.draw_about(ui),
                });
        });

        self.draw_viewer_overlay(ctx);
        self.draw_loading_overlay(ctx);
        self.handle_global_keys(ctx);

        if self.viewer.animating() || self.viewer.pan_active() {
            ctx.request_repaint();
        }
        self.search_pulse = false;
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preferences.save();
        info!("Saved preferences on exit");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn run() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Tramas");

    let prefs = AppPreferences::load();

    let viewport = egui::ViewportBuilder::default()
        .with_title("Tramas — Arquivo Histórico")
        .with_inner_size([prefs.window_width, prefs.window_height]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Tramas",
        options,
        Box::new(move |cc| {
            egui_material_icons::initialize(&cc.egui_ctx);
            Ok(Box::new(TramasApp::new(&cc.egui_ctx, prefs)))
        }),
    )
}
