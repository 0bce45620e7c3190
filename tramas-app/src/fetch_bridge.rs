use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use eframe::egui;
use tracing::{debug, error, warn};

use tramas_core::{ImageRecord, Section, TimelineEvent};
use tramas_data::ArchiveClient;

use crate::app::TramasApp;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lifecycle of one fetched collection, rendered into its own container.
#[derive(Debug)]
pub(crate) enum FetchSlot<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchSlot<T> {
    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, FetchSlot::Loading)
    }
}

/// Request sent from the UI thread to the fetch worker.
pub(crate) enum FetchRequest {
    Gallery,
    Timeline(Section),
    Asset { file_name: String },
}

/// An image asset decoded off the UI thread, ready for texture upload.
pub(crate) struct DecodedImage {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) rgba: Vec<u8>,
}

/// Response sent from the fetch worker back to the UI thread.
pub(crate) enum FetchResponse {
    Gallery(Result<Vec<ImageRecord>, String>),
    Timeline(Section, Result<Vec<TimelineEvent>, String>),
    /// `None` means the asset is broken or missing, a per-item soft failure.
    Asset {
        file_name: String,
        image: Option<DecodedImage>,
    },
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

/// Spawn the fetch worker thread.
///
/// Each request is answered independently, so one failing endpoint never
/// blocks or hides the others' results. The worker pokes the egui context
/// after every response so results appear without user input.
pub(crate) fn spawn_fetch_worker(
    egui_ctx: egui::Context,
    client: ArchiveClient,
) -> (mpsc::Sender<FetchRequest>, mpsc::Receiver<FetchResponse>) {
    let (req_tx, req_rx) = mpsc::channel::<FetchRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<FetchResponse>();

    thread::Builder::new()
        .name("fetch-worker".into())
        .spawn(move || {
            debug!("fetch worker thread started");
            while let Ok(request) = req_rx.recv() {
                let response = match request {
                    FetchRequest::Gallery => {
                        FetchResponse::Gallery(client.fetch_gallery().map_err(|e| e.to_string()))
                    }
                    FetchRequest::Timeline(section) => FetchResponse::Timeline(
                        section,
                        client.fetch_timeline(section).map_err(|e| e.to_string()),
                    ),
                    FetchRequest::Asset { file_name } => {
                        let image = load_asset(&client, &file_name);
                        FetchResponse::Asset { file_name, image }
                    }
                };
                if resp_tx.send(response).is_err() {
                    break;
                }
                egui_ctx.request_repaint();
            }
            debug!("fetch worker thread exiting");
        })
        .expect("Failed to spawn fetch worker thread");

    (req_tx, resp_rx)
}

/// Fetch and decode one asset. Any failure is soft: log and return `None`.
fn load_asset(client: &ArchiveClient, file_name: &str) -> Option<DecodedImage> {
    let bytes = match client.fetch_asset(file_name) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("asset {file_name:?} unavailable: {e}");
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            Some(DecodedImage {
                width: rgba.width() as usize,
                height: rgba.height() as usize,
                rgba: rgba.into_raw(),
            })
        }
        Err(e) => {
            warn!("asset {file_name:?} failed to decode: {e}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// impl TramasApp — dispatch & polling
// ---------------------------------------------------------------------------

impl TramasApp {
    /// Kick off the four initial fetches: the gallery plus one request per
    /// timeline section, completed independently.
    pub(crate) fn request_initial_data(&mut self) {
        let _ = self.tx_fetch.send(FetchRequest::Gallery);
        for section in Section::ALL {
            let _ = self.tx_fetch.send(FetchRequest::Timeline(section));
        }
    }

    /// Request an asset fetch unless it is already loaded, loading, or known
    /// broken.
    pub(crate) fn ensure_asset(&mut self, file_name: &str) {
        if self.assets.begin_loading(file_name) {
            let _ = self.tx_fetch.send(FetchRequest::Asset {
                file_name: file_name.to_string(),
            });
        }
    }

    /// Drain pending fetch responses into the per-container slots.
    pub(crate) fn poll_fetch_responses(&mut self, ctx: &egui::Context) {
        while let Ok(response) = self.rx_fetch.try_recv() {
            match response {
                FetchResponse::Gallery(Ok(records)) => {
                    self.gallery = FetchSlot::Ready(Arc::new(records));
                    self.invalidate_gallery_view();
                }
                FetchResponse::Gallery(Err(e)) => {
                    error!("gallery fetch failed: {e}");
                    self.gallery = FetchSlot::Failed(e);
                }
                FetchResponse::Timeline(section, Ok(events)) => {
                    self.timelines
                        .insert(section, FetchSlot::Ready(Arc::new(events)));
                }
                FetchResponse::Timeline(section, Err(e)) => {
                    error!("timeline {} fetch failed: {e}", section.api_name());
                    self.timelines.insert(section, FetchSlot::Failed(e));
                }
                FetchResponse::Asset { file_name, image } => match image {
                    Some(decoded) => self.assets.insert(ctx, &file_name, decoded),
                    None => self.assets.mark_failed(&file_name),
                },
            }
        }
    }
}
