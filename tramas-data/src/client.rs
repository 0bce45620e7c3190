use tracing::{debug, info};

use tramas_core::{ImageRecord, Section, TimelineEvent};

use crate::error::DataError;
use crate::payload;
use crate::topics;

/// Path of the gallery collection.
pub const GALLERY_PATH: &str = "/api/gallery";
/// Path prefix of the per-section timeline collections.
pub const TIMELINE_PATH: &str = "/api/timeline";
/// Path prefix under which image assets are served.
pub const ASSET_PATH: &str = "/static/pesquisa_imagens";

/// Blocking client for the two read-only JSON endpoints and their assets.
///
/// Requests carry no explicit timeout; stalls are bounded only by the
/// transport itself, and the caller runs the client off the UI thread.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl ArchiveClient {
    /// Create a client against `base_url` (scheme + host, trailing slash
    /// tolerated).
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn gallery_url(&self) -> String {
        format!("{}{}", self.base, GALLERY_PATH)
    }

    pub fn timeline_url(&self, section: Section) -> String {
        format!("{}{}/{}", self.base, TIMELINE_PATH, section.api_name())
    }

    pub fn asset_url(&self, file_name: &str) -> String {
        format!("{}{}/{}", self.base, ASSET_PATH, file_name.trim())
    }

    /// Fetch the gallery collection, chronologically sorted, with missing
    /// `detected_topics` filled in.
    pub fn fetch_gallery(&self) -> Result<Vec<ImageRecord>, DataError> {
        let body = self.get_text(&self.gallery_url())?;
        let mut records = payload::decode_records(&body);
        topics::normalize_topics(&mut records);
        records.sort_by_key(|r| r.chronological_order);
        info!(count = records.len(), "fetched gallery");
        Ok(records)
    }

    /// Fetch one timeline section.
    pub fn fetch_timeline(&self, section: Section) -> Result<Vec<TimelineEvent>, DataError> {
        let body = self.get_text(&self.timeline_url(section))?;
        let events = payload::decode_events(&body);
        info!(
            section = section.api_name(),
            count = events.len(),
            "fetched timeline section"
        );
        Ok(events)
    }

    /// Fetch the raw bytes of an image asset.
    pub fn fetch_asset(&self, file_name: &str) -> Result<Vec<u8>, DataError> {
        let url = self.asset_url(file_name);
        debug!(%url, "fetching asset");
        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    fn get_text(&self, url: &str) -> Result<String, DataError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text()?)
    }
}
