//! Tolerant decoding of the two JSON collections.
//!
//! Malformed payloads (not JSON, not an array) and malformed elements are
//! treated as "no data", never as a hard error: the body decodes to an empty
//! or partial list and a warning is logged, so one bad row cannot blank a
//! whole section.

use serde_json::Value;
use tracing::warn;

use tramas_core::{ImageRecord, TimelineEvent};

/// Decode a gallery payload into image records.
pub fn decode_records(body: &str) -> Vec<ImageRecord> {
    decode_array(body, "gallery")
}

/// Decode a timeline payload into events.
pub fn decode_events(body: &str) -> Vec<TimelineEvent> {
    decode_array(body, "timeline")
}

fn decode_array<T: serde::de::DeserializeOwned>(body: &str, what: &str) -> Vec<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!("{what} payload is not valid JSON, treating as empty: {e}");
            return Vec::new();
        }
    };
    let Value::Array(elements) = value else {
        warn!("{what} payload is not an array, treating as empty");
        return Vec::new();
    };

    let total = elements.len();
    let decoded: Vec<T> = elements
        .into_iter()
        .filter_map(|el| match serde_json::from_value(el) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("skipping malformed {what} entry: {e}");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        warn!(
            "{what} payload: kept {} of {} entries",
            decoded.len(),
            total
        );
    }
    decoded
}
