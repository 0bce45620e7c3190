use thiserror::Error;

/// Errors from the content-server boundary.
///
/// Only transport problems and non-2xx statuses are errors; a payload that
/// parses but has the wrong shape decodes to "no data" instead (see
/// [`crate::payload`]).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
