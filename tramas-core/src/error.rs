use thiserror::Error;

/// Errors originating from the core archive model.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("start index {index} out of range for a list of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown timeline section: {0}")]
    UnknownSection(String),
}
