pub mod error;
pub mod gallery;
pub mod record;
pub mod timeline;
pub mod topic;
pub mod viewer;

// Re-export primary types for convenience.
pub use error::CoreError;
pub use gallery::{compute_view, unique_tags, EmptyReason, GalleryView, TopicBucket};
pub use record::{ImageRecord, TimelineEvent, ViewerItem};
pub use timeline::{event_matches, highlight_ranges, Section};
pub use topic::{Topic, CATCH_ALL_LABEL};
pub use viewer::{CursorHint, Offset, ViewerPhase, ViewerSession, ZoomDirection};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
