//! Failures that put the playback engine into its terminal `Error` state

use super::{AudioError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// No removable storage with a catalog was found
    #[error("storage device not found")]
    StorageAbsent,

    /// Catalog or resume section missing/unreadable
    #[error("configuration error: {0}")]
    Configuration(#[from] StoreError),

    /// Resume position resolved to book 0 / track 0 or an empty catalog
    #[error("invalid position: book {book}, track {track}")]
    InvalidPosition { book: u32, track: u32 },

    /// A main track listed in the catalog could not be played
    #[error("media unavailable: {0}")]
    MediaUnavailable(#[from] AudioError),
}
