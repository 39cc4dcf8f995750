//! Audio backend errors

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// Opening the media file failed
    #[error("failed to open audio file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but could not be decoded
    #[error("failed to decode audio file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to open audio output stream: {0}")]
    OutputStream(String),

    #[error("audio file not found: {0}")]
    FileNotFound(PathBuf),
}

impl AudioError {
    /// Missing-file errors are distinguishable from corrupt media.
    pub fn is_missing(&self) -> bool {
        match self {
            AudioError::FileNotFound(_) => true,
            AudioError::OpenFile { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
