//! Top-level application errors

use super::{AudioError, RenameError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("rename error: {0}")]
    Rename(#[from] RenameError),
}

/// Settings file errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to save settings: {source}")]
    Save {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {source}")]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },

    #[error("invalid setting: {0}")]
    InvalidValue(String),
}
