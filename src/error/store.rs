//! Persistence store errors

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("missing key {section}.{key}")]
    MissingKey { section: String, key: String },

    #[error("invalid value for {section}.{key}: {value:?}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

impl StoreError {
    pub fn missing(section: &str, key: &str) -> Self {
        StoreError::MissingKey {
            section: section.to_owned(),
            key: key.to_owned(),
        }
    }
}
