//! Book directory renaming errors

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    #[error("directory does not exist: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to rename {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("console IO error: {0}")]
    Console(#[from] std::io::Error),
}
