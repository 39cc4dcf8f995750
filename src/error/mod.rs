//! Structured error types for every layer of the player.

mod app;
mod audio;
mod playback;
mod rename;
mod store;

pub use app::{AppError, SettingsError};
pub use audio::AudioError;
pub use playback::PlaybackError;
pub use rename::RenameError;
pub use store::StoreError;
