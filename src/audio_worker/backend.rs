use std::path::Path;

use crate::error::AudioError;

/// Media playback primitives the engine drives.
///
/// `open` replaces whatever was loaded and returns a fresh play id; the
/// backend reports [`AudioEvent::Ended`](super::AudioEvent::Ended) with that
/// id exactly once, when the media runs out. Stopping or replacing the media
/// disarms the notification.
pub trait AudioBackend {
    /// Loads `path` paused, positioned at `start_ms`.
    fn open(&mut self, path: &Path, start_ms: u64) -> Result<u64, AudioError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
    fn elapsed_ms(&self) -> u64;
    /// `None` when the decoder cannot tell.
    fn total_ms(&self) -> Option<u64>;
    fn seek_to(&mut self, position_ms: u64) -> Result<(), AudioError>;
    /// 0-100
    fn set_volume(&mut self, volume: u8);
}
