/// Notifications raised from audio threads, drained by the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// The media loaded under `play_id` played to its end.
    Ended { play_id: u64 },
}
