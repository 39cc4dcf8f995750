use std::fmt;

/// What the playback engine is doing right now.
///
/// Derived from the engine's own transitions; nothing else writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Error,
    Paused,
    Playing,
    PlayingAnnouncement,
    SwitchingBooks,
    ShuttingDown,
}

impl PlayerState {
    pub fn name(self) -> &'static str {
        match self {
            PlayerState::Error => "Error",
            PlayerState::Paused => "Paused",
            PlayerState::Playing => "Playing",
            PlayerState::PlayingAnnouncement => "PlayingAnnouncement",
            PlayerState::SwitchingBooks => "SwitchingBooks",
            PlayerState::ShuttingDown => "ShuttingDown",
        }
    }

    /// Navigation buttons are only honored while a main track is loaded.
    pub fn accepts_navigation(self) -> bool {
        matches!(self, PlayerState::Playing | PlayerState::Paused)
    }

    pub fn led_pattern(self) -> LedPattern {
        match self {
            PlayerState::Error => LedPattern::Off,
            PlayerState::Paused => LedPattern::Blink {
                on_ms: 800,
                off_ms: 800,
            },
            _ => LedPattern::On,
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedPattern {
    Off,
    On,
    Blink { on_ms: u64, off_ms: u64 },
}

/// Book/track pair. `0` in either field means "no valid position".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub book: u32,
    pub track: u32,
}

impl Position {
    pub fn new(book: u32, track: u32) -> Self {
        Self { book, track }
    }

    pub fn is_valid(&self) -> bool {
        self.book > 0 && self.track > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}/t{}", self.book, self.track)
    }
}

/// Short spoken clips stored next to each other as `<name>.mp3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    Start,
    End,
    Error,
    Beep,
    Book,
    Track,
    Digit(u8),
}

impl Clip {
    pub fn file_stem(&self) -> String {
        match self {
            Clip::Start => "start".to_owned(),
            Clip::End => "end".to_owned(),
            Clip::Error => "error".to_owned(),
            Clip::Beep => "beep".to_owned(),
            Clip::Book => "book".to_owned(),
            Clip::Track => "track".to_owned(),
            Clip::Digit(d) => d.to_string(),
        }
    }
}

/// A queued clip; digit clips remember the number they were cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    pub clip: Clip,
    pub origin: Option<u32>,
}

impl Announcement {
    pub fn status(clip: Clip) -> Self {
        Self { clip, origin: None }
    }

    pub fn digit(digit: u8, origin: u32) -> Self {
        Self {
            clip: Clip::Digit(digit),
            origin: Some(origin),
        }
    }
}

/// Persisted projection of the position plus the announcement preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeRecord {
    pub book: u32,
    pub track: u32,
    pub elapsed_ms: u64,
    pub announcements: bool,
}

impl ResumeRecord {
    pub fn position(&self) -> Position {
        Position::new(self.book, self.track)
    }

    /// Whole seconds written to the store; anything under `threshold_ms`
    /// restarts the track from the top.
    pub fn stored_seconds(&self, threshold_ms: u64) -> u64 {
        if self.elapsed_ms < threshold_ms {
            0
        } else {
            self.elapsed_ms / 1000
        }
    }
}
