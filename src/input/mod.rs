//! Button sources. Every source turns presses into [`InputEvent`]s on one
//! channel; the controller is the only consumer.

mod keyboard;
mod lines;

pub use keyboard::{TerminalGuard, spawn_keyboard_input};
pub use lines::spawn_line_input;

/// The eight physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    PrevTrack,
    Rewind,
    PlayPause,
    FastForward,
    NextTrack,
    NextBook,
    ToggleAnnouncements,
    Shutdown,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::PrevTrack,
        Button::Rewind,
        Button::PlayPause,
        Button::FastForward,
        Button::NextTrack,
        Button::NextBook,
        Button::ToggleAnnouncements,
        Button::Shutdown,
    ];

    /// Keyboard emulation bindings.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            'q' => Some(Button::PrevTrack),
            'w' => Some(Button::Rewind),
            'e' => Some(Button::PlayPause),
            'r' => Some(Button::FastForward),
            't' => Some(Button::NextTrack),
            's' => Some(Button::NextBook),
            'm' => Some(Button::ToggleAnnouncements),
            'p' => Some(Button::Shutdown),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Button::PrevTrack => 'q',
            Button::Rewind => 'w',
            Button::PlayPause => 'e',
            Button::FastForward => 'r',
            Button::NextTrack => 't',
            Button::NextBook => 's',
            Button::ToggleAnnouncements => 'm',
            Button::Shutdown => 'p',
        }
    }

    /// Names accepted on the line input.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "prev" => Some(Button::PrevTrack),
            "rewind" => Some(Button::Rewind),
            "play" => Some(Button::PlayPause),
            "ff" => Some(Button::FastForward),
            "next" => Some(Button::NextTrack),
            "book" => Some(Button::NextBook),
            "messages" => Some(Button::ToggleAnnouncements),
            "shutdown" => Some(Button::Shutdown),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::PrevTrack => "prev",
            Button::Rewind => "rewind",
            Button::PlayPause => "play",
            Button::FastForward => "ff",
            Button::NextTrack => "next",
            Button::NextBook => "book",
            Button::ToggleAnnouncements => "messages",
            Button::Shutdown => "shutdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Button),
    /// Leave the loop without powering off (debug sessions only).
    Quit,
}
