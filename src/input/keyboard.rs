use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;
use std::thread;
use tokio::sync::mpsc;

use super::{Button, InputEvent};
use crate::hardware::VolumeKnob;

const KNOB_STEP: i16 = 5;

/// Raw terminal mode for the lifetime of the keyboard emulation.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Reads single key presses and maps them onto buttons; `+`/`-` turn the
/// emulated volume knob.
pub fn spawn_keyboard_input(
    tx: mpsc::Sender<InputEvent>,
    knob: VolumeKnob,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("keyboard-input".to_owned())
        .spawn(move || {
            loop {
                let key = match event::read() {
                    Ok(Event::Key(key)) => key,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!(err = %e, "keyboard read failed");
                        break;
                    }
                };
                let Some(evt) = map_key(key, &knob) else {
                    continue;
                };
                let quit = evt == InputEvent::Quit;
                if tx.blocking_send(evt).is_err() || quit {
                    break;
                }
            }
            tracing::debug!("keyboard input stopped");
        })
}

fn map_key(key: KeyEvent, knob: &VolumeKnob) -> Option<InputEvent> {
    // Some terminals report both press and release.
    if matches!(key.kind, KeyEventKind::Release) {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Some(InputEvent::Quit),
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        (KeyCode::Char('+') | KeyCode::Char('='), _) => {
            let level = knob.turn(KNOB_STEP);
            tracing::debug!(level, "knob up");
            None
        }
        (KeyCode::Char('-'), _) => {
            let level = knob.turn(-KNOB_STEP);
            tracing::debug!(level, "knob down");
            None
        }
        (KeyCode::Char(c), _) => Button::from_key(c).map(InputEvent::Press),
        _ => None,
    }
}
