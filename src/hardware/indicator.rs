use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::LedPattern;

/// Ready LED plus a state LED that mirrors the player state.
pub trait StatusIndicator {
    fn ready(&mut self, on: bool);
    fn show(&mut self, pattern: LedPattern);
}

/// LEDs exposed under `/sys/class/leds/<name>`; either may be absent, in
/// which case only the log records the change.
#[derive(Debug, Clone, Default)]
pub struct SysfsLeds {
    ready: Option<PathBuf>,
    state: Option<PathBuf>,
    last: Option<LedPattern>,
}

impl SysfsLeds {
    pub fn new(ready: Option<PathBuf>, state: Option<PathBuf>) -> Self {
        Self {
            ready,
            state,
            last: None,
        }
    }
}

impl StatusIndicator for SysfsLeds {
    fn ready(&mut self, on: bool) {
        tracing::debug!(on, "ready led");
        if let Some(dir) = &self.ready {
            apply(dir, if on { LedPattern::On } else { LedPattern::Off });
        }
    }

    fn show(&mut self, pattern: LedPattern) {
        if self.last == Some(pattern) {
            return;
        }
        self.last = Some(pattern);
        tracing::debug!(?pattern, "state led");
        if let Some(dir) = &self.state {
            apply(dir, pattern);
        }
    }
}

fn apply(dir: &Path, pattern: LedPattern) {
    let result = match pattern {
        LedPattern::Off => write_attr(dir, "trigger", "none")
            .and_then(|_| write_attr(dir, "brightness", "0")),
        LedPattern::On => write_attr(dir, "trigger", "none")
            .and_then(|_| write_attr(dir, "brightness", "1")),
        LedPattern::Blink { on_ms, off_ms } => write_attr(dir, "trigger", "timer")
            .and_then(|_| write_attr(dir, "delay_on", &on_ms.to_string()))
            .and_then(|_| write_attr(dir, "delay_off", &off_ms.to_string())),
    };
    if let Err(e) = result {
        tracing::debug!(led = %dir.display(), err = %e, "led write failed");
    }
}

fn write_attr(dir: &Path, attr: &str, value: &str) -> std::io::Result<()> {
    fs::write(dir.join(attr), value)
}
