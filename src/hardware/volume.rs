use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Source of the 0-100 volume level, sampled on every poll.
pub trait VolumeInput {
    /// `None` when the reading failed; the caller keeps the last level.
    fn read(&mut self) -> Option<u8>;
}

#[derive(Debug, Clone, Copy)]
pub struct FixedVolume(pub u8);

impl VolumeInput for FixedVolume {
    fn read(&mut self) -> Option<u8> {
        Some(self.0.min(100))
    }
}

/// Potentiometer on an IIO ADC channel, e.g. an MCP3008 exposed as
/// `/sys/bus/iio/devices/iio:device0/in_voltage0_raw`.
#[derive(Debug, Clone)]
pub struct AdcVolume {
    path: PathBuf,
    max_raw: u32,
}

impl AdcVolume {
    pub fn new(path: impl Into<PathBuf>, max_raw: u32) -> Self {
        Self {
            path: path.into(),
            max_raw: max_raw.max(1),
        }
    }
}

impl VolumeInput for AdcVolume {
    fn read(&mut self) -> Option<u8> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let raw = raw.trim().parse::<u32>().ok()?;
        Some(scale(raw, self.max_raw))
    }
}

fn scale(raw: u32, max_raw: u32) -> u8 {
    (u64::from(raw.min(max_raw)) * 100 / u64::from(max_raw)) as u8
}

/// Software knob turned from the keyboard emulation.
#[derive(Debug, Clone)]
pub struct VolumeKnob(Arc<AtomicU8>);

impl VolumeKnob {
    pub fn new(initial: u8) -> Self {
        Self(Arc::new(AtomicU8::new(initial.min(100))))
    }

    pub fn turn(&self, delta: i16) -> u8 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (i16::from(current) + delta).clamp(0, 100) as u8;
            match self
                .0
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    pub fn level(&self) -> u8 {
        self.0.load(Ordering::Relaxed)
    }
}

impl VolumeInput for VolumeKnob {
    fn read(&mut self) -> Option<u8> {
        Some(self.level())
    }
}
