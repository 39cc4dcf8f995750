//! Thin adapters over the device's LEDs, power switch and volume knob.

mod indicator;
mod power;
mod volume;

pub use indicator::{StatusIndicator, SysfsLeds};
pub use power::{CommandPower, LogOnlyPower, PowerControl};
pub use volume::{AdcVolume, FixedVolume, VolumeInput, VolumeKnob};
