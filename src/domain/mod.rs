pub mod model;

pub use model::{Announcement, Clip, LedPattern, PlayerState, Position, ResumeRecord};
