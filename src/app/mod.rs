pub mod announcements;
pub mod catalog;
pub mod engine;
pub mod layout;

pub use announcements::{AnnouncementQueue, number_clips};
pub use catalog::Catalog;
pub use engine::{EngineOptions, Outcome, PlaybackEngine};
pub use layout::MediaLayout;
