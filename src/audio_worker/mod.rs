mod backend;
mod messages;
mod null_engine;
mod player;

pub use backend::AudioBackend;
pub use messages::AudioEvent;
pub use null_engine::NullBackend;
pub use player::RodioBackend;
