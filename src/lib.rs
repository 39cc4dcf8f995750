pub mod app;
pub mod audio_worker;
pub mod cli;
pub mod core;
pub mod domain;
pub mod error;
pub mod hardware;
pub mod input;
pub mod logging;
pub mod renamer;
pub mod resume;
pub mod settings;
pub mod storage;
