mod document;
mod store;

pub use document::ConfigDocument;
pub use store::{DiscardResume, FileResumeStore, Library, ResumeSink, load_library};
