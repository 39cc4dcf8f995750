use std::path::PathBuf;

use crate::app::Catalog;
use crate::domain::ResumeRecord;
use crate::error::{PlaybackError, StoreError};

use super::document::ConfigDocument;

const BOOKS: &str = "BOOKS";
const RESUME: &str = "RESUME";
const COUNT: &str = "Count";

/// Destination for resume snapshots.
pub trait ResumeSink {
    fn save(&mut self, record: &ResumeRecord) -> Result<(), StoreError>;
}

/// Everything read from storage at boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub catalog: Catalog,
    pub resume: ResumeRecord,
}

/// Reads the catalog and resume section. `RESUME.Time` is whole seconds.
/// Announcements are on only for `RESUME.Messages = 1`, or when the key
/// is missing.
pub fn load_library(doc: &ConfigDocument) -> Result<Library, PlaybackError> {
    let max_book = doc.get_u32(BOOKS, COUNT)?;
    let tracks = (1..=max_book)
        .map(|n| doc.get_u32(&format!("B{n}"), COUNT))
        .collect::<Result<Vec<_>, _>>()?;

    let book = doc.get_u32(RESUME, "Book")?;
    let track = doc.get_u32(RESUME, "Track")?;
    let seconds = match doc.get(RESUME, "Time") {
        Some(_) => doc.get_u32(RESUME, "Time")?,
        None => 0,
    };
    let announcements = doc
        .get(RESUME, "Messages")
        .map(|v| v == "1")
        .unwrap_or(true);

    Ok(Library {
        catalog: Catalog::new(tracks),
        resume: ResumeRecord {
            book,
            track,
            elapsed_ms: u64::from(seconds) * 1000,
            announcements,
        },
    })
}

/// Rewrites the whole `config.ini` on every save.
pub struct FileResumeStore {
    path: PathBuf,
    document: ConfigDocument,
    threshold_ms: u64,
}

impl FileResumeStore {
    pub fn new(path: impl Into<PathBuf>, document: ConfigDocument, threshold_ms: u64) -> Self {
        Self {
            path: path.into(),
            document,
            threshold_ms,
        }
    }

}

impl ResumeSink for FileResumeStore {
    fn save(&mut self, record: &ResumeRecord) -> Result<(), StoreError> {
        self.document.set(RESUME, "Book", record.book.to_string());
        self.document.set(RESUME, "Track", record.track.to_string());
        self.document.set(
            RESUME,
            "Time",
            record.stored_seconds(self.threshold_ms).to_string(),
        );
        self.document
            .set(RESUME, "Messages", if record.announcements { "1" } else { "0" });
        self.document.write_to(&self.path)?;
        tracing::debug!(path = %self.path.display(), "resume data written");
        Ok(())
    }
}

/// Accepts and drops every snapshot; used when no storage was found.
pub struct DiscardResume;

impl ResumeSink for DiscardResume {
    fn save(&mut self, _record: &ResumeRecord) -> Result<(), StoreError> {
        Ok(())
    }
}
