mod common;

use bookreader::app::{EngineOptions, MediaLayout, Outcome, PlaybackEngine};
use bookreader::domain::{PlayerState, Position};
use bookreader::hardware::SysfsLeds;
use bookreader::resume::{ConfigDocument, FileResumeStore, load_library};
use common::{FakeBackend, MESSAGES, ROOT};
use std::fs;
use std::path::Path;

const CONFIG: &str = "\
[BOOKS]
Count = 2

[B1]
Count = 4

[B2]
Count = 9

[RESUME]
Book = 2
Track = 3
Time = 0
Messages = 0
";

fn engine_from_disk(path: &Path) -> PlaybackEngine<FakeBackend> {
    let doc = ConfigDocument::load(path).expect("load config");
    let library = load_library(&doc);
    let store = FileResumeStore::new(path, doc, 60_000);
    let mut engine = PlaybackEngine::new(
        FakeBackend::new(),
        MediaLayout::new(ROOT, MESSAGES, true),
        Box::new(store),
        Box::new(SysfsLeds::new(None, None)),
        EngineOptions::default(),
    );
    engine.boot(library);
    engine
}

#[test]
fn shutdown_writes_position_in_whole_seconds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.ini");
    fs::write(&path, CONFIG).expect("write config");

    let mut engine = engine_from_disk(&path);
    assert_eq!(engine.state(), PlayerState::Playing);
    engine.next_track();
    engine.backend_mut().elapsed_ms = 61_500;
    assert_eq!(engine.shutdown_requested(), Outcome::PowerOff);

    let doc = ConfigDocument::load(&path).expect("reload");
    assert_eq!(doc.get_u32("RESUME", "Book").expect("book"), 2);
    assert_eq!(doc.get_u32("RESUME", "Track").expect("track"), 4);
    assert_eq!(doc.get_u32("RESUME", "Time").expect("time"), 61);
    assert_eq!(doc.get_u32("B2", "Count").expect("count"), 9);

    let engine = engine_from_disk(&path);
    assert_eq!(engine.position(), Position::new(2, 4));
    assert_eq!(engine.backend().opened.last().map(|(_, ms)| *ms), Some(61_000));
}

#[test]
fn short_listens_restart_the_track() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.ini");
    fs::write(&path, CONFIG).expect("write config");

    let mut engine = engine_from_disk(&path);
    engine.backend_mut().elapsed_ms = 59_999;
    engine.play_pause_toggle();

    let doc = ConfigDocument::load(&path).expect("reload");
    assert_eq!(doc.get_u32("RESUME", "Time").expect("time"), 0);
    assert_eq!(doc.get("RESUME", "Messages").as_deref(), Some("0"));
}

#[test]
fn missing_count_parks_engine_in_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.ini");
    fs::write(&path, "[BOOKS]\nCount = 2\n[B1]\nCount = 4\n").expect("write config");

    let engine = engine_from_disk(&path);
    assert_eq!(engine.state(), PlayerState::Error);
}
