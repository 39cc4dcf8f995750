#![allow(dead_code)]

use bookreader::app::{Catalog, EngineOptions, MediaLayout, PlaybackEngine};
use bookreader::audio_worker::AudioBackend;
use bookreader::domain::{LedPattern, PlayerState, ResumeRecord};
use bookreader::error::{AudioError, StoreError};
use bookreader::hardware::{PowerControl, StatusIndicator};
use bookreader::resume::{Library, ResumeSink};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const ROOT: &str = "/usb";
pub const MESSAGES: &str = "/msg";

/// Records every call instead of producing sound.
pub struct FakeBackend {
    pub opened: Vec<(PathBuf, u64)>,
    pub missing: HashSet<PathBuf>,
    pub playing: bool,
    pub elapsed_ms: u64,
    pub total_ms: Option<u64>,
    pub volumes: Vec<u8>,
    pub seeks: Vec<u64>,
    pub stops: usize,
    next_id: u64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            opened: Vec::new(),
            missing: HashSet::new(),
            playing: false,
            elapsed_ms: 0,
            total_ms: Some(20_000),
            volumes: Vec::new(),
            seeks: Vec::new(),
            stops: 0,
            next_id: 0,
        }
    }

    pub fn last_opened(&self) -> Option<String> {
        self.opened
            .last()
            .map(|(p, _)| p.to_string_lossy().into_owned())
    }

    pub fn opened_paths(&self) -> Vec<String> {
        self.opened
            .iter()
            .map(|(p, _)| p.to_string_lossy().into_owned())
            .collect()
    }
}

impl AudioBackend for FakeBackend {
    fn open(&mut self, path: &Path, start_ms: u64) -> Result<u64, AudioError> {
        if self.missing.contains(path) {
            return Err(AudioError::FileNotFound(path.to_path_buf()));
        }
        self.next_id += 1;
        self.opened.push((path.to_path_buf(), start_ms));
        self.elapsed_ms = start_ms;
        self.playing = false;
        Ok(self.next_id)
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.stops += 1;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    fn total_ms(&self) -> Option<u64> {
        self.total_ms
    }

    fn seek_to(&mut self, position_ms: u64) -> Result<(), AudioError> {
        self.seeks.push(position_ms);
        self.elapsed_ms = position_ms;
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) {
        self.volumes.push(volume);
    }
}

#[derive(Clone, Default)]
pub struct MemoryResume(pub Arc<Mutex<Vec<ResumeRecord>>>);

impl MemoryResume {
    pub fn records(&self) -> Vec<ResumeRecord> {
        self.0.lock().expect("lock").clone()
    }

    pub fn last(&self) -> Option<ResumeRecord> {
        self.records().last().copied()
    }
}

impl ResumeSink for MemoryResume {
    fn save(&mut self, record: &ResumeRecord) -> Result<(), StoreError> {
        self.0.lock().expect("lock").push(*record);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingLeds {
    pub ready: Arc<Mutex<Vec<bool>>>,
    pub patterns: Arc<Mutex<Vec<LedPattern>>>,
}

impl StatusIndicator for RecordingLeds {
    fn ready(&mut self, on: bool) {
        self.ready.lock().expect("lock").push(on);
    }

    fn show(&mut self, pattern: LedPattern) {
        self.patterns.lock().expect("lock").push(pattern);
    }
}

#[derive(Clone, Default)]
pub struct RecordingPower(pub Arc<AtomicBool>);

impl RecordingPower {
    pub fn called(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl PowerControl for RecordingPower {
    fn power_off(&mut self) -> std::io::Result<()> {
        self.0.store(true, Ordering::Relaxed);
        Ok(())
    }
}

pub struct Harness {
    pub engine: PlaybackEngine<FakeBackend>,
    pub resume: MemoryResume,
    pub leds: RecordingLeds,
}

pub fn track(book: u32, track: u32) -> String {
    format!("{ROOT}/b{book}/{track:03}.mp3")
}

pub fn clip(name: &str) -> String {
    format!("{MESSAGES}/{name}.mp3")
}

pub fn record(book: u32, track: u32, elapsed_ms: u64, announcements: bool) -> ResumeRecord {
    ResumeRecord {
        book,
        track,
        elapsed_ms,
        announcements,
    }
}

pub fn library(tracks: Vec<u32>, resume: ResumeRecord) -> Library {
    Library {
        catalog: Catalog::new(tracks),
        resume,
    }
}

pub fn harness_with(backend: FakeBackend) -> Harness {
    let resume = MemoryResume::default();
    let leds = RecordingLeds::default();
    let engine = PlaybackEngine::new(
        backend,
        MediaLayout::new(ROOT, MESSAGES, true),
        Box::new(resume.clone()),
        Box::new(leds.clone()),
        EngineOptions {
            track_jump_ms: 15_000,
            initial_volume: 80,
        },
    );
    Harness {
        engine,
        resume,
        leds,
    }
}

/// Engine booted into `resume` over a catalog of `tracks` per book.
pub fn booted(tracks: Vec<u32>, resume: ResumeRecord) -> Harness {
    let mut h = harness_with(FakeBackend::new());
    h.engine.boot(Ok(library(tracks, resume)));
    h
}

/// Ends clips until the main track is running again.
pub fn drain(engine: &mut PlaybackEngine<FakeBackend>) {
    for _ in 0..100 {
        if engine.state() == PlayerState::Playing || engine.state() == PlayerState::Error {
            return;
        }
        let _ = engine.track_clip_ended();
    }
    panic!("announcements never drained, state {}", engine.state());
}
