use crate::app::announcements::AnnouncementQueue;
use crate::app::catalog::Catalog;
use crate::app::layout::MediaLayout;
use crate::audio_worker::{AudioBackend, AudioEvent};
use crate::domain::{Clip, PlayerState, Position, ResumeRecord};
use crate::error::PlaybackError;
use crate::hardware::StatusIndicator;
use crate::resume::{Library, ResumeSink};

/// What the caller has to do after an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Continue,
    PowerOff,
}

#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub track_jump_ms: u64,
    pub initial_volume: u8,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            track_jump_ms: 15_000,
            initial_volume: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Loaded {
    Nothing,
    Main,
    Announcement,
}

/// The player's state machine.
///
/// Owns the position, the announcement queue and the media handle. Every
/// button and every end-of-media notification comes through one of the
/// public methods below, on a single thread.
pub struct PlaybackEngine<B: AudioBackend> {
    backend: B,
    layout: MediaLayout,
    resume: Box<dyn ResumeSink>,
    indicator: Box<dyn StatusIndicator>,
    catalog: Catalog,
    state: PlayerState,
    position: Position,
    // start offset for the next main-track load, only non-zero until the
    // first load after boot
    pending_offset_ms: u64,
    announcements: bool,
    volume: u8,
    queue: AnnouncementQueue,
    loaded: Loaded,
    play_id: Option<u64>,
    track_jump_ms: u64,
}

impl<B: AudioBackend> PlaybackEngine<B> {
    /// Until [`boot`](Self::boot) runs the engine reports
    /// `PlayingAnnouncement`, so buttons stay inert.
    pub fn new(
        backend: B,
        layout: MediaLayout,
        resume: Box<dyn ResumeSink>,
        indicator: Box<dyn StatusIndicator>,
        options: EngineOptions,
    ) -> Self {
        Self {
            backend,
            layout,
            resume,
            indicator,
            catalog: Catalog::default(),
            state: PlayerState::PlayingAnnouncement,
            position: Position::default(),
            pending_offset_ms: 0,
            announcements: true,
            volume: options.initial_volume.min(100),
            queue: AnnouncementQueue::new(),
            loaded: Loaded::Nothing,
            play_id: None,
            track_jump_ms: options.track_jump_ms,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn announcements_enabled(&self) -> bool {
        self.announcements
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn queue(&self) -> &AnnouncementQueue {
        &self.queue
    }

    pub fn current_play_id(&self) -> Option<u64> {
        self.play_id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Starts playback from the stored resume point, or parks the engine in
    /// `Error` when the library could not be read.
    pub fn boot(&mut self, library: Result<Library, PlaybackError>) {
        self.indicator.ready(true);
        let library = match library {
            Ok(v) => v,
            Err(e) => {
                self.enter_error(e);
                return;
            }
        };

        let Library { catalog, resume } = library;
        tracing::info!(
            books = catalog.max_book(),
            book = resume.book,
            track = resume.track,
            elapsed_ms = resume.elapsed_ms,
            announcements = resume.announcements,
            "library loaded"
        );
        self.catalog = catalog;
        self.announcements = resume.announcements;
        self.pending_offset_ms = resume.elapsed_ms;

        if !resume.position().is_valid() || self.catalog.max_book() == 0 {
            self.enter_error(PlaybackError::InvalidPosition {
                book: resume.book,
                track: resume.track,
            });
            return;
        }

        self.play_message(Clip::Start, false);
        self.switch_book(i64::from(resume.book), i64::from(resume.track));
    }

    /// Routes a backend notification; ends of superseded media are dropped.
    pub fn on_audio_event(&mut self, event: AudioEvent) -> Outcome {
        match event {
            AudioEvent::Ended { play_id } => {
                if self.play_id != Some(play_id) {
                    tracing::debug!(
                        play_id,
                        current = ?self.play_id,
                        "ignoring end of superseded media"
                    );
                    return Outcome::Continue;
                }
                self.track_clip_ended()
            }
        }
    }

    /// The loaded clip or track played to its end.
    pub fn track_clip_ended(&mut self) -> Outcome {
        if self.state == PlayerState::ShuttingDown {
            return Outcome::PowerOff;
        }
        if !self.queue.is_empty() {
            self.load_next_media();
        } else if self.state == PlayerState::Error {
            tracing::debug!("error state idle");
        } else if self.state == PlayerState::Playing {
            tracing::info!(book = self.position.book, track = self.position.track, "track finished");
            self.switch_track(i64::from(self.position.track) + 1);
        } else {
            self.load_next_media();
        }
        Outcome::Continue
    }

    pub fn next_track(&mut self) {
        if !self.navigation_allowed("next_track") {
            return;
        }
        self.switch_track(i64::from(self.position.track) + 1);
    }

    pub fn prev_track(&mut self) {
        if !self.navigation_allowed("prev_track") {
            return;
        }
        self.switch_track(i64::from(self.position.track) - 1);
    }

    pub fn next_book(&mut self) {
        if !self.navigation_allowed("next_book") {
            return;
        }
        self.switch_book(i64::from(self.position.book) + 1, 1);
    }

    pub fn play_pause_toggle(&mut self) {
        if !self.navigation_allowed("play_pause") {
            return;
        }
        if self.backend.is_playing() {
            self.backend.pause();
            self.switch_state(PlayerState::Paused);
        } else {
            self.backend.play();
            self.switch_state(PlayerState::Playing);
        }
        self.persist();
    }

    pub fn rewind(&mut self) {
        self.seek_relative(-(self.track_jump_ms as i64));
    }

    pub fn fast_forward(&mut self) {
        self.seek_relative(self.track_jump_ms as i64);
    }

    /// Moves within the main track, clamped to `[0, length]`.
    pub fn seek_relative(&mut self, offset_ms: i64) {
        if !self.navigation_allowed("seek") {
            return;
        }
        let current = self.backend.elapsed_ms();
        let mut target = (current as i64).saturating_add(offset_ms).max(0) as u64;
        if let Some(total) = self.backend.total_ms() {
            target = target.min(total);
        }
        tracing::info!(
            from_ms = current,
            to_ms = target,
            total_ms = ?self.backend.total_ms(),
            "seek"
        );
        if let Err(e) = self.backend.seek_to(target) {
            tracing::warn!(target_ms = target, err = %e, "seek failed");
        }
    }

    /// Flips the announcement preference, confirms with a beep and then
    /// reloads the current track.
    pub fn toggle_announcements(&mut self) {
        if !self.navigation_allowed("toggle_announcements") {
            return;
        }
        self.announcements = !self.announcements;
        tracing::info!(enabled = self.announcements, "announcements toggled");
        self.play_message(Clip::Beep, true);
        self.load_next_media();
        self.persist();
    }

    /// Saves the position, then either plays the farewell clip (power-off
    /// follows its end) or asks for power-off right away.
    pub fn shutdown_requested(&mut self) -> Outcome {
        if self.state == PlayerState::ShuttingDown {
            return Outcome::Continue;
        }
        tracing::info!(announcements = self.announcements, "shutdown requested");
        self.persist();
        self.queue.clear();
        if self.announcements {
            self.queue.enqueue_clip(Clip::End);
            if self.load_announcement() {
                self.switch_state(PlayerState::ShuttingDown);
                return Outcome::Continue;
            }
        } else {
            self.stop_media();
        }
        self.switch_state(PlayerState::ShuttingDown);
        Outcome::PowerOff
    }

    /// Applies a new knob reading; unchanged values are not forwarded.
    pub fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        if volume == self.volume {
            return;
        }
        tracing::debug!(from = self.volume, to = volume, "volume changed");
        self.volume = volume;
        self.backend.set_volume(volume);
    }

    /// Periodic save while a main track is running.
    pub fn checkpoint(&mut self) {
        if self.state == PlayerState::Playing && self.loaded == Loaded::Main {
            self.persist();
        }
    }

    /// Saves and silences without powering off.
    pub fn suspend(&mut self) {
        tracing::info!("suspending playback");
        self.persist();
        self.stop_media();
    }

    /// Drops the ready LED right before power-off.
    pub fn power_down_indicators(&mut self) {
        self.indicator.ready(false);
    }

    fn navigation_allowed(&self, op: &'static str) -> bool {
        let allowed = self.state.accepts_navigation();
        if allowed {
            tracing::info!(op, "button");
        } else {
            tracing::debug!(op, state = %self.state, "button ignored");
        }
        allowed
    }

    fn switch_state(&mut self, state: PlayerState) {
        if self.state != state {
            tracing::info!(from = %self.state, to = %state, "state switch");
        }
        self.state = state;
        self.indicator.show(state.led_pattern());
    }

    /// Queues a status clip; "book" and "track" are followed by the number.
    fn play_message(&mut self, clip: Clip, ignore_settings: bool) {
        if !self.announcements && !ignore_settings {
            return;
        }
        tracing::debug!(clip = %clip.file_stem(), "queue announcement");
        self.queue.enqueue_clip(clip);
        match clip {
            Clip::Book => self.queue.enqueue_number(self.position.book),
            Clip::Track => self.queue.enqueue_number(self.position.track),
            _ => {}
        }
    }

    fn switch_track(&mut self, track: i64) {
        let track = self.catalog.wrap_track(self.position.book, track);
        self.position.track = track;
        tracing::info!(
            book = self.position.book,
            track,
            max = self.catalog.max_track(self.position.book),
            "switch track"
        );
        self.play_message(Clip::Track, false);
        self.load_next_media();
    }

    /// Sets book and track first, then queues "book N, track M" so the
    /// spoken order never depends on the requested track.
    fn switch_book(&mut self, book: i64, track: i64) {
        let book = self.catalog.wrap_book(book);
        let max_track = self.catalog.max_track(book);
        if book == 0 || max_track == 0 {
            self.enter_error(PlaybackError::InvalidPosition {
                book,
                track: u32::try_from(track).unwrap_or(0),
            });
            return;
        }
        let track = self.catalog.wrap_track(book, track);
        self.position = Position::new(book, track);
        tracing::info!(book, track, max_book = self.catalog.max_book(), "switch book");

        self.switch_state(PlayerState::SwitchingBooks);
        self.play_message(Clip::Book, false);
        self.play_message(Clip::Track, false);
        self.load_next_media();
    }

    /// Plays the next queued clip, or the main track once the queue is dry.
    fn load_next_media(&mut self) {
        if self.load_announcement() {
            return;
        }
        if self.state == PlayerState::Error {
            return;
        }
        self.load_main_track();
    }

    /// Pops clips until one opens. Clips that fail to open are skipped.
    fn load_announcement(&mut self) -> bool {
        self.stop_media();
        while let Some(item) = self.queue.dequeue_next() {
            if self.state != PlayerState::Error {
                self.switch_state(PlayerState::PlayingAnnouncement);
            }
            let path = self.layout.clip_path(item.clip);
            match self.backend.open(&path, 0) {
                Ok(play_id) => {
                    tracing::debug!(
                        path = %path.display(),
                        play_id,
                        number = ?item.origin,
                        "announcement loaded"
                    );
                    self.loaded = Loaded::Announcement;
                    self.play_id = Some(play_id);
                    self.start_output();
                    return true;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), err = %e, "announcement skipped");
                }
            }
        }
        false
    }

    fn load_main_track(&mut self) {
        self.stop_media();
        let path = self.layout.track_path(self.position);
        let offset_ms = self.pending_offset_ms;
        tracing::info!(
            book = self.position.book,
            track = self.position.track,
            offset_ms,
            path = %path.display(),
            "loading track"
        );
        self.switch_state(PlayerState::Playing);
        self.persist();
        match self.backend.open(&path, offset_ms) {
            Ok(play_id) => {
                self.loaded = Loaded::Main;
                self.play_id = Some(play_id);
                self.pending_offset_ms = 0;
                self.start_output();
            }
            Err(e) => {
                if e.is_missing() {
                    tracing::error!(path = %path.display(), "track file missing");
                } else {
                    tracing::error!(path = %path.display(), "track file unreadable");
                }
                self.enter_error(PlaybackError::MediaUnavailable(e));
            }
        }
    }

    fn start_output(&mut self) {
        self.backend.set_volume(self.volume);
        self.backend.play();
    }

    fn stop_media(&mut self) {
        self.backend.stop();
        self.loaded = Loaded::Nothing;
        self.play_id = None;
    }

    /// Terminal until restart: error clip once, then only shutdown works.
    fn enter_error(&mut self, err: PlaybackError) {
        tracing::error!(err = %err, "configuration error, restart required");
        self.queue.clear();
        self.stop_media();
        self.switch_state(PlayerState::Error);
        self.play_message(Clip::Error, true);
        self.load_announcement();
    }

    fn main_elapsed_ms(&self) -> u64 {
        match self.loaded {
            Loaded::Main => self.backend.elapsed_ms(),
            _ => self.pending_offset_ms,
        }
    }

    fn persist(&mut self) {
        if self.state == PlayerState::Error || !self.position.is_valid() {
            return;
        }
        let record = ResumeRecord {
            book: self.position.book,
            track: self.position.track,
            elapsed_ms: self.main_elapsed_ms(),
            announcements: self.announcements,
        };
        match self.resume.save(&record) {
            Ok(()) => tracing::debug!(?record, "resume data saved"),
            Err(e) => tracing::warn!(err = %e, "failed to save resume data"),
        }
    }
}
