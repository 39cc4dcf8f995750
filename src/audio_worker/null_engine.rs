use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

use super::backend::AudioBackend;
use super::messages::AudioEvent;
use crate::error::AudioError;

const TICK: Duration = Duration::from_millis(50);

struct SimulatedClip {
    elapsed_ms: Arc<AtomicU64>,
    paused: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
}

/// Silent backend for machines without an output device.
///
/// Every file "plays" for a fixed length and then reports its end, so the
/// state machine can be exercised from the keyboard.
pub struct NullBackend {
    tx_evt: mpsc::Sender<AudioEvent>,
    clip_ms: u64,
    current: Option<SimulatedClip>,
    play_id: u64,
}

impl NullBackend {
    pub fn new(tx_evt: mpsc::Sender<AudioEvent>, clip_ms: u64) -> Self {
        Self {
            tx_evt,
            clip_ms: clip_ms.max(TICK.as_millis() as u64),
            current: None,
            play_id: 0,
        }
    }

    fn stop_current(&mut self) {
        if let Some(cur) = self.current.take() {
            cur.cancel.store(true, Ordering::Relaxed);
        }
    }

    fn spawn_clock(&mut self, start_ms: u64) {
        let play_id = self.play_id;
        let total_ms = self.clip_ms;
        let clip = SimulatedClip {
            elapsed_ms: Arc::new(AtomicU64::new(start_ms.min(total_ms))),
            paused: Arc::new(AtomicBool::new(true)),
            cancel: Arc::new(AtomicBool::new(false)),
        };
        let elapsed = Arc::clone(&clip.elapsed_ms);
        let paused = Arc::clone(&clip.paused);
        let cancel = Arc::clone(&clip.cancel);
        let tx_end = self.tx_evt.clone();

        let spawned = thread::Builder::new()
            .name(format!("null-clock-{play_id}"))
            .spawn(move || {
                loop {
                    thread::sleep(TICK);
                    if cancel.load(Ordering::Relaxed) {
                        return;
                    }
                    if paused.load(Ordering::Relaxed) {
                        continue;
                    }
                    let now = elapsed.fetch_add(TICK.as_millis() as u64, Ordering::Relaxed)
                        + TICK.as_millis() as u64;
                    if now >= total_ms {
                        let _ = tx_end.blocking_send(AudioEvent::Ended { play_id });
                        return;
                    }
                }
            });
        if let Err(e) = spawned {
            tracing::error!(play_id, err = %e, "failed to spawn simulated clock");
        }
        self.current = Some(clip);
    }
}

impl AudioBackend for NullBackend {
    fn open(&mut self, path: &Path, start_ms: u64) -> Result<u64, AudioError> {
        self.stop_current();
        self.play_id = self.play_id.wrapping_add(1).max(1);
        self.spawn_clock(start_ms);
        tracing::debug!(play_id = self.play_id, path = %path.display(), start_ms, "simulated open");
        Ok(self.play_id)
    }

    fn play(&mut self) {
        if let Some(cur) = &self.current {
            cur.paused.store(false, Ordering::Relaxed);
        }
    }

    fn pause(&mut self) {
        if let Some(cur) = &self.current {
            cur.paused.store(true, Ordering::Relaxed);
        }
    }

    fn stop(&mut self) {
        self.stop_current();
    }

    fn is_playing(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|cur| !cur.paused.load(Ordering::Relaxed))
    }

    fn elapsed_ms(&self) -> u64 {
        self.current
            .as_ref()
            .map(|cur| cur.elapsed_ms.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn total_ms(&self) -> Option<u64> {
        self.current.as_ref().map(|_| self.clip_ms)
    }

    fn seek_to(&mut self, position_ms: u64) -> Result<(), AudioError> {
        if let Some(cur) = &self.current {
            cur.elapsed_ms
                .store(position_ms.min(self.clip_ms), Ordering::Relaxed);
        }
        Ok(())
    }

    fn set_volume(&mut self, _volume: u8) {}
}
