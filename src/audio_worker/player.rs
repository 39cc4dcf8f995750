use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

use super::backend::AudioBackend;
use super::messages::AudioEvent;
use crate::error::AudioError;

struct ActiveSink {
    sink: Arc<Sink>,
    end_cancel: Arc<AtomicBool>,
}

/// Plays files through the default output device.
pub struct RodioBackend {
    mixer: Mixer,
    #[allow(dead_code)]
    stream: OutputStream,
    tx_evt: mpsc::Sender<AudioEvent>,
    current: Option<ActiveSink>,
    path: Option<PathBuf>,
    play_id: u64,
    paused: bool,
    volume: u8,
    // position the current sink started at; the sink counts from zero
    base_ms: u64,
    total_ms: Option<u64>,
}

impl RodioBackend {
    pub fn open_default(tx_evt: mpsc::Sender<AudioEvent>) -> Result<Self, AudioError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::OutputStream(e.to_string()))?;
        let mixer = stream.mixer().clone();
        tracing::info!("audio output opened");
        Ok(Self {
            mixer,
            stream,
            tx_evt,
            current: None,
            path: None,
            play_id: 0,
            paused: true,
            volume: 100,
            base_ms: 0,
            total_ms: None,
        })
    }

    fn next_play_id(&mut self) -> u64 {
        self.play_id = self.play_id.wrapping_add(1).max(1);
        self.play_id
    }

    fn stop_current(&mut self) {
        if let Some(cur) = self.current.take() {
            tracing::debug!(play_id = self.play_id, "stopping sink, cancelling end watcher");
            cur.end_cancel.store(true, Ordering::Relaxed);
            cur.sink.stop();
        }
    }

    fn current_sink(&self) -> Option<&Arc<Sink>> {
        self.current.as_ref().map(|cur| &cur.sink)
    }

    /// Starts a watcher thread that reports the sink running dry, unless
    /// the sink is replaced first.
    fn attach_sink(&mut self, sink: Arc<Sink>) {
        let play_id = self.play_id;
        let tx_end = self.tx_evt.clone();
        let cancel = Arc::new(AtomicBool::new(false));
        let sink_end = Arc::clone(&sink);
        let cancel_end = Arc::clone(&cancel);

        let spawned = thread::Builder::new()
            .name(format!("audio-end-check-{play_id}"))
            .spawn(move || {
                sink_end.sleep_until_end();
                if cancel_end.load(Ordering::Relaxed) {
                    tracing::debug!(play_id, "end watcher cancelled");
                    return;
                }
                tracing::debug!(play_id, "media reached its end");
                let _ = tx_end.blocking_send(AudioEvent::Ended { play_id });
            });
        if let Err(e) = spawned {
            tracing::error!(play_id, err = %e, "failed to spawn end watcher");
        }

        self.current = Some(ActiveSink {
            sink,
            end_cancel: cancel,
        });
    }

    fn build_sink(&self, path: &Path, start_ms: u64) -> Result<(Sink, Option<u64>), AudioError> {
        build_sink_from_path(&self.mixer, path, start_ms)
    }
}

impl AudioBackend for RodioBackend {
    fn open(&mut self, path: &Path, start_ms: u64) -> Result<u64, AudioError> {
        self.stop_current();
        self.path = None;
        let (sink, total_ms) = self.build_sink(path, start_ms)?;
        let play_id = self.next_play_id();
        sink.set_volume(f32::from(self.volume) / 100.0);
        self.paused = true;
        self.base_ms = start_ms;
        self.total_ms = total_ms;
        self.path = Some(path.to_path_buf());
        self.attach_sink(Arc::new(sink));
        tracing::debug!(play_id, path = %path.display(), start_ms, ?total_ms, "media opened");
        Ok(play_id)
    }

    fn play(&mut self) {
        if let Some(cur) = &self.current {
            cur.sink.play();
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        if let Some(cur) = &self.current {
            cur.sink.pause();
            self.paused = true;
        }
    }

    fn stop(&mut self) {
        self.stop_current();
        self.path = None;
        self.paused = true;
        self.base_ms = 0;
        self.total_ms = None;
    }

    fn is_playing(&self) -> bool {
        self.current_sink()
            .is_some_and(|sink| !self.paused && !sink.empty())
    }

    fn elapsed_ms(&self) -> u64 {
        let pos = self
            .current_sink()
            .map(|sink| sink.get_pos().as_millis() as u64)
            .unwrap_or(0);
        self.base_ms + pos
    }

    fn total_ms(&self) -> Option<u64> {
        self.total_ms
    }

    /// Rebuilds the sink at the target so the position stays exact; the
    /// play id is kept, the old end watcher is cancelled.
    fn seek_to(&mut self, position_ms: u64) -> Result<(), AudioError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        self.stop_current();
        let (sink, _total) = self.build_sink(&path, position_ms)?;
        sink.set_volume(f32::from(self.volume) / 100.0);
        if self.paused {
            sink.pause();
        } else {
            sink.play();
        }
        self.base_ms = position_ms;
        self.attach_sink(Arc::new(sink));
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if let Some(sink) = self.current_sink() {
            sink.set_volume(f32::from(self.volume) / 100.0);
        }
    }
}

fn build_sink_from_path(
    mixer: &Mixer,
    path: &Path,
    start_ms: u64,
) -> Result<(Sink, Option<u64>), AudioError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            AudioError::FileNotFound(path.to_path_buf())
        } else {
            AudioError::OpenFile {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    let total_ms = decoder.total_duration().map(|d| d.as_millis() as u64);
    let source: Box<dyn Source + Send> = if start_ms > 0 {
        Box::new(decoder.skip_duration(Duration::from_millis(start_ms)))
    } else {
        Box::new(decoder)
    };

    let sink = Sink::connect_new(mixer);
    sink.pause();
    sink.append(source);
    Ok((sink, total_ms))
}
