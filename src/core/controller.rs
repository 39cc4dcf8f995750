use std::time::{Duration, Instant};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::app::{Outcome, PlaybackEngine};
use crate::audio_worker::{AudioBackend, AudioEvent};
use crate::hardware::{PowerControl, VolumeInput};
use crate::input::{Button, InputEvent};

/// How the control loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    PowerOff,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub poll_interval: Duration,
    /// `None` disables periodic resume saves.
    pub checkpoint_every: Option<Duration>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(20),
            checkpoint_every: Some(Duration::from_secs(30)),
        }
    }
}

/// Maps one button onto exactly one engine operation.
pub fn dispatch<B: AudioBackend>(engine: &mut PlaybackEngine<B>, button: Button) -> Outcome {
    match button {
        Button::PrevTrack => engine.prev_track(),
        Button::Rewind => engine.rewind(),
        Button::PlayPause => engine.play_pause_toggle(),
        Button::FastForward => engine.fast_forward(),
        Button::NextTrack => engine.next_track(),
        Button::NextBook => engine.next_book(),
        Button::ToggleAnnouncements => engine.toggle_announcements(),
        Button::Shutdown => return engine.shutdown_requested(),
    }
    Outcome::Continue
}

/// The single control thread: drains end-of-media notifications and button
/// presses, and samples the volume knob between them.
pub struct Controller<B: AudioBackend> {
    engine: PlaybackEngine<B>,
    rx_audio: mpsc::Receiver<AudioEvent>,
    rx_input: mpsc::Receiver<InputEvent>,
    volume: Box<dyn VolumeInput>,
    power: Box<dyn PowerControl>,
    options: ControllerOptions,
    input_closed: bool,
}

impl<B: AudioBackend> Controller<B> {
    pub fn new(
        engine: PlaybackEngine<B>,
        rx_audio: mpsc::Receiver<AudioEvent>,
        rx_input: mpsc::Receiver<InputEvent>,
        volume: Box<dyn VolumeInput>,
        power: Box<dyn PowerControl>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            engine,
            rx_audio,
            rx_input,
            volume,
            power,
            options,
            input_closed: false,
        }
    }

    pub fn engine(&self) -> &PlaybackEngine<B> {
        &self.engine
    }

    pub async fn run(mut self) -> Exit {
        let mut poll = tokio::time::interval(self.options.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_checkpoint = Instant::now();
        // created once: interrupts arriving between turns stay pending
        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);
        self.poll_volume();
        tracing::info!(state = %self.engine.state(), "control loop started");

        loop {
            let outcome = select! {
                biased;
                maybe_evt = self.rx_audio.recv() => match maybe_evt {
                    Some(evt) => self.engine.on_audio_event(evt),
                    None => {
                        tracing::error!("audio event channel closed");
                        return self.quit();
                    }
                },
                maybe_input = self.rx_input.recv(), if !self.input_closed => match maybe_input {
                    Some(InputEvent::Press(button)) => dispatch(&mut self.engine, button),
                    Some(InputEvent::Quit) => return self.quit(),
                    None => {
                        tracing::info!("button input closed");
                        self.input_closed = true;
                        Outcome::Continue
                    }
                },
                _ = poll.tick() => {
                    self.poll_volume();
                    if let Some(every) = self.options.checkpoint_every
                        && last_checkpoint.elapsed() >= every
                    {
                        last_checkpoint = Instant::now();
                        self.engine.checkpoint();
                    }
                    Outcome::Continue
                }
                _ = &mut interrupt => {
                    tracing::info!("interrupt received");
                    return self.quit();
                }
            };

            if outcome == Outcome::PowerOff {
                return self.power_off();
            }
        }
    }

    /// One control-loop iteration without waiting: used by tests and by
    /// embedders that drive the loop themselves.
    pub fn step(&mut self) -> Option<Exit> {
        while let Ok(evt) = self.rx_audio.try_recv() {
            if self.engine.on_audio_event(evt) == Outcome::PowerOff {
                return Some(self.power_off());
            }
        }
        while let Ok(input) = self.rx_input.try_recv() {
            let outcome = match input {
                InputEvent::Press(button) => dispatch(&mut self.engine, button),
                InputEvent::Quit => return Some(self.quit()),
            };
            if outcome == Outcome::PowerOff {
                return Some(self.power_off());
            }
        }
        self.poll_volume();
        None
    }

    fn poll_volume(&mut self) {
        if let Some(level) = self.volume.read() {
            self.engine.set_volume(level);
        }
    }

    fn quit(&mut self) -> Exit {
        self.engine.suspend();
        Exit::Quit
    }

    fn power_off(&mut self) -> Exit {
        self.engine.power_down_indicators();
        if let Err(e) = self.power.power_off() {
            tracing::error!(err = %e, "power-off command failed");
        }
        Exit::PowerOff
    }
}
