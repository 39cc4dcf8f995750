mod common;

use bookreader::audio_worker::AudioEvent;
use bookreader::core::{Controller, ControllerOptions, Exit};
use bookreader::domain::{PlayerState, Position};
use bookreader::hardware::{FixedVolume, VolumeKnob};
use bookreader::input::{Button, InputEvent};
use common::*;
use tokio::sync::mpsc;

struct Rig {
    controller: Controller<FakeBackend>,
    tx_audio: mpsc::Sender<AudioEvent>,
    tx_input: mpsc::Sender<InputEvent>,
    power: RecordingPower,
    leds: RecordingLeds,
    resume: MemoryResume,
}

fn rig(h: Harness, knob: VolumeKnob) -> Rig {
    let (tx_audio, rx_audio) = mpsc::channel(8);
    let (tx_input, rx_input) = mpsc::channel(8);
    let power = RecordingPower::default();
    let Harness {
        engine,
        resume,
        leds,
    } = h;
    let controller = Controller::new(
        engine,
        rx_audio,
        rx_input,
        Box::new(knob),
        Box::new(power.clone()),
        ControllerOptions::default(),
    );
    Rig {
        controller,
        tx_audio,
        tx_input,
        power,
        leds,
        resume,
    }
}

fn press(r: &Rig, button: Button) {
    r.tx_input
        .try_send(InputEvent::Press(button))
        .expect("send button");
}

#[test]
fn end_events_drive_announcements_to_the_track() {
    let h = booted(vec![3], record(1, 2, 0, true));
    let mut r = rig(h, VolumeKnob::new(80));

    while r.controller.engine().state() != PlayerState::Playing {
        let Some(play_id) = r.controller.engine().current_play_id() else {
            panic!("nothing loaded");
        };
        r.tx_audio
            .try_send(AudioEvent::Ended { play_id })
            .expect("send end");
        assert_eq!(r.controller.step(), None);
    }
    assert_eq!(r.controller.engine().backend().last_opened(), Some(track(1, 2)));
}

#[test]
fn buttons_map_to_engine_operations() {
    let h = booted(vec![3, 5], record(1, 1, 0, false));
    let mut r = rig(h, VolumeKnob::new(80));

    press(&r, Button::NextTrack);
    assert_eq!(r.controller.step(), None);
    assert_eq!(r.controller.engine().position(), Position::new(1, 2));

    press(&r, Button::NextBook);
    assert_eq!(r.controller.step(), None);
    assert_eq!(r.controller.engine().position(), Position::new(2, 1));

    press(&r, Button::PrevTrack);
    assert_eq!(r.controller.step(), None);
    assert_eq!(r.controller.engine().position(), Position::new(2, 5));

    press(&r, Button::PlayPause);
    assert_eq!(r.controller.step(), None);
    assert_eq!(r.controller.engine().state(), PlayerState::Paused);
}

#[test]
fn knob_level_is_applied_on_each_step() {
    let knob = VolumeKnob::new(80);
    let h = booted(vec![3], record(1, 1, 0, false));
    let mut r = rig(h, knob.clone());

    knob.turn(-30);
    assert_eq!(r.controller.step(), None);
    assert_eq!(r.controller.engine().volume(), 50);
    assert_eq!(r.controller.engine().backend().volumes.last(), Some(&50));
}

#[test]
fn quiet_shutdown_powers_off() {
    let h = booted(vec![3], record(1, 1, 0, false));
    let mut r = rig(h, VolumeKnob::new(80));

    press(&r, Button::Shutdown);
    assert_eq!(r.controller.step(), Some(Exit::PowerOff));
    assert!(r.power.called());
    assert_eq!(r.leds.ready.lock().expect("lock").last(), Some(&false));
    assert!(!r.resume.records().is_empty());
}

#[test]
fn announced_shutdown_waits_for_farewell() {
    let h = booted(vec![3], record(1, 1, 0, false));
    let mut r = rig(h, VolumeKnob::new(80));
    press(&r, Button::ToggleAnnouncements);
    assert_eq!(r.controller.step(), None);

    press(&r, Button::Shutdown);
    assert_eq!(r.controller.step(), None);
    assert!(!r.power.called());

    let Some(play_id) = r.controller.engine().current_play_id() else {
        panic!("farewell not loaded");
    };
    r.tx_audio
        .try_send(AudioEvent::Ended { play_id })
        .expect("send end");
    assert_eq!(r.controller.step(), Some(Exit::PowerOff));
    assert!(r.power.called());
}

#[test]
fn quit_suspends_without_power_off() {
    let h = booted(vec![3], record(1, 1, 0, false));
    let mut r = rig(h, VolumeKnob::new(80));
    let saved = r.resume.records().len();

    r.tx_input.try_send(InputEvent::Quit).expect("send quit");
    assert_eq!(r.controller.step(), Some(Exit::Quit));
    assert!(!r.power.called());
    assert_eq!(r.resume.records().len(), saved + 1);
    assert!(!r.controller.engine().backend().playing);
}

#[tokio::test]
async fn run_returns_on_quit() {
    let (tx_audio, rx_audio) = mpsc::channel(8);
    let (tx_input, rx_input) = mpsc::channel(8);
    let h = booted(vec![3], record(1, 1, 0, false));
    let controller = Controller::new(
        h.engine,
        rx_audio,
        rx_input,
        Box::new(FixedVolume(60)),
        Box::new(RecordingPower::default()),
        ControllerOptions::default(),
    );
    tx_input.send(InputEvent::Quit).await.expect("send quit");

    assert_eq!(controller.run().await, Exit::Quit);
    drop(tx_audio);
}

#[tokio::test]
async fn run_keeps_listening_across_many_events() {
    let (_tx_audio, rx_audio) = mpsc::channel(8);
    let (tx_input, rx_input) = mpsc::channel(8);
    let h = booted(vec![5], record(1, 1, 0, false));
    let resume = h.resume.clone();
    let controller = Controller::new(
        h.engine,
        rx_audio,
        rx_input,
        Box::new(FixedVolume(60)),
        Box::new(RecordingPower::default()),
        ControllerOptions::default(),
    );
    for _ in 0..3 {
        tx_input
            .send(InputEvent::Press(Button::NextTrack))
            .await
            .expect("send button");
    }
    tx_input.send(InputEvent::Quit).await.expect("send quit");

    assert_eq!(controller.run().await, Exit::Quit);
    assert_eq!(resume.last().map(|r| r.track), Some(4));
}

#[tokio::test]
async fn run_powers_off_after_shutdown_button() {
    let (_tx_audio, rx_audio) = mpsc::channel(8);
    let (tx_input, rx_input) = mpsc::channel(8);
    let h = booted(vec![3], record(1, 1, 0, false));
    let power = RecordingPower::default();
    let controller = Controller::new(
        h.engine,
        rx_audio,
        rx_input,
        Box::new(FixedVolume(60)),
        Box::new(power.clone()),
        ControllerOptions::default(),
    );
    tx_input
        .send(InputEvent::Press(Button::Shutdown))
        .await
        .expect("send shutdown");

    assert_eq!(controller.run().await, Exit::PowerOff);
    assert!(power.called());
}
