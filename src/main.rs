use bookreader::app::{EngineOptions, MediaLayout, PlaybackEngine};
use bookreader::audio_worker::{AudioBackend, AudioEvent, NullBackend, RodioBackend};
use bookreader::cli::{Cli, Command};
use bookreader::core::{Controller, ControllerOptions, Exit};
use bookreader::error::{AppError, PlaybackError};
use bookreader::hardware::{
    AdcVolume, CommandPower, FixedVolume, LogOnlyPower, PowerControl, SysfsLeds, VolumeInput,
    VolumeKnob,
};
use bookreader::input::{self, Button, InputEvent, TerminalGuard};
use bookreader::logging::{self, LogConfig};
use bookreader::renamer::{self, RenameOptions};
use bookreader::resume::{
    ConfigDocument, DiscardResume, FileResumeStore, Library, ResumeSink, load_library,
};
use bookreader::settings::{
    AppSettings, default_data_dir, default_settings_path, load_settings, save_settings,
};
use bookreader::storage::{MountedStorage, StorageProvider};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// Everything the engine needs besides the audio backend.
struct Parts {
    layout: MediaLayout,
    library: Result<Library, PlaybackError>,
    resume: Box<dyn ResumeSink>,
    volume: Box<dyn VolumeInput>,
    power: Box<dyn PowerControl>,
    settings: AppSettings,
    rx_audio: mpsc::Receiver<AudioEvent>,
    rx_input: mpsc::Receiver<InputEvent>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let _log_guard = logging::init(
        &data_dir,
        LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );

    if let Some(Command::Rename { dir, dry_run, yes }) = &cli.command {
        return rename_book(dir, RenameOptions {
            dry_run: *dry_run,
            assume_yes: *yes,
        });
    }

    let settings_path = cli.settings.clone().unwrap_or_else(default_settings_path);
    let mut settings = load_settings(&settings_path);
    settings.validate()?;
    if !settings_path.exists() {
        // leave an editable copy of the defaults behind
        if let Err(e) = save_settings(&settings_path, &settings) {
            tracing::warn!(path = %settings_path.display(), err = %e, "could not write default settings");
        }
    }
    if let Some(root) = cli.root.clone() {
        settings.storage_roots = vec![root];
    }
    tracing::info!(
        settings = %settings_path.display(),
        vkb = cli.vkb,
        no_audio = cli.no_audio,
        "bookreader starting"
    );

    let (tx_audio, rx_audio) = mpsc::channel::<AudioEvent>(16);
    let (tx_input, rx_input) = mpsc::channel::<InputEvent>(32);

    let storage = MountedStorage::new(settings.storage_roots.clone(), settings.config_file.clone());
    let root = storage.locate();
    let (library, resume): (Result<Library, PlaybackError>, Box<dyn ResumeSink>) = match &root {
        Some(root) => {
            let path = storage.config_path(root);
            match ConfigDocument::load(&path) {
                Ok(doc) => {
                    let library = load_library(&doc);
                    let store = FileResumeStore::new(path, doc, settings.resume_threshold_ms);
                    (library, Box::new(store))
                }
                Err(e) => (Err(PlaybackError::from(e)), Box::new(DiscardResume)),
            }
        }
        None => (Err(PlaybackError::StorageAbsent), Box::new(DiscardResume)),
    };
    let layout = MediaLayout::new(
        root.unwrap_or_else(PathBuf::new),
        settings.messages_dir.clone(),
        settings.zero_pad_tracks,
    );

    let power: Box<dyn PowerControl> = if cli.no_poweroff {
        Box::new(LogOnlyPower)
    } else {
        match CommandPower::new(&settings.poweroff_command) {
            Some(cmd) => Box::new(cmd),
            None => {
                tracing::warn!("empty poweroff_command, power-off disabled");
                Box::new(LogOnlyPower)
            }
        }
    };

    let knob = VolumeKnob::new(settings.initial_volume);
    let volume: Box<dyn VolumeInput> = if cli.vkb {
        Box::new(knob.clone())
    } else if let Some(path) = settings.volume_adc_path.clone() {
        Box::new(AdcVolume::new(path, settings.volume_adc_max))
    } else {
        Box::new(FixedVolume(settings.initial_volume))
    };

    let _terminal = if cli.vkb {
        print_key_help();
        let guard = TerminalGuard::enter()?;
        input::spawn_keyboard_input(tx_input, knob)?;
        Some(guard)
    } else {
        input::spawn_line_input(tx_input)?;
        None
    };

    let parts = Parts {
        layout,
        library,
        resume,
        volume,
        power,
        settings,
        rx_audio,
        rx_input,
    };

    let exit = if cli.no_audio {
        run_player(NullBackend::new(tx_audio, cli.simulated_clip_ms), parts).await
    } else {
        run_player(RodioBackend::open_default(tx_audio)?, parts).await
    };
    tracing::info!(?exit, "bookreader stopped");
    Ok(())
}

async fn run_player<B: AudioBackend>(backend: B, parts: Parts) -> Exit {
    let Parts {
        layout,
        library,
        resume,
        volume,
        power,
        settings,
        rx_audio,
        rx_input,
    } = parts;

    let indicator = SysfsLeds::new(settings.ready_led.clone(), settings.state_led.clone());
    let mut engine = PlaybackEngine::new(
        backend,
        layout,
        resume,
        Box::new(indicator),
        EngineOptions {
            track_jump_ms: settings.track_jump_ms,
            initial_volume: settings.initial_volume,
        },
    );
    engine.boot(library);

    let checkpoint_every =
        (settings.checkpoint_secs > 0).then(|| Duration::from_secs(settings.checkpoint_secs));
    let controller = Controller::new(
        engine,
        rx_audio,
        rx_input,
        volume,
        power,
        ControllerOptions {
            poll_interval: Duration::from_millis(settings.poll_interval_ms.max(1)),
            checkpoint_every,
        },
    );
    controller.run().await
}

fn rename_book(dir: &Path, options: RenameOptions) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let outcome = renamer::run(dir, options, &mut stdin.lock(), &mut stdout)?;
    tracing::info!(dir = %dir.display(), ?outcome, "rename finished");
    Ok(())
}

fn print_key_help() {
    println!("bookreader keyboard mode");
    for button in Button::ALL {
        println!("  {}  {}", button.key(), button.name());
    }
    println!("  +/-  volume");
    println!("  Esc  quit");
}
