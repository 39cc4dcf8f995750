use crate::error::SettingsError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    // Storage / media layout
    #[serde(default = "default_storage_roots")]
    pub storage_roots: Vec<PathBuf>,
    #[serde(default = "default_config_file")]
    pub config_file: String,
    #[serde(default = "default_messages_dir")]
    pub messages_dir: PathBuf,
    #[serde(default = "default_zero_pad_tracks")]
    pub zero_pad_tracks: bool,

    // Playback
    #[serde(default = "default_track_jump_ms")]
    pub track_jump_ms: u64,
    #[serde(default = "default_resume_threshold_ms")]
    pub resume_threshold_ms: u64,
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    // Poll loop
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_checkpoint_secs")]
    pub checkpoint_secs: u64,

    // Hardware
    #[serde(default)]
    pub volume_adc_path: Option<PathBuf>,
    #[serde(default = "default_volume_adc_max")]
    pub volume_adc_max: u32,
    #[serde(default)]
    pub ready_led: Option<PathBuf>,
    #[serde(default)]
    pub state_led: Option<PathBuf>,
    #[serde(default = "default_poweroff_command")]
    pub poweroff_command: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            storage_roots: default_storage_roots(),
            config_file: default_config_file(),
            messages_dir: default_messages_dir(),
            zero_pad_tracks: default_zero_pad_tracks(),
            track_jump_ms: default_track_jump_ms(),
            resume_threshold_ms: default_resume_threshold_ms(),
            initial_volume: default_initial_volume(),
            poll_interval_ms: default_poll_interval_ms(),
            checkpoint_secs: default_checkpoint_secs(),
            volume_adc_path: None,
            volume_adc_max: default_volume_adc_max(),
            ready_led: None,
            state_led: None,
            poweroff_command: default_poweroff_command(),
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.initial_volume > 100 {
            return Err(SettingsError::InvalidValue(format!(
                "initial_volume must be 0-100, got {}",
                self.initial_volume
            )));
        }
        if self.volume_adc_max == 0 {
            return Err(SettingsError::InvalidValue(
                "volume_adc_max must be positive".to_owned(),
            ));
        }
        if self.config_file.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "config_file must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

// serde default helpers
fn default_storage_roots() -> Vec<PathBuf> { vec![PathBuf::from("/media/RPI")] }
fn default_config_file() -> String { "config.ini".to_owned() }
fn default_messages_dir() -> PathBuf { PathBuf::from("/home/pi/books") }
fn default_zero_pad_tracks() -> bool { true }
fn default_track_jump_ms() -> u64 { 15_000 }
fn default_resume_threshold_ms() -> u64 { 60_000 }
fn default_initial_volume() -> u8 { 100 }
fn default_poll_interval_ms() -> u64 { 20 }
fn default_checkpoint_secs() -> u64 { 30 }
fn default_volume_adc_max() -> u32 { 1023 }
fn default_poweroff_command() -> Vec<String> { vec!["sudo".to_owned(), "poweroff".to_owned()] }

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "bookreader", "bookreader")
}

pub fn default_settings_path() -> PathBuf {
    project_dirs()
        .map(|p| p.config_dir().join("settings.toml"))
        .unwrap_or_else(|| PathBuf::from("/etc/bookreader/settings.toml"))
}

/// Home of the log directory unless `--data-dir` says otherwise.
pub fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("bookreader"))
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings(path: &Path) -> AppSettings {
    let Ok(text) = fs::read_to_string(path) else {
        return AppSettings::default();
    };
    match toml::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %path.display(), err = %e, "settings file unreadable, using defaults");
            AppSettings::default()
        }
    }
}

pub fn save_settings(path: &Path, s: &AppSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SettingsError::Save { source })?;
    }
    let text = toml::to_string_pretty(s).map_err(|source| SettingsError::Serialize { source })?;
    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, text).map_err(|source| SettingsError::Save { source })?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(path);
        fs::rename(&tmp, path).map_err(|_| SettingsError::Save { source: e })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_device_layout() {
        let s = AppSettings::default();
        assert_eq!(s.storage_roots, vec![PathBuf::from("/media/RPI")]);
        assert_eq!(s.track_jump_ms, 15_000);
        assert_eq!(s.resume_threshold_ms, 60_000);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let s: AppSettings = toml::from_str("track_jump_ms = 30000\n").expect("parse");
        assert_eq!(s.track_jump_ms, 30_000);
        assert_eq!(s.config_file, "config.ini");
        assert_eq!(s.poweroff_command, vec!["sudo", "poweroff"]);
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        let s = AppSettings {
            initial_volume: 150,
            ..AppSettings::default()
        };
        assert!(s.validate().is_err());
    }
}
