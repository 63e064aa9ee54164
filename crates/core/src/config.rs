use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timer::{Durations, TimerMode, MAX_MINUTES};

static SETTINGS_FILE_NAME: &str = "settings.json";
static LOG_FILE_NAME: &str = "studyspot.log";
static ENV_DATA_DIR: &str = "STUDYSPOT_DATA_DIR";

pub const DEFAULT_PLAYLIST_URL: &str = "https://soundcloud.com/lofi_girl/sets/sleep-lofi";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "studyspot", "studyspot"));

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    settings_path: PathBuf,
    log_path: PathBuf,
    settings: Settings,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the data directory using the provided override,
    /// environment variables, and platform defaults, then loading `settings.json` if present.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        Self::from_data_dir(data_dir)
    }

    /// Construct [`AppConfig`] directly from a resolved data directory.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        let settings_path = data_dir.join(SETTINGS_FILE_NAME);
        let log_path = data_dir.join(LOG_FILE_NAME);
        let settings = Settings::load(&settings_path)?;
        Ok(Self {
            data_dir,
            settings_path,
            log_path,
            settings,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the configured minutes for `mode`, e.g. from a command-line flag.
    pub fn override_minutes(&mut self, mode: TimerMode, minutes: u32) -> Result<(), SettingsError> {
        if minutes == 0 {
            return Err(SettingsError::NonPositiveMinutes { mode });
        }
        if minutes > MAX_MINUTES {
            return Err(SettingsError::TooManyMinutes { mode });
        }
        self.settings.durations.set_minutes(mode, minutes);
        Ok(())
    }

    /// Mode the timer shows when the workspace opens.
    pub fn set_start_mode(&mut self, mode: TimerMode) {
        self.settings.start_mode = mode;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{mode} duration must be at least one minute")]
    NonPositiveMinutes { mode: TimerMode },
    #[error("{mode} duration cannot exceed {MAX_MINUTES} minutes")]
    TooManyMinutes { mode: TimerMode },
}

/// Minutes per timer mode as written in `settings.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationMinutes {
    pub pomodoro: u32,
    pub short: u32,
    pub long: u32,
}

impl Default for DurationMinutes {
    fn default() -> Self {
        Self {
            pomodoro: 25,
            short: 5,
            long: 10,
        }
    }
}

impl DurationMinutes {
    fn set_minutes(&mut self, mode: TimerMode, minutes: u32) {
        match mode {
            TimerMode::Pomodoro => self.pomodoro = minutes,
            TimerMode::Short => self.short = minutes,
            TimerMode::Long => self.long = minutes,
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        for mode in TimerMode::ALL {
            match self.minutes_for(mode) {
                0 => return Err(SettingsError::NonPositiveMinutes { mode }),
                m if m > MAX_MINUTES => return Err(SettingsError::TooManyMinutes { mode }),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Pomodoro => self.pomodoro,
            TimerMode::Short => self.short,
            TimerMode::Long => self.long,
        }
    }

    pub fn to_durations(&self) -> Durations {
        Durations::from_minutes(self.pomodoro, self.short, self.long)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub durations: DurationMinutes,
    pub start_mode: TimerMode,
    pub playlist_url: String,
    pub tracks: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            durations: DurationMinutes::default(),
            start_mode: TimerMode::Pomodoro,
            playlist_url: DEFAULT_PLAYLIST_URL.to_string(),
            tracks: vec![
                "Sleep Lofi".to_string(),
                "Midnight Study".to_string(),
                "Rainy Window".to_string(),
            ],
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings at {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings at {}", path.display()))?;
        settings
            .durations
            .validate()
            .with_context(|| format!("Invalid durations in {}", path.display()))?;
        Ok(settings)
    }
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-studyspot");
        return Ok(dev_dir);
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".studyspot"));
    }

    Ok(env::current_dir()?.join(".studyspot"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();

        assert_eq!(config.settings(), &Settings::default());
        assert_eq!(config.settings_path(), dir.path().join("settings.json"));
        assert_eq!(config.log_path(), dir.path().join("studyspot.log"));
    }

    #[test]
    fn partial_settings_file_keeps_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("settings.json"),
            r#"{ "durations": { "pomodoro": 50 } }"#,
        )
        .unwrap();

        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();
        let durations = config.settings().durations;
        assert_eq!(durations.pomodoro, 50);
        assert_eq!(durations.short, 5);
        assert_eq!(durations.long, 10);
        assert_eq!(config.settings().playlist_url, DEFAULT_PLAYLIST_URL);
    }

    #[test]
    fn zero_minutes_in_settings_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("settings.json"),
            r#"{ "durations": { "short": 0 } }"#,
        )
        .unwrap();

        let err = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap_err();
        assert!(format!("{err:#}").contains("short duration must be at least one minute"));
    }

    #[test]
    fn malformed_settings_file_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

        let err = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
    }

    #[test]
    fn override_minutes_rejects_zero() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();

        assert_eq!(
            config.override_minutes(TimerMode::Long, 0),
            Err(SettingsError::NonPositiveMinutes {
                mode: TimerMode::Long
            })
        );
        config.override_minutes(TimerMode::Long, 15).unwrap();
        assert_eq!(config.settings().durations.long, 15);
    }

    #[test]
    fn override_minutes_rejects_values_past_the_cap() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();

        assert_eq!(
            config.override_minutes(TimerMode::Short, MAX_MINUTES + 1),
            Err(SettingsError::TooManyMinutes {
                mode: TimerMode::Short
            })
        );
        assert_eq!(
            config.override_minutes(TimerMode::Long, 100_000_000),
            Err(SettingsError::TooManyMinutes {
                mode: TimerMode::Long
            })
        );
        assert_eq!(config.settings().durations, DurationMinutes::default());

        config.override_minutes(TimerMode::Short, MAX_MINUTES).unwrap();
        assert_eq!(config.settings().durations.short, MAX_MINUTES);
    }

    #[test]
    fn start_mode_reads_from_settings_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("settings.json"),
            r#"{ "start_mode": "long" }"#,
        )
        .unwrap();

        let mut config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(config.settings().start_mode, TimerMode::Long);

        config.set_start_mode(TimerMode::Short);
        assert_eq!(config.settings().start_mode, TimerMode::Short);
    }

    #[test]
    fn discover_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("data");
        let config = AppConfig::discover(Some(nested.clone())).unwrap();

        assert!(nested.exists());
        assert_eq!(config.data_dir(), nested.as_path());
    }
}
