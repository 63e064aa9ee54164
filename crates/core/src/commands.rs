use std::path::PathBuf;

use serde::Serialize;

use crate::config::AppConfig;
use crate::timer::{format_countdown, TimerMode};

#[derive(Debug, Clone, Serialize)]
pub struct ModeReport {
    pub mode: TimerMode,
    pub minutes: u32,
    pub display: String,
}

/// Resolved configuration as printed by `studyspot config`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub data_dir: PathBuf,
    pub settings_file: PathBuf,
    pub settings_file_present: bool,
    pub log_file: PathBuf,
    pub modes: Vec<ModeReport>,
    pub start_mode: TimerMode,
    pub playlist_url: String,
    pub tracks: Vec<String>,
}

pub fn describe_config(config: &AppConfig) -> ConfigReport {
    let settings = config.settings();
    let durations = settings.durations.to_durations();
    let modes = TimerMode::ALL
        .into_iter()
        .map(|mode| ModeReport {
            mode,
            minutes: durations.minutes_for(mode),
            display: format_countdown(durations.seconds_for(mode)),
        })
        .collect();

    ConfigReport {
        data_dir: config.data_dir().to_path_buf(),
        settings_file: config.settings_path().to_path_buf(),
        settings_file_present: config.settings_path().exists(),
        log_file: config.log_path().to_path_buf(),
        modes,
        start_mode: settings.start_mode,
        playlist_url: settings.playlist_url.clone(),
        tracks: settings.tracks.clone(),
    }
}
