pub use studyspot_core::config::*;

use crate::cli::Cli;
use crate::timer::TimerMode;

/// Resolve the data directory and settings, then apply any duration and mode flags.
pub fn from_cli(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::discover(cli.data_dir.clone())?;
    let overrides = [
        (TimerMode::Pomodoro, cli.pomodoro_minutes),
        (TimerMode::Short, cli.short_minutes),
        (TimerMode::Long, cli.long_minutes),
    ];
    for (mode, minutes) in overrides {
        if let Some(minutes) = minutes {
            config.override_minutes(mode, minutes)?;
        }
    }
    if let Some(mode) = cli.mode {
        config.set_start_mode(mode);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn flags_override_durations_and_start_mode() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "studyspot",
            "--data-dir",
            data_dir,
            "--short",
            "8",
            "--mode",
            "short",
        ])
        .unwrap();

        let config = from_cli(&cli).unwrap();
        assert_eq!(config.settings().durations.short, 8);
        assert_eq!(config.settings().start_mode, TimerMode::Short);
    }
}
