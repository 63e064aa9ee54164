use std::path::PathBuf;

use clap::{value_parser, Args, Parser, Subcommand};

use crate::timer::TimerMode;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "studyspot",
    version,
    about = "A focus timer, todo list, clock, and music remote for the terminal.",
    after_help = "Examples:\n  studyspot                 Launch the TUI (same as `studyspot tui`)\n  studyspot --pomodoro 50 --short 10\n  studyspot --mode short\n  studyspot config --json\n  studyspot --log debug tui"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "debug", or "info,studyspot_core=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    /// Pomodoro length in minutes (overrides settings.json)
    #[arg(long = "pomodoro", value_name = "MINUTES", global = true, value_parser = value_parser!(u32).range(1..=999))]
    pub pomodoro_minutes: Option<u32>,

    /// Short break length in minutes (overrides settings.json)
    #[arg(long = "short", value_name = "MINUTES", global = true, value_parser = value_parser!(u32).range(1..=999))]
    pub short_minutes: Option<u32>,

    /// Long break length in minutes (overrides settings.json)
    #[arg(long = "long", value_name = "MINUTES", global = true, value_parser = value_parser!(u32).range(1..=999))]
    pub long_minutes: Option<u32>,

    /// Mode the timer opens in (overrides settings.json)
    #[arg(long, value_enum, value_name = "MODE", global = true)]
    pub mode: Option<TimerMode>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Print the resolved configuration and exit
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Emit JSON instead of a human-readable summary
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duration_overrides_after_subcommand() {
        let cli = Cli::try_parse_from(["studyspot", "config", "--short", "7", "--json"]).unwrap();
        assert_eq!(cli.short_minutes, Some(7));
        assert!(matches!(cli.command, Some(CliCommand::Config(ConfigArgs { json: true }))));
    }

    #[test]
    fn parses_start_mode() {
        let cli = Cli::try_parse_from(["studyspot", "tui", "--mode", "long"]).unwrap();
        assert_eq!(cli.mode, Some(TimerMode::Long));
        assert!(Cli::try_parse_from(["studyspot", "--mode", "nap"]).is_err());
    }

    #[test]
    fn rejects_zero_minutes() {
        assert!(Cli::try_parse_from(["studyspot", "--pomodoro", "0"]).is_err());
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["studyspot"]).unwrap();
        assert!(cli.command.is_none());
    }
}
