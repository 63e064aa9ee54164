use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::{CliCommand, ConfigArgs};
use crate::config::AppConfig;
use crate::core::commands::{describe_config, ConfigReport};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Config(args) => handle_config(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_config<W: Write>(config: &AppConfig, args: &ConfigArgs, mut writer: W) -> Result<()> {
    let report = describe_config(config);
    if args.json {
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
    } else {
        write_summary(&report, &mut writer)?;
    }
    Ok(())
}

fn write_summary<W: Write>(report: &ConfigReport, mut writer: W) -> Result<()> {
    writeln!(writer, "Data directory: {}", report.data_dir.display())?;
    writeln!(
        writer,
        "Settings file:  {}{}",
        report.settings_file.display(),
        if report.settings_file_present {
            ""
        } else {
            " (not found, using defaults)"
        }
    )?;
    writeln!(writer, "Log file:       {}", report.log_file.display())?;
    writeln!(writer, "Durations:")?;
    for mode in &report.modes {
        writeln!(
            writer,
            "  {:<9} {:>3} min ({})",
            mode.mode.as_str(),
            mode.minutes,
            mode.display
        )?;
    }
    writeln!(writer, "Start mode:     {}", report.start_mode)?;
    writeln!(writer, "Playlist:       {}", report.playlist_url)?;
    if !report.tracks.is_empty() {
        writeln!(writer, "Tracks:         {}", report.tracks.join(", "))?;
    }
    Ok(())
}
