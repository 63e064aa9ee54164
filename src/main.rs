use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = studyspot::cli::Cli::parse();

    match cli.command.clone() {
        Some(studyspot::cli::CliCommand::Tui) | None => {
            let config = studyspot::config::from_cli(&cli)?;
            // stderr belongs to the terminal UI, so logs go to a file in the data dir
            studyspot::logging::init_file(config.log_path(), cli.log_filter.clone())?;
            studyspot::tui::run(config)?;
        }
        Some(command) => {
            studyspot::logging::init_stderr(cli.log_filter.clone())?;
            let config = studyspot::config::from_cli(&cli)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            studyspot::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
