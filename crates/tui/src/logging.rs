use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// `--log` takes the same comma-separated directives as `RUST_LOG` and replaces it.
fn env_filter(filter: Option<String>) -> Result<EnvFilter> {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    match filter {
        Some(filter) => builder
            .parse(&filter)
            .with_context(|| format!("invalid log directive '{}'", filter)),
        None => Ok(builder.from_env_lossy()),
    }
}

/// Log to stderr; used by the one-shot subcommands.
pub fn init_stderr(filter: Option<String>) -> Result<()> {
    let env_filter = env_filter(filter)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}

/// Append logs to `path` so the terminal UI keeps the screen to itself.
pub fn init_file(path: &Path, filter: Option<String>) -> Result<()> {
    let env_filter = env_filter(filter)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file at {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_directive() {
        assert!(env_filter(Some("studyspot=loudest".into())).is_err());
        assert!(env_filter(Some("debug".into())).is_ok());
        assert!(env_filter(None).is_ok());
    }

    #[test]
    fn accepts_comma_separated_directives() {
        assert!(env_filter(Some("info,studyspot_core=debug".into())).is_ok());
        assert!(env_filter(Some("warn,studyspot_core=loudest".into())).is_err());
    }
}
