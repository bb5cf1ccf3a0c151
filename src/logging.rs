//! File logging for the dashboard. The terminal belongs to the TUI, so
//! events only ever go to the configured file.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::level_filters::LevelFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber described by `config`. Disabled logging
/// installs nothing, so every event is dropped.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let level = parse_level(&config.level);
    let file = open_log_file(&config.file)?;
    let writer = Mutex::new(file);

    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_thread_names(true)
        .with_writer(writer);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;

    tracing::info!(file = %config.file.display(), %level, "logging initialised");
    Ok(())
}

/// Unknown names fall back to `info`.
pub fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" | "warning" => LevelFilter::WARN,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN "), LevelFilter::WARN);
        assert_eq!(parse_level("off"), LevelFilter::OFF);
        assert_eq!(parse_level("loud"), LevelFilter::INFO);
    }

    #[test]
    fn log_file_and_parents_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/sysdash.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn disabled_logging_installs_nothing() {
        let config = LoggingConfig {
            enabled: false,
            file: "/nonexistent/dir/never.log".into(),
            level: "info".into(),
            json: false,
        };
        init(&config).unwrap();
        assert!(!Path::new("/nonexistent/dir/never.log").exists());
    }
}
