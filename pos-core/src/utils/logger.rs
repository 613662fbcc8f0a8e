//! Logging Infrastructure
//!
//! Structured logging with an env-driven filter, optional JSON output and
//! daily rolling files.

use anyhow::Context;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "pos-core";

/// Initialize the logger with defaults (info, human readable, stdout only)
pub fn init_logger() {
    if let Err(e) = init_logger_with_file(None, None, None) {
        eprintln!("logger not initialized: {e:#}");
    }
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` overrides `log_level` when set. File output is always JSON so
/// it can be shipped as-is.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: Option<bool>,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log filter: {level}"))?;

    let stdout_layer = if json.unwrap_or(false) {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer()
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log dir {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(appender)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("global subscriber already set")?;

    Ok(())
}

/// Remove rolled log files older than `days`. Returns the number removed.
pub fn cleanup_old_logs(log_dir: &Path, days: u64) -> std::io::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }
    let max_age = Duration::from_secs(days.saturating_mul(24 * 60 * 60));
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let is_ours = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX));
        if !is_ours || !entry.file_type()?.is_file() {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if now.duration_since(modified).unwrap_or_default() > max_age {
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    if removed > 0 {
        tracing::info!(removed, dir = %log_dir.display(), "Removed old log files");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(cleanup_old_logs(&missing, 7).unwrap(), 0);
    }

    #[test]
    fn test_cleanup_keeps_recent_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pos-core.2026-01-01"), b"{}").unwrap();
        std::fs::write(dir.path().join("other.log"), b"x").unwrap();

        // Fresh files are younger than any positive window
        assert_eq!(cleanup_old_logs(dir.path(), 1).unwrap(), 0);
        assert!(dir.path().join("pos-core.2026-01-01").exists());
        assert!(dir.path().join("other.log").exists());
    }
}
