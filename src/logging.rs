//! Logging configuration for spanner-cli.
//!
//! With `--debug`, debug-level logs go to a file so they never mix with
//! query output. Otherwise logs go to stderr, filtered by `RUST_LOG` and off
//! by default.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEBUG_FILTER: &str = "spanner_cli=debug,info";
const DEFAULT_FILTER: &str = "off";

/// Initializes logging for `--debug` runs.
///
/// Logs are written to a file, truncated on each run.
/// Location: `~/.local/state/spanner-cli/spanner-cli.log` on Linux (XDG state
/// directory), or the platform-appropriate state/config directory elsewhere.
pub fn init_file_logging() {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            return;
        }
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEBUG_FILTER)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    tracing::debug!("Initialized the logger for debug");
}

/// Initializes logging to stderr.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Initializes the logger for this run.
pub fn init(debug: bool) {
    if debug {
        init_file_logging();
    } else {
        init_stderr_logging();
    }
}

/// Returns the path for the log file.
///
/// Uses XDG state directory on Linux (`~/.local/state/spanner-cli/spanner-cli.log`),
/// or falls back to config directory on other platforms.
pub fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("spanner-cli").join("spanner-cli.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("spanner-cli").join("spanner-cli.log");
    }

    std::env::temp_dir().join("spanner-cli.log")
}
