//! Opening URLs in the system browser.
//!
//! Platform integration:
//! - `$BROWSER` if set
//! - macOS: `open`
//! - Windows: `cmd /C start`
//! - elsewhere: `xdg-open`

use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::error::{Result, SpannerCliError};

const BROWSER_ENV: &str = "BROWSER";

/// Returns the program and leading arguments used to open a URL.
fn launcher() -> (String, Vec<String>) {
    if let Some(browser) = std::env::var(BROWSER_ENV).ok().filter(|b| !b.trim().is_empty()) {
        let mut parts = browser.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            return (program, parts.collect());
        }
    }

    #[cfg(target_os = "macos")]
    {
        ("open".to_string(), Vec::new())
    }

    #[cfg(target_os = "windows")]
    {
        (
            "cmd".to_string(),
            vec!["/C".to_string(), "start".to_string(), String::new()],
        )
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        ("xdg-open".to_string(), Vec::new())
    }
}

/// Opens `url` in a new browser tab without waiting for the browser.
pub fn open(url: &str) -> Result<()> {
    let (program, args) = launcher();
    debug!("Opening {} with {}", url, program);

    let mut command = Command::new(&program);
    command.args(&args).arg(url);
    spawn_detached(command).map(|_| ())
}

/// Starts `command` with null stdio and reaps it on a background thread.
fn spawn_detached(mut command: Command) -> Result<thread::JoinHandle<()>> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| SpannerCliError::io(format!("Failed to launch {}: {}", program, e)))?;

    Ok(thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => warn!("{} exited with {}", program, status),
        Ok(_) => {}
        Err(e) => warn!("Failed to wait for {}: {}", program, e),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_has_program() {
        let (program, _) = launcher();
        assert!(!program.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_launcher_is_reaped() {
        let handle = spawn_detached(Command::new("true")).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_missing_launcher_is_an_error() {
        let err = spawn_detached(Command::new("spanner-cli-no-such-launcher")).unwrap_err();
        assert!(err.to_string().contains("spanner-cli-no-such-launcher"));
    }
}
