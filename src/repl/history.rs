//! # History File Management
//!
//! Resolves where the line editor keeps its history. By default history is
//! stored in `~/.spanner-cli-history`.
//!
//! The location can be overridden with `SPANNER_CLI_HISTORY` or the
//! `history_file` config key; the variable wins. An empty variable disables
//! history, and so does a path whose parent directory does not exist.
//!
//! The path is resolved once at startup and handed to rustyline, which does
//! the file I/O.

use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_HISTORY_FILE: &str = ".spanner-cli-history";
const HISTORY_ENV_VAR: &str = "SPANNER_CLI_HISTORY";

/// History path from the environment, the config file or the default.
pub fn history_path(configured: Option<&Path>) -> Option<PathBuf> {
    resolve(env::var(HISTORY_ENV_VAR).ok(), configured, dirs::home_dir())
}

fn resolve(
    from_env: Option<String>,
    configured: Option<&Path>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    let path = match from_env {
        Some(custom) if custom.is_empty() => return None,
        Some(custom) => expand_home(Path::new(&custom), home.as_deref())?,
        None => match configured {
            Some(path) => expand_home(path, home.as_deref())?,
            None => home?.join(DEFAULT_HISTORY_FILE),
        },
    };

    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() || parent.is_dir() => Some(path),
        _ => None,
    }
}

fn expand_home(path: &Path, home: Option<&Path>) -> Option<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => home.map(|h| h.join(rest)),
        Err(_) => Some(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_history_path_is_in_home() {
        let home = tempfile::tempdir().unwrap();
        let path = resolve(None, None, Some(home.path().to_path_buf()));
        assert_eq!(path, Some(home.path().join(".spanner-cli-history")));
    }

    #[test]
    fn custom_history_path_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("history");
        let path = resolve(
            Some(custom.to_string_lossy().into_owned()),
            Some(Path::new("/ignored/history")),
            None,
        );
        assert_eq!(path, Some(custom));
    }

    #[test]
    fn empty_env_disables_history() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve(Some(String::new()), None, Some(home.path().to_path_buf())),
            None
        );
    }

    #[test]
    fn configured_path_expands_home() {
        let home = tempfile::tempdir().unwrap();
        let path = resolve(
            None,
            Some(Path::new("~/hist")),
            Some(home.path().to_path_buf()),
        );
        assert_eq!(path, Some(home.path().join("hist")));
    }

    #[test]
    fn missing_parent_disables_history() {
        let home = tempfile::tempdir().unwrap();
        let missing = home.path().join("no-such-dir").join("history");
        assert_eq!(
            resolve(Some(missing.to_string_lossy().into_owned()), None, None),
            None
        );
    }

    #[test]
    fn no_home_no_default() {
        assert_eq!(resolve(None, None, None), None);
    }
}
