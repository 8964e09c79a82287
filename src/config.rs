//! Configuration management for spanner-cli.
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags, environment variables (both via clap) and the TOML config file.

use crate::db::DEFAULT_TIMEOUT_SECS;
use crate::error::{Result, SpannerCliError};
use crate::session::DEFAULT_MAX_ROWS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// One layer of configuration. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Google Cloud project id.
    pub project: Option<String>,

    /// Spanner instance id.
    pub instance: Option<String>,

    /// Database to open at startup.
    pub database: Option<String>,

    /// REST endpoint root.
    pub endpoint: Option<String>,

    /// Page interactive output through `$PAGER`.
    pub pager: Option<bool>,

    /// Row limit for reads.
    pub max_rows: Option<usize>,

    /// History file location.
    pub history_file: Option<PathBuf>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spanner-cli")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the empty configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SpannerCliError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SpannerCliError::config(format!("Invalid config file: {e}")))
    }

    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &Config) {
        if other.project.is_some() {
            self.project = other.project.clone();
        }
        if other.instance.is_some() {
            self.instance = other.instance.clone();
        }
        if other.database.is_some() {
            self.database = other.database.clone();
        }
        if other.endpoint.is_some() {
            self.endpoint = other.endpoint.clone();
        }
        if other.pager.is_some() {
            self.pager = other.pager;
        }
        if other.max_rows.is_some() {
            self.max_rows = other.max_rows;
        }
        if other.history_file.is_some() {
            self.history_file = other.history_file.clone();
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project: String,
    pub instance: String,
    pub database: String,
    /// `None` means the production endpoint.
    pub endpoint: Option<Url>,
    pub pager: bool,
    pub max_rows: usize,
    pub history_file: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Settings {
    /// Validates a merged config.
    ///
    /// Project, instance and database are required; the endpoint, if given,
    /// must be an http(s) URL.
    pub fn from_config(config: Config) -> Result<Self> {
        let project = required(config.project, "project", "-p/--project or GCP_PROJECT")?;
        let instance = required(
            config.instance,
            "instance",
            "-i/--instance or SPANNER_INSTANCE_ID",
        )?;
        let database = required(
            config.database,
            "database",
            "-d/--database or SPANNER_DATABASE",
        )?;

        let endpoint = config
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .map(|e| parse_endpoint(&e))
            .transpose()?;

        let max_rows = config.max_rows.unwrap_or(DEFAULT_MAX_ROWS);
        if max_rows == 0 {
            return Err(SpannerCliError::config("max_rows must be at least 1"));
        }

        Ok(Self {
            project,
            instance,
            database,
            endpoint,
            pager: config.pager.unwrap_or(false),
            max_rows,
            history_file: config.history_file,
            timeout_secs: config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

fn required(value: Option<String>, name: &str, hint: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SpannerCliError::config(format!("Missing {name}; set it with {hint}")))
}

/// Parses a REST endpoint root, adding the trailing slash URL joins need.
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| SpannerCliError::config(format!("Invalid endpoint '{endpoint}': {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SpannerCliError::config(format!(
            "Invalid scheme '{}'. Expected 'http' or 'https'",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
