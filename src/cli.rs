//! Command-line argument parsing for spanner-cli.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// A Google Cloud Spanner terminal client with auto-completion and meta-commands.
#[derive(Parser, Debug)]
#[command(name = "spanner-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Google Cloud Platform project of the Spanner instance
    #[arg(short = 'p', long, env = "GCP_PROJECT", value_name = "PROJECT")]
    pub project: Option<String>,

    /// Cloud Spanner instance to connect to
    #[arg(short = 'i', long, env = "SPANNER_INSTANCE_ID", value_name = "INSTANCE")]
    pub instance: Option<String>,

    /// Cloud Spanner database to connect to
    #[arg(short = 'd', long, env = "SPANNER_DATABASE", value_name = "DATABASE")]
    pub database: Option<String>,

    /// OAuth2 access token (e.g. from `gcloud auth print-access-token`)
    #[arg(long, env = "SPANNER_ACCESS_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// REST endpoint, e.g. http://localhost:9020/ for the emulator
    #[arg(long, env = "SPANNER_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Use $PAGER (default less) to print output
    #[arg(long, overrides_with = "no_pager")]
    pub pager: bool,

    /// Print output directly
    #[arg(long = "no-pager", overrides_with = "pager")]
    pub no_pager: bool,

    /// Execute a statement and quit
    #[arg(short = 'e', long, value_name = "SQL")]
    pub execute: Option<String>,

    /// Write debug logs to the log file
    #[arg(long)]
    pub debug: bool,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use an in-memory mock database (for testing)
    #[arg(long, hide = true)]
    pub mock_db: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Pager choice from the flags; `None` when neither flag was given.
    pub fn pager_choice(&self) -> Option<bool> {
        match (self.pager, self.no_pager) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Values given on the command line or through the environment, as a
    /// config layer to merge over the file.
    pub fn to_config(&self) -> Config {
        Config {
            project: self.project.clone(),
            instance: self.instance.clone(),
            database: self.database.clone(),
            endpoint: self.endpoint.clone(),
            pager: self.pager_choice(),
            ..Default::default()
        }
    }
}
