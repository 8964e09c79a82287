//! Configuration layering: file, then command line, then validation.

use std::io::Write;

use clap::Parser;
use spanner_cli::cli::Cli;
use spanner_cli::config::{Config, Settings};
use spanner_cli::db::DEFAULT_TIMEOUT_SECS;
use spanner_cli::session::DEFAULT_MAX_ROWS;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_cli_overrides_file() {
    let file = config_file(
        r#"
project = "file-project"
instance = "file-instance"
database = "file-db"
pager = true
max_rows = 50
"#,
    );

    let mut config = Config::load_from_file(file.path()).unwrap();
    let cli = Cli::parse_from(["spanner-cli", "-d", "cli-db", "--no-pager"]);
    config.merge(&cli.to_config());

    let settings = Settings::from_config(config).unwrap();
    assert_eq!(settings.project, "file-project");
    assert_eq!(settings.instance, "file-instance");
    assert_eq!(settings.database, "cli-db");
    assert!(!settings.pager);
    assert_eq!(settings.max_rows, 50);
    assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_emulator_endpoint() {
    let cli = Cli::parse_from([
        "spanner-cli",
        "-p",
        "p",
        "-i",
        "i",
        "-d",
        "d",
        "--endpoint",
        "http://localhost:9020",
    ]);
    let settings = Settings::from_config(cli.to_config()).unwrap();
    assert_eq!(
        settings.endpoint.map(|u| u.to_string()).as_deref(),
        Some("http://localhost:9020/")
    );
    assert_eq!(settings.max_rows, DEFAULT_MAX_ROWS);
}

#[test]
fn test_missing_database_is_reported() {
    let file = config_file("project = \"p\"\ninstance = \"i\"\n");
    let config = Config::load_from_file(file.path()).unwrap();

    let err = Settings::from_config(config).unwrap_err();
    assert!(err.to_string().contains("database"));
}

#[test]
fn test_malformed_file_is_rejected() {
    let file = config_file("project = [");
    assert!(Config::load_from_file(file.path()).is_err());
}
