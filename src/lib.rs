//! spanner-cli - A Google Cloud Spanner terminal client with
//! auto-completion and meta-commands.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod app;
pub mod browser;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;
pub mod repl;
pub mod session;
