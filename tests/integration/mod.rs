//! Integration tests for spanner-cli.

pub mod config_test;
pub mod dispatch_test;
pub mod emulator_test;
pub mod resolver_test;
