//! # storage-cli
//!
//! `tstore`: argument parsing, config loading, command dispatch and tracing setup for the
//! users / templates storage provider.

pub mod cli;
pub mod logger;

pub use cli::{load_config, load_config_from, run_command, Cli, Commands};
pub use logger::init_tracing;
