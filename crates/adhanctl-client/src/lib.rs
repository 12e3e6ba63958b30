//! CLI, configuration, setup wizard and one-shot commands
//!
//! This crate provides the `adhanctl` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod wizard;

pub use cli::Cli;
pub use config::Config;
pub use error::{ClientError, ClientResult, ConfigError};
