//! Amalaw CLI library.
//!
//! This library provides the core functionality for the amalaw command-line
//! interface: the AMA scraping pipeline and the fine-tuning workflow.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
