//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Amalaw CLI - Build and train the AMA immigration assistant.
#[derive(Debug, Parser)]
#[command(name = "amalaw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape AMA threads and build the fine-tuning dataset
    Scrape(ScrapeArgs),

    /// Manage fine-tuning jobs
    Finetune(FinetuneArgs),
}

/// Arguments for the scrape command.
#[derive(Debug, Parser)]
pub struct ScrapeArgs {
    /// Search query for locating AMA threads
    #[arg(short, long)]
    pub query: Option<String>,

    /// Directory for dataset output files
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Search page size
    #[arg(long, default_value = "100")]
    pub hits_per_page: u32,

    /// Target-author alias (repeatable); defaults to the known aliases
    #[arg(long = "alias")]
    pub aliases: Vec<String>,
}

/// Arguments for fine-tuning management.
#[derive(Debug, Parser)]
pub struct FinetuneArgs {
    #[command(subcommand)]
    pub action: FinetuneAction,
}

/// Fine-tuning actions.
#[derive(Debug, Subcommand)]
pub enum FinetuneAction {
    /// Upload the training file and create a fine-tuning job
    Start {
        /// Directory holding processed_data.jsonl
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Base model to fine-tune
        #[arg(short, long, default_value = "gpt-3.5-turbo")]
        model: String,

        /// Number of training epochs
        #[arg(long, default_value = "3")]
        epochs: u32,
    },

    /// Check the status of a fine-tuning job
    Status {
        /// Job ID
        job_id: String,
    },
}
