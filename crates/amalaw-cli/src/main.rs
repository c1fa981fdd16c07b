//! Amalaw CLI - Command-line interface for the AMA dataset pipeline.

use amalaw_cli::commands;
use amalaw_cli::{Cli, Command, Config};
use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> amalaw_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load or create config
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Handle commands
    match cli.command {
        Command::Scrape(args) => {
            commands::execute_scrape(args, &config).await?;
        }
        Command::Finetune(args) => {
            commands::execute_finetune(args.action, &config).await?;
        }
    }

    Ok(())
}
