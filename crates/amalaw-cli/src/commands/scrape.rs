//! Scrape command implementation.
//!
//! Searches HN for the AMA threads, extracts question/answer pairs from
//! each, deduplicates, and writes both dataset files.

use crate::cli::ScrapeArgs;
use crate::config::Config;
use crate::error::Result;
use amalaw_domain::TargetAuthor;
use amalaw_extractor::{dedup_pairs, extract, to_fine_tune_records, write_raw_json, write_records_jsonl};
use amalaw_hn::{HnClient, DEFAULT_SEARCH_QUERY};
use colored::Colorize;
use std::fs;
use tracing::{info, warn};

/// Output file for the raw QA pairs.
pub const RAW_FILE: &str = "raw_amas.json";

/// Output file for the reshaped training records.
pub const PROCESSED_FILE: &str = "processed_data.jsonl";

/// Execute the scrape command.
pub async fn execute_scrape(args: ScrapeArgs, config: &Config) -> Result<()> {
    let data_dir = args.out_dir.unwrap_or_else(|| config.data_dir());
    fs::create_dir_all(&data_dir)?;

    let query = args.query.as_deref().unwrap_or(DEFAULT_SEARCH_QUERY);
    let target = if args.aliases.is_empty() {
        TargetAuthor::default()
    } else {
        TargetAuthor::new(args.aliases)
    };

    println!("{}", "Scraping AMA threads from Hacker News...".bold());

    let client = HnClient::default_endpoint();
    let results = client.search_stories(query, args.hits_per_page).await?;
    let hits = results.ama_hits();
    println!("Found {} AMA threads.", hits.len());

    let mut all_pairs = Vec::new();
    for hit in hits {
        let title = hit.title.as_deref().unwrap_or("(untitled)");
        let Some(id) = hit.item_id() else {
            warn!(object_id = %hit.object_id, "non-numeric story id, skipping");
            continue;
        };

        println!("Processing thread: {} (ID: {})", title, id);
        let thread = client.fetch_thread(id).await?;

        let pairs = extract(&thread, &target);
        println!("Extracted {} QA pairs from this thread.", pairs.len());
        all_pairs.extend(pairs);
    }

    let total = all_pairs.len();
    let pairs = dedup_pairs(all_pairs);
    info!(total, kept = pairs.len(), "deduplicated QA pairs");

    let raw_path = data_dir.join(RAW_FILE);
    write_raw_json(&raw_path, &pairs)?;
    println!(
        "Saved {} QA pairs to {}",
        pairs.len(),
        raw_path.display().to_string().green()
    );

    let records = to_fine_tune_records(&pairs);
    let processed_path = data_dir.join(PROCESSED_FILE);
    write_records_jsonl(&processed_path, &records)?;
    println!(
        "Processed data saved to {}",
        processed_path.display().to_string().green()
    );

    Ok(())
}
