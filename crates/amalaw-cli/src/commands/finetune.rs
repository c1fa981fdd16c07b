//! Finetune command implementation.
//!
//! Drives the hosted fine-tuning workflow: upload the training file, create
//! the job, persist a reference for later status checks.

use crate::cli::FinetuneAction;
use crate::config::Config;
use crate::error::{CliError, Result};
use amalaw_llm::OpenAiClient;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::scrape::PROCESSED_FILE;

/// File recording the most recently created job.
pub const JOB_REFERENCE_FILE: &str = "fine_tuning_job.json";

/// Reference to a created fine-tuning job.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobReference {
    /// Job identifier
    pub job_id: String,
    /// Uploaded training file identifier
    pub file_id: String,
    /// Creation time, seconds since the Unix epoch
    pub timestamp: u64,
}

/// Execute a finetune action.
pub async fn execute_finetune(action: FinetuneAction, config: &Config) -> Result<()> {
    let client = OpenAiClient::new(config.api_key()?);

    match action {
        FinetuneAction::Start {
            data_dir,
            model,
            epochs,
        } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
            start_job(&client, &data_dir, &model, epochs).await
        }
        FinetuneAction::Status { job_id } => check_status(&client, &job_id).await,
    }
}

async fn start_job(
    client: &OpenAiClient,
    data_dir: &Path,
    model: &str,
    epochs: u32,
) -> Result<()> {
    let training_path: PathBuf = data_dir.join(PROCESSED_FILE);
    if !training_path.exists() {
        return Err(CliError::InvalidInput(format!(
            "Training file not found at {}. Run 'amalaw scrape' first to generate the training data.",
            training_path.display()
        )));
    }

    println!("Uploading training file...");
    let file_id = client.upload_training_file(&training_path).await?;
    println!("File uploaded successfully. File ID: {}", file_id.green());

    println!("Creating fine-tuning job...");
    let job = client.create_fine_tune_job(&file_id, model, epochs).await?;
    println!(
        "Fine-tuning job created successfully. Job ID: {}",
        job.id.green()
    );
    println!("Run 'amalaw finetune status {}' to check its progress.", job.id);

    let reference = JobReference {
        job_id: job.id,
        file_id,
        timestamp: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
    };
    let reference_path = data_dir.join(JOB_REFERENCE_FILE);
    fs::write(&reference_path, serde_json::to_string_pretty(&reference)?)?;

    Ok(())
}

async fn check_status(client: &OpenAiClient, job_id: &str) -> Result<()> {
    let job = client.retrieve_fine_tune_job(job_id).await?;
    println!("Job status: {}", job.status);

    match job.status.as_str() {
        "succeeded" => {
            if let Some(model) = &job.fine_tuned_model {
                println!("Fine-tuned model ID: {}", model.green());
                println!("Set this as model_id in the server config to serve it.");
            }
        }
        "failed" => {
            let detail = job
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("{} {}", "Job failed. Error:".red(), detail);
        }
        _ => {}
    }

    Ok(())
}
