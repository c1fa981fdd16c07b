//! Fine-tune dataset shaping and file output.
//!
//! Each QA pair becomes a three-message record (system persona, user
//! question, assistant answer) in the chat fine-tuning format. The pipeline
//! writes both the raw pairs (pretty JSON array, for inspection) and the
//! reshaped records (newline-delimited JSON, one record per line, as the
//! training API expects).

use crate::error::ExtractorError;
use amalaw_domain::{ChatMessage, QAPair};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Persona prompt baked into every training record.
pub const DATASET_SYSTEM_PROMPT: &str = "You are Peter Roberts, an immigration attorney who has done AMAs on Hacker News. Answer immigration-related questions based on your expertise. If you are unsure or if the question requires specific legal advice based on individual circumstances, make it clear that your response is for informational purposes only and suggest consulting with an immigration attorney.";

/// One training record in the chat fine-tuning format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineTuneRecord {
    /// System, user, and assistant messages, in that order
    pub messages: Vec<ChatMessage>,
}

/// Wrap QA pairs into three-message training records.
pub fn to_fine_tune_records(pairs: &[QAPair]) -> Vec<FineTuneRecord> {
    pairs
        .iter()
        .map(|pair| FineTuneRecord {
            messages: vec![
                ChatMessage::system(DATASET_SYSTEM_PROMPT),
                ChatMessage::user(pair.question.clone()),
                ChatMessage::assistant(pair.answer.clone()),
            ],
        })
        .collect()
}

/// Write QA pairs as a pretty-printed JSON array.
pub fn write_raw_json(path: &Path, pairs: &[QAPair]) -> Result<(), ExtractorError> {
    let contents = serde_json::to_string_pretty(pairs)?;
    fs::write(path, contents)?;
    info!(path = %path.display(), pairs = pairs.len(), "wrote raw QA pairs");
    Ok(())
}

/// Write training records as newline-delimited JSON, one record per line.
pub fn write_records_jsonl(path: &Path, records: &[FineTuneRecord]) -> Result<(), ExtractorError> {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        lines.push(serde_json::to_string(record)?);
    }
    fs::write(path, lines.join("\n"))?;
    info!(path = %path.display(), records = records.len(), "wrote fine-tune records");
    Ok(())
}
