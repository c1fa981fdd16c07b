//! Amalaw Extractor
//!
//! Turns nested AMA discussion threads into a flat fine-tuning dataset.
//!
//! # Overview
//!
//! The extractor walks a thread's comment tree and emits a question/answer
//! pair wherever the target author replied to someone else's comment. The
//! scraping pipeline then deduplicates the pairs, reshapes them into
//! three-message fine-tune records, and writes the dataset files.
//!
//! # Architecture
//!
//! ```text
//! Thread → extract → Vec<QAPair> → dedup_pairs → to_fine_tune_records → JSONL
//! ```
//!
//! Extraction itself is a pure function over a fully materialized tree: no
//! I/O, no fallible operations, always a (possibly empty) sequence. The
//! fallible parts (file writing) live in [`dataset`].
//!
//! # Example Usage
//!
//! ```
//! use amalaw_domain::{TargetAuthor, Thread};
//! use amalaw_extractor::{dedup_pairs, extract};
//!
//! let thread: Thread = serde_json::from_str(r#"{
//!     "id": 1, "title": "AMA", "author": "whoishiring",
//!     "children": [{
//!         "id": 2, "author": "alice", "text": "How long does EB-2 take?",
//!         "parent": 1,
//!         "children": [{
//!             "id": 3, "author": "proberts",
//!             "text": "About 1-2 years for most nationalities.",
//!             "parent": 2, "children": []
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let pairs = dedup_pairs(extract(&thread, &TargetAuthor::default()));
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].question, "How long does EB-2 take?");
//! ```

#![warn(missing_docs)]

mod dataset;
mod dedup;
mod error;
mod extractor;


pub use dataset::{
    to_fine_tune_records, write_raw_json, write_records_jsonl, FineTuneRecord, DATASET_SYSTEM_PROMPT,
};
pub use dedup::{dedup_pairs, dedup_key};
pub use error::ExtractorError;
pub use extractor::extract;
