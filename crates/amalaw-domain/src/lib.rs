//! Amalaw Domain Layer
//!
//! This crate contains the core data model shared by the scraping pipeline,
//! the chat service, and the CLI. It stays dependency-light (serde for the
//! wire shapes) and holds no I/O: fetching threads and calling models live
//! in the infrastructure crates.
//!
//! ## Key Concepts
//!
//! - **Thread**: a discussion tree rooted at a single posted item
//! - **Comment**: one node in a Thread's reply tree
//! - **Target author**: the participant whose replies count as answers,
//!   matched via a small case-insensitive alias set
//! - **QAPair**: an extracted (question, answer) record for dataset building
//! - **ChatMessage**: one system/user/assistant turn of a conversation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod author;
pub mod chat;
pub mod comment;
pub mod html;
pub mod qa;

// Re-exports for convenience
pub use author::TargetAuthor;
pub use chat::{ChatMessage, Role};
pub use comment::{Comment, Thread};
pub use qa::QAPair;
