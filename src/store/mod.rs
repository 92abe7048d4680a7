//! The task store: system of record for task attributes.
//!
//! The TUI reaches it only through the named mutations on [`TaskStore`] and
//! re-reads a full snapshot with [`TaskStore::export`] after each change.

pub mod json_file;
pub mod memory;

use std::path::PathBuf;

use crate::model::Task;

pub use json_file::JsonFileStore;
pub use memory::{MemoryStore, StoreCall};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(u32),
    #[error("{0}")]
    Rejected(String),
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Mutation surface of the task store. Every call either succeeds or fails
/// with a human-readable message; there are no partial-success semantics.
pub trait TaskStore {
    /// Tasks matching the filter tokens, in display order
    fn export(&self, filters: &[String]) -> Result<Vec<Task>, StoreError>;

    fn annotate(&mut self, id: u32, text: &str) -> Result<(), StoreError>;
    /// Replace every annotation with `text`; empty removes them all
    fn replace_annotations(&mut self, id: u32, text: &str) -> Result<(), StoreError>;
    fn set_description(&mut self, id: u32, text: &str) -> Result<(), StoreError>;
    fn add_tags(&mut self, id: u32, tags: &[String]) -> Result<(), StoreError>;
    fn remove_tags(&mut self, id: u32, tags: &[String]) -> Result<(), StoreError>;
    /// `date` is ISO-8601 (`2025-01-14`)
    fn set_due_date(&mut self, id: u32, date: &str) -> Result<(), StoreError>;
    fn set_recurrence(&mut self, id: u32, spec: &str) -> Result<(), StoreError>;
    fn set_project(&mut self, id: u32, project: &str) -> Result<(), StoreError>;
    fn set_priority(&mut self, id: u32, priority: &str) -> Result<(), StoreError>;
    /// Hand a raw command line to the store, which parses it itself
    fn add_line(&mut self, line: &str) -> Result<(), StoreError>;
}
