//! Shared data models: parsed issues, tickets and run reports.

pub mod issue;

pub use issue::Issue;

use crate::error::Axe2JiraError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the issue tracker import.
pub struct Ticket {
    pub summary: String,
    pub issue_type: String,
    pub epic_link: String,
    /// Description template followed by the raw chunk text.
    pub description: String,
}

#[derive(Debug, Serialize)]
/// A chunk file written by the extractor.
pub struct WrittenChunk {
    pub source: String,
    pub file: String,
    pub index: usize,
    pub issues: usize,
}

#[derive(Debug, Serialize)]
/// A file that could not be processed; the batch continued without it.
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

impl FileFailure {
    pub fn from_error(err: &Axe2JiraError) -> Self {
        FileFailure {
            file: err
                .path()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
/// Outcome of an extract run.
pub struct ExtractReport {
    pub written: Vec<WrittenChunk>,
    /// JSON files holding an empty issue list; nothing is written for them.
    pub skipped: Vec<String>,
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Default, Serialize)]
/// Outcome of an aggregate run.
pub struct AggregateReport {
    pub csv: String,
    /// Ticket summaries in CSV row order.
    pub tickets: Vec<String>,
    /// Files whose names do not follow `Page_Name-Component_Name.ext`.
    pub nonconforming: Vec<String>,
    pub failures: Vec<FileFailure>,
}
