//! axe2jira core library.
//!
//! Converts accessibility findings exported by the axe browser extension
//! into Jira tickets in two passes connected only through the filesystem:
//! JSON exports become Jira-formatted text chunks, and a directory of text
//! chunks becomes one CSV for bulk import.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `extract`: JSON exports to chunked text files.
//! - `aggregate`: Text files to a single import CSV.
//! - `models`: Issues, tickets and run reports.
//! - `output`: Human/JSON printers for both commands.
//! - `error`: Error kinds and their fatal/per-file classification.
//! - `utils`: Supporting helpers.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod utils;
