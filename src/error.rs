//! Error kinds raised while extracting issues and aggregating tickets.
//!
//! Directory access, write and configuration errors abort a run. Read and
//! parse errors are local to one file: runners record them and continue.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Axe2JiraError {
    #[error("cannot access directory {}: {source}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write csv {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Axe2JiraError {
    /// Whether the error aborts the whole batch rather than a single file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::FileRead { .. } | Self::Parse { .. })
    }

    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::DirectoryAccess { path, .. }
            | Self::FileRead { path, .. }
            | Self::Parse { path, .. }
            | Self::FileWrite { path, .. }
            | Self::Csv { path, .. } => Some(path.as_path()),
            Self::Config(_) => None,
        }
    }
}

pub type Axe2JiraResult<T> = Result<T, Axe2JiraError>;
