//! Error types for a collection run.
//!
//! [`CollectError`] aborts the whole run. [`EntryError`] concerns a single
//! source entry: it is recorded in the report and the walk moves on.

use crate::config::ConfigError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failure that aborts the run.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to create destination directory {}: {source}", path.display())]
    DestinationCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot scan source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A per-entry failure. The entry is skipped and the walk continues.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("error accessing path {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error creating {} for {}: {source}", destination.display(), path.display())]
    Create {
        path: PathBuf,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error copying {} to {}: {source}", path.display(), destination.display())]
    Copy {
        path: PathBuf,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EntryError {
    /// The source path the error concerns.
    pub fn path(&self) -> &Path {
        match self {
            EntryError::Walk { path, .. }
            | EntryError::Read { path, .. }
            | EntryError::Create { path, .. }
            | EntryError::Copy { path, .. } => path,
        }
    }

    /// The destination path involved, if the error happened while copying.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            EntryError::Create { destination, .. } | EntryError::Copy { destination, .. } => {
                Some(destination)
            }
            EntryError::Walk { .. } | EntryError::Read { .. } => None,
        }
    }

    /// Short label for the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            EntryError::Walk { .. } => "walk",
            EntryError::Read { .. } => "read",
            EntryError::Create { .. } => "create",
            EntryError::Copy { .. } => "copy",
        }
    }
}
