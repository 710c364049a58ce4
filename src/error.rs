//! Generation failures and their stable error-kind tags

use crate::preflight::PreflightError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Machine-readable failure tag carried by a failed result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    UncommittedChanges,
    NotARepository,
    PreflightFailed,
    InvalidConfig,
    GenerationError,
    WriteFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UncommittedChanges => "uncommitted-changes",
            ErrorKind::NotARepository => "not-a-repository",
            ErrorKind::PreflightFailed => "preflight-failed",
            ErrorKind::InvalidConfig => "invalid-config",
            ErrorKind::GenerationError => "generation-error",
            ErrorKind::WriteFailed => "write-failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("The project has uncommitted changes ({} files); commit or stash them before generating", .changed.len())]
    UncommittedChanges { changed: Vec<String> },

    #[error("{} is not a git repository; initialise one or skip the preflight check", .0.display())]
    NotARepository(PathBuf),

    #[error("Preflight check failed: {0}")]
    Preflight(#[from] PreflightError),

    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("{failed} of {total} files could not be written")]
    WriteFailed { failed: usize, total: usize },
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::UncommittedChanges { .. } => ErrorKind::UncommittedChanges,
            GenerationError::NotARepository(_) => ErrorKind::NotARepository,
            GenerationError::Preflight(_) => ErrorKind::PreflightFailed,
            GenerationError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            GenerationError::Generation(_) => ErrorKind::GenerationError,
            GenerationError::WriteFailed { .. } => ErrorKind::WriteFailed,
        }
    }
}
