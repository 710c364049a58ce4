//! Preflight guard: refuse to generate into a working tree with uncommitted changes

use serde::Serialize;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "state")]
pub enum WorkingTreeState {
    Clean,
    Dirty { changed: Vec<String> },
    NotARepository,
}

#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git status failed: {0}")]
    Git(String),
}

/// Version-control view of the project root
#[cfg_attr(test, mockall::automock)]
pub trait WorkingTree {
    fn state(&self, root: &Path) -> Result<WorkingTreeState, PreflightError>;
}

/// Parse `git status --porcelain` output
pub fn parse_porcelain(output: &str) -> WorkingTreeState {
    let changed: Vec<String> = output
        .lines()
        .filter(|line| line.len() > 3)
        .map(|line| line[3..].trim().to_string())
        .collect();

    if changed.is_empty() {
        WorkingTreeState::Clean
    } else {
        WorkingTreeState::Dirty { changed }
    }
}

pub struct GitWorkingTree;

impl WorkingTree for GitWorkingTree {
    fn state(&self, root: &Path) -> Result<WorkingTreeState, PreflightError> {
        let output = Command::new("git")
            .args(["status", "--porcelain"])
            .env("LC_ALL", "C")
            .current_dir(root)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("not a git repository") {
                return Ok(WorkingTreeState::NotARepository);
            }
            return Err(PreflightError::Git(stderr));
        }

        let state = parse_porcelain(&String::from_utf8_lossy(&output.stdout));
        debug!(root = %root.display(), ?state, "Checked working tree");
        Ok(state)
    }
}
