//! Framework-config patchers
//!
//! Some frameworks only build a self-contained server when their own
//! configuration says so. Patchers make that edit as plain text using
//! per-framework [`PatchRule`]s. They never produce malformed output: when
//! the expected pattern is missing the file is left alone and a warning is
//! returned instead.

mod nextjs;
mod rules;
mod sveltekit;

pub use nextjs::NextConfigPatcher;
pub use rules::{apply_rules, Anchor, PatchRule};
pub use sveltekit::{add_dependency, SvelteKitConfigPatcher};

use crate::artifacts::Artifact;
use crate::fs::FileSystem;
use std::path::Path;

/// Result of patching one container's build context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Files to (re)write, relative to the project root
    pub edits: Vec<Artifact>,
    pub warnings: Vec<String>,
}

impl PatchOutcome {
    pub fn merge(&mut self, other: PatchOutcome) {
        self.edits.extend(other.edits);
        self.warnings.extend(other.warnings);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

pub trait ConfigPatcher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Inspect `context_dir` (relative to `root`) and return the edits to make
    fn patch(&self, fs: &dyn FileSystem, root: &Path, context_dir: &Path) -> PatchOutcome;
}
