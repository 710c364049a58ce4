//! Writing compiled artifacts under the project root

use super::FileSystem;
use crate::artifacts::Artifact;
use crate::pipeline::result::FileOutcome;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, warn};

/// Write one artifact, creating parent directories as needed
pub fn write_artifact(fs: &dyn FileSystem, root: &Path, artifact: &Artifact) -> Result<()> {
    let target = root.join(&artifact.path);

    if let Some(parent) = target.parent() {
        if !fs.exists(parent) {
            fs.create_dir_all(parent)?;
        }
    }

    fs.write(&target, &artifact.content)?;

    if artifact.executable {
        fs.set_executable(&target)?;
    }

    Ok(())
}

/// Write every artifact, continuing past failures. Files already written
/// stay on disk when a later one fails.
pub fn materialize(fs: &dyn FileSystem, root: &Path, artifacts: &[Artifact]) -> Vec<FileOutcome> {
    artifacts
        .iter()
        .map(|artifact| {
            let path = artifact.path_str();
            match write_artifact(fs, root, artifact) {
                Ok(()) => {
                    debug!(path = %path, bytes = artifact.content.len(), "Wrote artifact");
                    FileOutcome::written(path)
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Failed to write artifact");
                    FileOutcome::failed(path, format!("{:#}", e))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::pipeline::result::FileStatus;

    fn artifacts() -> Vec<Artifact> {
        vec![
            Artifact::new("frontend/Dockerfile", "FROM node:20-alpine\n"),
            Artifact::new("docker-compose.yml", "services:\n"),
            Artifact::new("deploy.sh", "#!/bin/bash\n").executable(),
        ]
    }

    #[test]
    fn test_materialize_writes_all_files() {
        let fs = MockFileSystem::new();
        fs.add_dir("");

        let outcomes = materialize(&fs, fs.root(), &artifacts());

        assert!(outcomes.iter().all(|o| o.status == FileStatus::Written));
        assert_eq!(
            fs.contents("frontend/Dockerfile").as_deref(),
            Some("FROM node:20-alpine\n")
        );
        assert!(fs.is_executable("deploy.sh"));
        assert!(!fs.is_executable("docker-compose.yml"));
    }

    #[test]
    fn test_materialize_continues_after_failure() {
        let fs = MockFileSystem::new();
        fs.add_dir("");
        fs.fail_writes_to("docker-compose.yml");

        let outcomes = materialize(&fs, fs.root(), &artifacts());

        assert_eq!(outcomes[0].status, FileStatus::Written);
        assert_eq!(outcomes[1].status, FileStatus::Failed);
        assert!(outcomes[1].error.as_deref().unwrap().contains("Permission denied"));
        assert_eq!(outcomes[2].status, FileStatus::Written);
        assert!(fs.contents("frontend/Dockerfile").is_some());
    }
}
