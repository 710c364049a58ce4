use crate::error::{ErrorKind, GenerationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Written,
    Patched,
    Failed,
}

/// What happened to one file during materialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub path: String,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn written(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Written,
            error: None,
        }
    }

    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Failed,
            error: Some(error.into()),
        }
    }

    /// Relabel a successful write of a pre-existing framework file
    pub fn into_patched(mut self) -> Self {
        if self.status == FileStatus::Written {
            self.status = FileStatus::Patched;
        }
        self
    }

    pub fn is_failed(&self) -> bool {
        self.status == FileStatus::Failed
    }
}

/// The generator's entire outward contract. Failures are values, never panics
/// or errors past this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    pub message: String,
    #[serde(default)]
    pub files: Vec<FileOutcome>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl GenerationResult {
    pub fn succeeded(files: Vec<FileOutcome>, warnings: Vec<String>) -> Self {
        let message = format!("Generated {} files", files.len());
        Self {
            success: true,
            error: None,
            message,
            files,
            warnings,
        }
    }

    pub fn failed(error: &GenerationError, files: Vec<FileOutcome>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            error: Some(error.kind()),
            message: error.to_string(),
            files,
            warnings,
        }
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.is_failed())
    }

    pub fn file(&self, path: &str) -> Option<&FileOutcome> {
        self.files.iter().find(|f| f.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_serialization() {
        let err = GenerationError::UncommittedChanges {
            changed: vec!["src/app.ts".into()],
        };
        let result = GenerationResult::failed(&err, vec![], vec![]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "uncommitted-changes");
        assert!(json["message"].as_str().unwrap().contains("uncommitted changes"));
        assert_eq!(json["files"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_success_omits_error() {
        let result = GenerationResult::succeeded(
            vec![
                FileOutcome::written("docker-compose.yml"),
                FileOutcome::written("next.config.js").into_patched(),
            ],
            vec!["heads up".into()],
        );
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("error").is_none());
        assert_eq!(json["message"], "Generated 2 files");
        assert_eq!(json["files"][1]["status"], "patched");
        assert!(json["files"][0].get("error").is_none());
        assert_eq!(json["warnings"][0], "heads up");
    }

    #[test]
    fn test_failed_outcome_stays_failed() {
        let outcome = FileOutcome::failed("package.json", "denied").into_patched();
        assert!(outcome.is_failed());
        assert_eq!(outcome.error.as_deref(), Some("denied"));
    }
}
