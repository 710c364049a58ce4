//! Output formatting for JSON, YAML and human-readable text

use anyhow::{Context, Result};
use serde::Serialize;

use crate::artifacts::ArtifactSet;
use crate::catalog::{ContainerKind, ContainerRegistry};
use crate::pipeline::{FileStatus, GenerationResult};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// Catalog row for `ezdeploy kinds`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSummary {
    pub slug: String,
    pub name: String,
    pub type_class: Option<String>,
    pub internal_port: u16,
    pub image: Option<String>,
    pub builds_from_source: bool,
}

impl KindSummary {
    pub fn from_kind(kind: &dyn ContainerKind) -> Self {
        let id = kind.id();
        Self {
            slug: id.slug().to_string(),
            name: id.display_name().to_string(),
            type_class: kind.type_class().map(|t| t.to_string()),
            internal_port: kind.internal_port(),
            image: kind.image().map(str::to_string),
            builds_from_source: kind.dockerfile(kind.internal_port()).is_some(),
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_generation(&self, result: &GenerationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.to_json(result),
            OutputFormat::Yaml => self.to_yaml(result),
            OutputFormat::Human => Ok(self.generation_human(result)),
        }
    }

    pub fn format_render(&self, set: &ArtifactSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.to_json(set),
            OutputFormat::Yaml => self.to_yaml(set),
            OutputFormat::Human => Ok(self.render_human(set)),
        }
    }

    pub fn format_kinds(&self, registry: &ContainerRegistry) -> Result<String> {
        let kinds: Vec<KindSummary> = registry
            .all()
            .into_iter()
            .map(KindSummary::from_kind)
            .collect();

        match self.format {
            OutputFormat::Json => self.to_json(&kinds),
            OutputFormat::Yaml => self.to_yaml(&kinds),
            OutputFormat::Human => Ok(self.kinds_human(&kinds)),
        }
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")
    }

    fn to_yaml<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        serde_yaml::to_string(value).context("Failed to serialize output to YAML")
    }

    fn generation_human(&self, result: &GenerationResult) -> String {
        let mut output = String::new();

        if result.success {
            output.push_str("\u{2713} Deployment bundle generated\n");
        } else {
            let kind = result.error.map(|k| k.to_string()).unwrap_or_default();
            output.push_str(&format!("\u{2717} Generation failed ({})\n", kind));
        }
        output.push_str(RULE);
        output.push_str("\n\n");
        output.push_str(&format!("{}\n", result.message));

        if !result.files.is_empty() {
            output.push_str("\nFiles:\n");
            for (i, file) in result.files.iter().enumerate() {
                let connector = if i == result.files.len() - 1 {
                    "\u{2514}\u{2500}"
                } else {
                    "\u{251C}\u{2500}"
                };
                let status = match file.status {
                    FileStatus::Written => "written",
                    FileStatus::Patched => "patched",
                    FileStatus::Failed => "FAILED",
                };
                output.push_str(&format!("{} {:<8} {}", connector, status, file.path));
                if let Some(error) = &file.error {
                    output.push_str(&format!(" ({})", error));
                }
                output.push('\n');
            }
        }

        self.push_warnings(&mut output, &result.warnings);
        output
    }

    fn render_human(&self, set: &ArtifactSet) -> String {
        let mut output = String::new();
        for artifact in &set.artifacts {
            output.push_str(&format!("{}\n{}\n{}\n", RULE, artifact.path_str(), RULE));
            output.push_str(&artifact.content);
            if !artifact.content.ends_with('\n') {
                output.push('\n');
            }
            output.push('\n');
        }
        self.push_warnings(&mut output, &set.warnings);
        output
    }

    fn kinds_human(&self, kinds: &[KindSummary]) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<10} {:<12} {:<9} {:<6} {}\n",
            "KIND", "NAME", "TYPE", "PORT", "SOURCE"
        ));
        for kind in kinds {
            let source = match &kind.image {
                Some(image) => format!("image {}", image),
                None if kind.builds_from_source => "Dockerfile".to_string(),
                None => "-".to_string(),
            };
            output.push_str(&format!(
                "{:<10} {:<12} {:<9} {:<6} {}\n",
                kind.slug,
                kind.name,
                kind.type_class.as_deref().unwrap_or("-"),
                kind.internal_port,
                source
            ));
        }
        output
    }

    fn push_warnings(&self, output: &mut String, warnings: &[String]) {
        if warnings.is_empty() {
            return;
        }
        output.push_str("\nWarnings:\n");
        for warning in warnings {
            output.push_str(&format!("\u{26A0} {}\n", warning));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::Artifact;
    use crate::error::GenerationError;
    use crate::pipeline::FileOutcome;

    fn result() -> GenerationResult {
        GenerationResult::succeeded(
            vec![
                FileOutcome::written("docker-compose.yml"),
                FileOutcome::written("next.config.js").into_patched(),
            ],
            vec!["Container 'web' declares API_URL but no backend container exists".into()],
        )
    }

    #[test]
    fn test_generation_human() {
        let text = OutputFormatter::new(OutputFormat::Human)
            .format_generation(&result())
            .unwrap();
        assert!(text.starts_with("\u{2713} Deployment bundle generated"));
        assert!(text.contains("written  docker-compose.yml"));
        assert!(text.contains("\u{2514}\u{2500} patched  next.config.js"));
        assert!(text.contains("Warnings:"));
    }

    #[test]
    fn test_failed_generation_human() {
        let err = GenerationError::WriteFailed { failed: 1, total: 2 };
        let result = GenerationResult::failed(
            &err,
            vec![
                FileOutcome::written("Dockerfile"),
                FileOutcome::failed("deploy.sh", "Permission denied"),
            ],
            vec![],
        );
        let text = OutputFormatter::new(OutputFormat::Human)
            .format_generation(&result)
            .unwrap();
        assert!(text.contains("Generation failed (write-failed)"));
        assert!(text.contains("FAILED   deploy.sh (Permission denied)"));
    }

    #[test]
    fn test_generation_json() {
        let text = OutputFormatter::new(OutputFormat::Json)
            .format_generation(&result())
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["files"][1]["status"], "patched");
    }

    #[test]
    fn test_render_yaml() {
        let set = ArtifactSet {
            artifacts: vec![Artifact::new("deploy.sh", "#!/bin/bash\n").executable()],
            warnings: vec![],
        };
        let text = OutputFormatter::new(OutputFormat::Yaml)
            .format_render(&set)
            .unwrap();
        let yaml: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(yaml["artifacts"][0]["path"], serde_yaml::Value::from("deploy.sh"));
        assert_eq!(yaml["artifacts"][0]["executable"], serde_yaml::Value::from(true));
    }

    #[test]
    fn test_kinds_human_lists_catalog() {
        let registry = ContainerRegistry::with_defaults();
        let text = OutputFormatter::new(OutputFormat::Human)
            .format_kinds(&registry)
            .unwrap();
        assert!(text.lines().any(|l| l.starts_with("postgres") && l.contains("image postgres:16")));
        assert!(text.lines().any(|l| l.starts_with("next") && l.contains("Dockerfile")));
        assert!(text.lines().any(|l| l.starts_with("adminer") && l.contains(" - ")));
    }

    #[test]
    fn test_kinds_json() {
        let registry = ContainerRegistry::with_defaults();
        let text = OutputFormatter::new(OutputFormat::Json)
            .format_kinds(&registry)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 9);
        assert_eq!(json[0]["slug"], "next");
        assert_eq!(json[0]["typeClass"], "frontend");
    }
}
