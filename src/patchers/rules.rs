use super::PatchOutcome;
use crate::artifacts::Artifact;
use crate::fs::FileSystem;
use regex::{NoExpand, Regex};
use std::path::Path;
use tracing::{debug, warn};

/// Pattern to find in a config file and the text that replaces the match
#[derive(Debug, Clone, Copy)]
pub struct Anchor {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// How one framework config file is recognised and patched
#[derive(Debug, Clone, Copy)]
pub struct PatchRule {
    pub file_name: &'static str,
    /// Present when the edit was already made
    pub applied_marker: &'static str,
    /// Tried in order; the first match is replaced once
    pub anchors: &'static [Anchor],
    /// Written when no candidate file exists
    pub template: Option<&'static str>,
}

impl PatchRule {
    fn is_applied(&self, content: &str) -> bool {
        Regex::new(self.applied_marker)
            .map(|re| re.is_match(content))
            .unwrap_or_else(|_| content.contains(self.applied_marker))
    }

    fn apply(&self, content: &str) -> Option<String> {
        for anchor in self.anchors {
            let re = match Regex::new(anchor.pattern) {
                Ok(r) => r,
                Err(_) => continue,
            };
            if re.is_match(content) {
                return Some(re.replacen(content, 1, NoExpand(anchor.replacement)).into_owned());
            }
        }
        None
    }
}

/// Patch the first candidate file that exists, or create one from a template
pub fn apply_rules(
    fs: &dyn FileSystem,
    root: &Path,
    context_dir: &Path,
    framework: &str,
    rules: &[PatchRule],
) -> PatchOutcome {
    let mut outcome = PatchOutcome::default();

    let existing = rules
        .iter()
        .find(|rule| fs.is_file(&root.join(context_dir).join(rule.file_name)));

    let Some(rule) = existing else {
        match rules.iter().find_map(|r| r.template.map(|t| (r.file_name, t))) {
            Some((file_name, template)) => {
                debug!(framework, file = file_name, "Creating framework config");
                outcome
                    .edits
                    .push(Artifact::new(context_dir.join(file_name), template));
            }
            None => {
                let names: Vec<&str> = rules.iter().map(|r| r.file_name).collect();
                let message = format!(
                    "No {} config found in '{}' (looked for {})",
                    framework,
                    display_dir(context_dir),
                    names.join(", ")
                );
                warn!("{}", message);
                outcome.warn(message);
            }
        }
        return outcome;
    };

    let relative = context_dir.join(rule.file_name);
    let content = match fs.read_to_string(&root.join(&relative)) {
        Ok(c) => c,
        Err(e) => {
            let message = format!("Could not read {}: {:#}", relative.display(), e);
            warn!("{}", message);
            outcome.warn(message);
            return outcome;
        }
    };

    if rule.is_applied(&content) {
        debug!(file = %relative.display(), "Framework config already patched");
        return outcome;
    }

    match rule.apply(&content) {
        Some(patched) => outcome.edits.push(Artifact::new(relative, patched)),
        None => {
            let message = format!(
                "{} was left unchanged: no recognisable {} config block; update it by hand",
                relative.display(),
                framework
            );
            warn!("{}", message);
            outcome.warn(message);
        }
    }

    outcome
}

fn display_dir(dir: &Path) -> String {
    if dir.as_os_str().is_empty() {
        ".".to_string()
    } else {
        dir.display().to_string()
    }
}
