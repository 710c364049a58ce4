//! SvelteKit: switch to `@sveltejs/adapter-node` and declare the dependency

use super::{apply_rules, Anchor, ConfigPatcher, PatchOutcome, PatchRule};
use crate::artifacts::Artifact;
use crate::fs::FileSystem;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

pub const ADAPTER_PACKAGE: &str = "@sveltejs/adapter-node";
pub const ADAPTER_VERSION: &str = "^5.2.9";
const PACKAGE_MANIFEST: &str = "package.json";

const RULES: &[PatchRule] = &[PatchRule {
    file_name: "svelte.config.js",
    applied_marker: r#"from\s+["']@sveltejs/adapter-node["']"#,
    anchors: &[Anchor {
        pattern: r"(?m)^.*import\s+adapter\s+from.*$",
        replacement: "import adapter from '@sveltejs/adapter-node';",
    }],
    template: None,
}];

/// Add `name` to the manifest's `dependencies`, keeping key order.
/// Returns `None` when it is already declared.
pub fn add_dependency(manifest: &str, name: &str, version: &str) -> Result<Option<String>> {
    let mut json: Value = serde_json::from_str(manifest).context("Invalid package.json")?;
    let root = json
        .as_object_mut()
        .ok_or_else(|| anyhow!("package.json is not a JSON object"))?;

    let dependencies = root
        .entry("dependencies")
        .or_insert_with(|| Value::Object(Default::default()))
        .as_object_mut()
        .ok_or_else(|| anyhow!("package.json \"dependencies\" is not an object"))?;

    if dependencies.contains_key(name) {
        return Ok(None);
    }
    dependencies.insert(name.to_string(), Value::String(version.to_string()));

    let mut text = serde_json::to_string_pretty(&json)?;
    text.push('\n');
    Ok(Some(text))
}

pub struct SvelteKitConfigPatcher;

impl SvelteKitConfigPatcher {
    fn patch_manifest(&self, fs: &dyn FileSystem, root: &Path, context_dir: &Path) -> PatchOutcome {
        let mut outcome = PatchOutcome::default();
        let relative = context_dir.join(PACKAGE_MANIFEST);
        let path = root.join(&relative);

        if !fs.is_file(&path) {
            let message = format!("No package.json in '{}'; add {} by hand", context_dir.display(), ADAPTER_PACKAGE);
            warn!("{}", message);
            outcome.warn(message);
            return outcome;
        }

        let result = fs
            .read_to_string(&path)
            .and_then(|content| add_dependency(&content, ADAPTER_PACKAGE, ADAPTER_VERSION));

        match result {
            Ok(Some(updated)) => outcome.edits.push(Artifact::new(relative, updated)),
            Ok(None) => {}
            Err(e) => {
                let message = format!("{} was left unchanged: {:#}", relative.display(), e);
                warn!("{}", message);
                outcome.warn(message);
            }
        }

        outcome
    }
}

impl ConfigPatcher for SvelteKitConfigPatcher {
    fn name(&self) -> &'static str {
        "SvelteKit"
    }

    fn patch(&self, fs: &dyn FileSystem, root: &Path, context_dir: &Path) -> PatchOutcome {
        let mut outcome = apply_rules(fs, root, context_dir, self.name(), RULES);
        outcome.merge(self.patch_manifest(fs, root, context_dir));
        outcome
    }
}
