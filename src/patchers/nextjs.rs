//! Next.js: `output: "standalone"` in `next.config.*`

use super::{apply_rules, Anchor, ConfigPatcher, PatchOutcome, PatchRule};
use crate::fs::FileSystem;
use std::path::Path;

const STANDALONE_MARKER: &str = r#"output\s*:\s*["']standalone["']"#;

const JS_TEMPLATE: &str = r#"/** @type {import('next').NextConfig} */
const nextConfig = {
  output: "standalone",
};

export default nextConfig;
"#;

const JS_ANCHORS: &[Anchor] = &[
    Anchor {
        pattern: r"const\s+nextConfig\s*=\s*\{",
        replacement: "const nextConfig = {\n  output: \"standalone\",",
    },
    Anchor {
        pattern: r"module\.exports\s*=\s*\{",
        replacement: "module.exports = {\n  output: \"standalone\",",
    },
];

const TS_ANCHORS: &[Anchor] = &[Anchor {
    pattern: r"const\s+nextConfig\s*:\s*NextConfig\s*=\s*\{",
    replacement: "const nextConfig: NextConfig = {\n  output: \"standalone\",",
}];

const RULES: &[PatchRule] = &[
    PatchRule {
        file_name: "next.config.js",
        applied_marker: STANDALONE_MARKER,
        anchors: JS_ANCHORS,
        template: Some(JS_TEMPLATE),
    },
    PatchRule {
        file_name: "next.config.mjs",
        applied_marker: STANDALONE_MARKER,
        anchors: JS_ANCHORS,
        template: None,
    },
    PatchRule {
        file_name: "next.config.ts",
        applied_marker: STANDALONE_MARKER,
        anchors: TS_ANCHORS,
        template: None,
    },
];

pub struct NextConfigPatcher;

impl ConfigPatcher for NextConfigPatcher {
    fn name(&self) -> &'static str {
        "Next.js"
    }

    fn patch(&self, fs: &dyn FileSystem, root: &Path, context_dir: &Path) -> PatchOutcome {
        apply_rules(fs, root, context_dir, self.name(), RULES)
    }
}
