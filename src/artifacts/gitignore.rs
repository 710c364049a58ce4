//! `.gitignore` entries for generated scripts and env files

pub const GITIGNORE_FILE: &str = ".gitignore";
pub const GITIGNORE_ENTRIES: [&str; 4] = ["deploy.sh", "update.sh", ".env", ".env.*"];

/// Append the missing entries to an existing `.gitignore`.
///
/// Existing lines are kept verbatim. Returns `None` when every entry is
/// already present, so a second run leaves the file untouched.
pub fn merge(existing: Option<&str>) -> Option<String> {
    let existing = existing.unwrap_or("");
    let present: Vec<&str> = existing.lines().map(str::trim).collect();

    let missing: Vec<&str> = GITIGNORE_ENTRIES
        .iter()
        .copied()
        .filter(|entry| !present.contains(entry))
        .collect();

    if missing.is_empty() {
        return None;
    }

    let mut merged = existing.to_string();
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    for entry in missing {
        merged.push_str(entry);
        merged.push('\n');
    }
    Some(merged)
}
