//! Ignore lists of issues excluded from a report.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::issue::IssueId;

/// Parses ignore-list contents.
///
/// The first whitespace-separated token of each line is the issue key;
/// anything after it is free-form. Blank lines and `#` comments are skipped.
pub fn parse_ignore_list(content: &str) -> BTreeSet<IssueId> {
    content
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|token| !token.starts_with('#'))
        .map(IssueId::normalize)
        .collect()
}

/// Loads an ignore list, or an empty set when no file was given.
pub fn load_ignore_list(path: Option<&Path>) -> Result<BTreeSet<IssueId>> {
    let Some(path) = path else {
        return Ok(BTreeSet::new());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ignore list: {}", path.display()))?;
    let issues = parse_ignore_list(&content);

    debug!(path = %path.display(), count = issues.len(), "Loaded ignore list");

    Ok(issues)
}
