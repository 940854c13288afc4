//! Leading issue ID extraction from commit summaries.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use super::issue::IssueId;

/// Compiles a case-insensitive pattern from the static tables below.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap()
}

/// Administrative commits that are never tied to an issue.
static SKIP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^preparing development version.+",
        r"^preparing hbase release.+",
        r"^\s*updated? pom.xml version (for|to) .+",
        r"^\s*updated? chang",
        r"^\s*updated? (book|docs|documentation)",
        r"^\s*updating (docs|changes).+",
        r"^\s*bump (pom )?versions?",
        r"^\s*updated? (version|poms|changes).+",
    ]
    .into_iter()
    .map(case_insensitive)
    .collect()
});

/// Leading issue keys, canonical spelling first, then known typos.
static LEADING_ISSUE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^[\s\[]*(hbase-\d+)",
        r"^[\s\[]*(hbse-\d+)",
        r"^[\s\[]*(hbae-\d+)",
        r"^[\s\[]*(hbase \d+)",
    ]
    .into_iter()
    .map(case_insensitive)
    .collect()
});

/// Returns true when the summary is release or documentation housekeeping.
pub fn is_administrative(summary: &str) -> bool {
    SKIP_PATTERNS.iter().any(|pattern| pattern.is_match(summary))
}

/// Extracts the leading issue ID from a commit summary.
///
/// Administrative commits are skipped even when they mention an issue.
/// Otherwise the leading-key patterns are tried in order and the first
/// match is normalized.
pub fn extract(summary: &str) -> Option<IssueId> {
    if is_administrative(summary) {
        return None;
    }

    LEADING_ISSUE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(summary))
        .and_then(|captures| captures.get(1))
        .map(|token| IssueId::normalize(token.as_str()))
}

/// Extracts every issue ID referenced by a range of commit summaries.
pub fn extract_all<I, S>(summaries: I) -> BTreeSet<IssueId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    summaries
        .into_iter()
        .filter_map(|summary| extract(summary.as_ref()))
        .collect()
}
