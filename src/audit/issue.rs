//! Normalized issue identifiers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Canonical prefix shared by every normalized issue key.
pub const ISSUE_PREFIX: &str = "HBASE-";

// Misspellings of the project key seen in commit history.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static TYPO_PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HBSE-|HBAE-|HBASE ").unwrap());

/// An issue tracker key such as `HBASE-1234`.
///
/// Always stored uppercase with the canonical prefix, so two spellings of
/// the same issue compare equal. Ordering is lexicographic on the key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueId(String);

impl IssueId {
    /// Normalizes a raw token into an issue key.
    ///
    /// The token is uppercased and the known typo prefixes (`HBSE-`,
    /// `HBAE-`, `HBASE `) are rewritten to `HBASE-`. Tokens that are not
    /// issue keys at all pass through uppercased.
    pub fn normalize(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        Self(
            TYPO_PREFIX_PATTERN
                .replace_all(&upper, ISSUE_PREFIX)
                .into_owned(),
        )
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IssueId {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}
