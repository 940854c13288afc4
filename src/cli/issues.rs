//! Issues command — lists issue IDs extracted from a commit range.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::audit::extract_all;
use crate::git::{CommitSource, GitRepository};

/// Issues command options.
#[derive(Parser)]
pub struct IssuesCommand {
    /// Commit range to scan (e.g., rel/2.4.0..branch-2.5).
    #[arg(value_name = "COMMIT_RANGE")]
    pub commit_range: String,

    /// Local git repository directory.
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,
}

impl IssuesCommand {
    /// Executes the issues command.
    pub fn execute(self) -> Result<()> {
        let (from, to) = parse_range(&self.commit_range)?;

        let repo = GitRepository::open_at(&self.repo)?;
        let summaries = repo.commit_summaries(from, to)?;
        let issues = extract_all(&summaries);

        info!(
            commits = summaries.len(),
            issues = issues.len(),
            "Scanned commit range"
        );

        for issue in issues {
            println!("{issue}");
        }

        Ok(())
    }
}

/// Splits `FROM..TO` into its endpoints.
///
/// `FROM...TO` is rejected: the scan always covers commits reachable from
/// `TO` but not from `FROM`, never the symmetric difference.
fn parse_range(range: &str) -> Result<(&str, &str)> {
    if range.contains("...") {
        anyhow::bail!(
            "Symmetric difference ranges are not supported, use FROM..TO: {}",
            range
        );
    }

    let (from, to) = range
        .split_once("..")
        .ok_or_else(|| anyhow::anyhow!("Invalid range format: {}", range))?;

    if from.is_empty() || to.is_empty() {
        anyhow::bail!("Invalid range format: {}", range);
    }

    Ok((from, to))
}
