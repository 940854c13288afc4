//! Git repository operations

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Commit, ErrorCode, Repository};
use tracing::debug;

use super::{GitError, SHORT_HASH_LEN};

/// Read access to the commit history the audit needs.
pub trait CommitSource {
    /// Returns the hex id of the closest common ancestor of two revisions.
    ///
    /// Fails with [`GitError::NoMergeBase`] when the histories are unrelated.
    fn merge_base(&self, first: &str, second: &str) -> Result<String>;

    /// Returns the summary line of every commit reachable from `to` but not
    /// from `from`, in revwalk order.
    fn commit_summaries(&self, from: &str, to: &str) -> Result<Vec<String>>;
}

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)
            .with_context(|| format!("Failed to open git repository: {}", path.display()))?;

        Ok(Self { repo })
    }

    /// Resolve a branch, tag or commit spec to a commit
    fn resolve_commit(&self, spec: &str) -> Result<Commit<'_>> {
        let obj = self
            .repo
            .revparse_single(spec)
            .map_err(|_| GitError::UnknownRevision(spec.to_string()))?;
        obj.peel_to_commit()
            .with_context(|| format!("Failed to peel {spec} to commit"))
    }
}

impl CommitSource for GitRepository {
    fn merge_base(&self, first: &str, second: &str) -> Result<String> {
        let first_commit = self.resolve_commit(first)?;
        let second_commit = self.resolve_commit(second)?;

        let oid = match self.repo.merge_base(first_commit.id(), second_commit.id()) {
            Ok(oid) => oid,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(GitError::NoMergeBase {
                    first: first.to_string(),
                    second: second.to_string(),
                }
                .into());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to compute merge base of {first} and {second}")
                });
            }
        };

        let hash = oid.to_string();
        debug!(
            first,
            second,
            merge_base = &hash[..SHORT_HASH_LEN],
            "Resolved merge base"
        );

        Ok(hash)
    }

    fn commit_summaries(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let start_commit = self.resolve_commit(from)?;
        let end_commit = self.resolve_commit(to)?;

        // Walk from end_commit back to start_commit (exclusive)
        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker
            .push(end_commit.id())
            .context("Failed to push end commit")?;
        walker
            .hide(start_commit.id())
            .context("Failed to hide start commit")?;

        let mut summaries = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;

            summaries.push(summary_line(&commit));
        }

        debug!(from, to, count = summaries.len(), "Walked commit range");

        Ok(summaries)
    }
}

/// First line of the commit message, lossily decoded
fn summary_line(commit: &Commit<'_>) -> String {
    let message = String::from_utf8_lossy(commit.message_bytes());
    message.lines().next().unwrap_or("").to_string()
}
