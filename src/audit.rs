//! Release audit: commit history versus issue tracker fix versions.

pub mod extract;
pub mod ignore;
pub mod issue;
pub mod reconcile;
pub mod report;

use std::collections::BTreeSet;
use std::fmt;

use anyhow::Result;
use tracing::info;

use crate::git::CommitSource;
use crate::jira::IssueTracker;

pub use extract::{extract, extract_all, is_administrative};
pub use ignore::{load_ignore_list, parse_ignore_list};
pub use issue::IssueId;
pub use report::AuditReport;

/// Tag prefix of published releases, e.g. `rel/2.4.0`.
pub const DEFAULT_RELEASE_TAG_PREFIX: &str = "rel/";

/// What to compare in an audit run.
#[derive(Debug, Clone)]
pub struct AuditParams {
    /// Branch the current release is cut from.
    pub release_branch: String,
    /// Branch the previous release was cut from.
    pub previous_release_branch: String,
    /// Version string of the previous release.
    pub previous_release_version: String,
    /// Fix versions of the current release in the tracker.
    pub release_versions: Vec<String>,
    /// Prefix joined with the previous version to name its release tag.
    pub release_tag_prefix: String,
}

impl AuditParams {
    /// Returns the tag of the previous release.
    pub fn previous_release_tag(&self) -> String {
        format!(
            "{}{}",
            self.release_tag_prefix, self.previous_release_version
        )
    }
}

/// Issues excluded from each report.
///
/// The three lists are configured independently.
#[derive(Debug, Clone, Default)]
pub struct IgnoreLists {
    /// Suppresses entries of the previous-release report.
    pub missing_in_current_release: BTreeSet<IssueId>,
    /// Suppresses entries of the tracker-only report.
    pub missing_in_git: BTreeSet<IssueId>,
    /// Suppresses entries of the commit-only report.
    pub missing_in_jira: BTreeSet<IssueId>,
}

/// Issues referenced by the commits of one range.
#[derive(Debug, Clone)]
pub struct RangeIssues {
    /// Excluded start of the range.
    pub from: String,
    /// Included end of the range.
    pub to: String,
    /// Number of commits walked.
    pub commit_count: usize,
    /// Issue IDs extracted from the commit summaries.
    pub issues: BTreeSet<IssueId>,
}

impl fmt::Display for RangeIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "there are {} commits from {} to {}",
            self.commit_count, self.from, self.to
        )
    }
}

/// Commit issues of the current and previous release lines.
#[derive(Debug, Clone)]
pub struct ReleaseIssues {
    /// Merge base of the two release branches.
    pub merge_base: String,
    /// Range from the merge base to the current release branch.
    pub current: RangeIssues,
    /// Range from the merge base to the previous release tag.
    pub previous: RangeIssues,
}

impl ReleaseIssues {
    /// Issues in the previous release missing from the current one.
    pub fn missed_in_previous_release(&self, ignore: &BTreeSet<IssueId>) -> Vec<IssueId> {
        reconcile::missed_in_previous_release(&self.current.issues, &self.previous.issues, ignore)
    }

    /// Issues committed to the current release and not already shipped in
    /// the previous one; only these are expected under the new fix versions.
    pub fn new_in_release(&self) -> BTreeSet<IssueId> {
        self.current
            .issues
            .difference(&self.previous.issues)
            .cloned()
            .collect()
    }
}

/// Runs the audit against a commit source and an issue tracker.
pub struct Auditor<'a> {
    commits: &'a dyn CommitSource,
    tracker: &'a dyn IssueTracker,
}

impl<'a> Auditor<'a> {
    /// Creates an auditor over the given collaborators.
    pub fn new(commits: &'a dyn CommitSource, tracker: &'a dyn IssueTracker) -> Self {
        Self { commits, tracker }
    }

    /// Collects the issue IDs referenced by commits in `from..to`.
    pub fn issues_in_range(&self, from: &str, to: &str) -> Result<RangeIssues> {
        let summaries = self.commits.commit_summaries(from, to)?;
        let issues = extract_all(&summaries);

        info!(
            from,
            to,
            commits = summaries.len(),
            issues = issues.len(),
            "Extracted issues from commit range"
        );

        Ok(RangeIssues {
            from: from.to_string(),
            to: to.to_string(),
            commit_count: summaries.len(),
            issues,
        })
    }

    /// Walks both release lines from their merge base.
    ///
    /// Fails before touching the tracker when the branches share no history.
    pub fn release_issues(&self, params: &AuditParams) -> Result<ReleaseIssues> {
        let merge_base = self
            .commits
            .merge_base(&params.release_branch, &params.previous_release_branch)?;

        let current = self.issues_in_range(&merge_base, &params.release_branch)?;
        let previous = self.issues_in_range(&merge_base, &params.previous_release_tag())?;

        Ok(ReleaseIssues {
            merge_base,
            current,
            previous,
        })
    }

    /// Fetches the tracker's fixed issues and builds the full report.
    pub async fn report(
        &self,
        params: &AuditParams,
        release: &ReleaseIssues,
        ignore: &IgnoreLists,
    ) -> Result<AuditReport> {
        let tracker = self
            .tracker
            .fetch_fixed_issues(&params.release_versions)
            .await?;
        let new_in_release = release.new_in_release();

        Ok(AuditReport {
            missed_in_previous_release: release
                .missed_in_previous_release(&ignore.missing_in_current_release),
            in_tracker_not_in_commits: reconcile::in_tracker_not_in_commits(
                &tracker,
                &new_in_release,
                &ignore.missing_in_git,
            ),
            in_commits_not_in_tracker: reconcile::in_commits_not_in_tracker(
                &new_in_release,
                &tracker,
                &ignore.missing_in_jira,
            ),
        })
    }

    /// Runs every comparison and returns the report.
    pub async fn run(&self, params: &AuditParams, ignore: &IgnoreLists) -> Result<AuditReport> {
        let release = self.release_issues(params)?;
        self.report(params, &release, ignore).await
    }
}
