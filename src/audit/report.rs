//! Human-readable discrepancy report.

use std::fmt;

use super::issue::IssueId;

/// Header of the lost-backport section.
pub const MISSED_IN_PREVIOUS_RELEASE_HEADER: &str =
    "Commit to previous release but not in current release:";
/// Header of the tracker-only section.
pub const IN_TRACKER_NOT_IN_COMMITS_HEADER: &str = "Issues in jira but not in git commits:";
/// Header of the commit-only section.
pub const IN_COMMITS_NOT_IN_TRACKER_HEADER: &str = "Issues in git commits but not in jira:";

/// The three discrepancy lists produced by an audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Issues in the previous release missing from the current release.
    pub missed_in_previous_release: Vec<IssueId>,
    /// Issues fixed in the tracker without a matching commit.
    pub in_tracker_not_in_commits: Vec<IssueId>,
    /// Issues with commits that the tracker does not list as fixed.
    pub in_commits_not_in_tracker: Vec<IssueId>,
}

impl AuditReport {
    /// Returns true when no discrepancy was found.
    pub fn is_clean(&self) -> bool {
        self.missed_in_previous_release.is_empty()
            && self.in_tracker_not_in_commits.is_empty()
            && self.in_commits_not_in_tracker.is_empty()
    }

    /// Returns the sections paired with their headers, in print order.
    pub fn sections(&self) -> [(&'static str, &[IssueId]); 3] {
        [
            (
                MISSED_IN_PREVIOUS_RELEASE_HEADER,
                self.missed_in_previous_release.as_slice(),
            ),
            (
                IN_TRACKER_NOT_IN_COMMITS_HEADER,
                self.in_tracker_not_in_commits.as_slice(),
            ),
            (
                IN_COMMITS_NOT_IN_TRACKER_HEADER,
                self.in_commits_not_in_tracker.as_slice(),
            ),
        ]
    }
}

/// Renders one section: the header, then one tab-indented issue per line.
pub fn render_section(header: &str, issues: &[IssueId]) -> String {
    let mut section = format!("{header}\n");
    for issue in issues {
        section.push('\t');
        section.push_str(issue.as_str());
        section.push('\n');
    }
    section
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (header, issues) in self.sections() {
            f.write_str(&render_section(header, issues))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tab_indented_sections() {
        let report = AuditReport {
            missed_in_previous_release: vec![IssueId::from("HBASE-2")],
            in_tracker_not_in_commits: vec![],
            in_commits_not_in_tracker: vec![IssueId::from("HBASE-3"), IssueId::from("HBASE-4")],
        };

        assert_eq!(
            report.to_string(),
            "Commit to previous release but not in current release:\n\
             \tHBASE-2\n\
             Issues in jira but not in git commits:\n\
             Issues in git commits but not in jira:\n\
             \tHBASE-3\n\
             \tHBASE-4\n"
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn section_without_issues_is_header_only() {
        assert_eq!(
            render_section(IN_TRACKER_NOT_IN_COMMITS_HEADER, &[]),
            "Issues in jira but not in git commits:\n"
        );
    }

    #[test]
    fn empty_report_is_clean() {
        let report = AuditReport::default();
        assert!(report.is_clean());
        assert_eq!(report.to_string().lines().count(), 3);
    }
}
