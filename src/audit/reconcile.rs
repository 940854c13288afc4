//! Set reconciliation between commit history and the issue tracker.

use std::collections::BTreeSet;

use super::issue::IssueId;

/// Returns `left - right - ignore` in ascending order.
fn difference(
    left: &BTreeSet<IssueId>,
    right: &BTreeSet<IssueId>,
    ignore: &BTreeSet<IssueId>,
) -> Vec<IssueId> {
    left.difference(right)
        .filter(|issue| !ignore.contains(*issue))
        .cloned()
        .collect()
}

/// Issues committed to the previous release but absent from the current one.
///
/// A non-empty result usually means a backport was lost.
pub fn missed_in_previous_release(
    current: &BTreeSet<IssueId>,
    previous: &BTreeSet<IssueId>,
    ignore: &BTreeSet<IssueId>,
) -> Vec<IssueId> {
    difference(previous, current, ignore)
}

/// Issues the tracker lists as fixed with no matching commit.
pub fn in_tracker_not_in_commits(
    tracker: &BTreeSet<IssueId>,
    commits: &BTreeSet<IssueId>,
    ignore: &BTreeSet<IssueId>,
) -> Vec<IssueId> {
    difference(tracker, commits, ignore)
}

/// Issues referenced by commits that the tracker does not list as fixed.
pub fn in_commits_not_in_tracker(
    commits: &BTreeSet<IssueId>,
    tracker: &BTreeSet<IssueId>,
    ignore: &BTreeSet<IssueId>,
) -> Vec<IssueId> {
    difference(commits, tracker, ignore)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> BTreeSet<IssueId> {
        keys.iter().map(|key| IssueId::from(*key)).collect()
    }

    fn keys(ids: &[IssueId]) -> Vec<&str> {
        ids.iter().map(IssueId::as_str).collect()
    }

    #[test]
    fn missed_in_previous_release_reports_lost_backports() {
        let missed = missed_in_previous_release(
            &set(&["HBASE-1"]),
            &set(&["HBASE-1", "HBASE-2"]),
            &BTreeSet::new(),
        );
        assert_eq!(keys(&missed), ["HBASE-2"]);
    }

    #[test]
    fn ignore_list_suppresses_tracker_issue() {
        let missing = in_tracker_not_in_commits(
            &set(&["HBASE-1", "HBASE-2"]),
            &set(&["HBASE-1"]),
            &set(&["HBASE-2"]),
        );
        assert!(missing.is_empty());
    }

    #[test]
    fn commits_not_in_tracker() {
        let extra = in_commits_not_in_tracker(
            &set(&["HBASE-3", "HBASE-1", "HBASE-20"]),
            &set(&["HBASE-1"]),
            &set(&["HBASE-99"]),
        );
        assert_eq!(keys(&extra), ["HBASE-20", "HBASE-3"]);
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        let empty = BTreeSet::new();
        assert!(missed_in_previous_release(&empty, &empty, &empty).is_empty());
        assert!(in_tracker_not_in_commits(&empty, &empty, &empty).is_empty());
        assert!(in_commits_not_in_tracker(&empty, &empty, &empty).is_empty());
    }

    #[test]
    fn ignore_does_not_add_issues() {
        let result = in_tracker_not_in_commits(
            &set(&["HBASE-1"]),
            &BTreeSet::new(),
            &set(&["HBASE-2", "HBASE-3"]),
        );
        assert_eq!(keys(&result), ["HBASE-1"]);
    }

    // ── property tests ────────────────────────────────────────────

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn ids(numbers: &[u16]) -> BTreeSet<IssueId> {
            numbers
                .iter()
                .map(|n| IssueId::from(format!("HBASE-{n}").as_str()))
                .collect()
        }

        proptest! {
            #[test]
            fn insertion_order_irrelevant(
                mut left in prop::collection::vec(0_u16..200, 0..40),
                mut right in prop::collection::vec(0_u16..200, 0..40),
            ) {
                let forward = in_commits_not_in_tracker(&ids(&left), &ids(&right), &BTreeSet::new());
                left.reverse();
                right.reverse();
                let backward = in_commits_not_in_tracker(&ids(&left), &ids(&right), &BTreeSet::new());
                prop_assert_eq!(forward, backward);
            }

            #[test]
            fn result_sorted_and_disjoint(
                left in prop::collection::vec(0_u16..200, 0..40),
                right in prop::collection::vec(0_u16..200, 0..40),
                ignore in prop::collection::vec(0_u16..200, 0..10),
            ) {
                let (left, right, ignore) = (ids(&left), ids(&right), ids(&ignore));
                let result = in_tracker_not_in_commits(&left, &right, &ignore);
                prop_assert!(result.windows(2).all(|pair| pair[0] < pair[1]));
                for issue in &result {
                    prop_assert!(left.contains(issue));
                    prop_assert!(!right.contains(issue));
                    prop_assert!(!ignore.contains(issue));
                }
            }
        }
    }
}
