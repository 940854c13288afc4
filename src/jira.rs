//! JIRA issue tracker integration.

pub mod client;
pub mod error;

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;

use anyhow::Result;

use crate::audit::IssueId;

pub use client::{build_jql, JiraClient, DEFAULT_JIRA_URL, DEFAULT_PROJECT};
pub use error::JiraError;

/// Trait for issue tracker clients.
pub trait IssueTracker: Send + Sync {
    /// Returns every issue resolved as fixed in any of the given fix versions.
    fn fetch_fixed_issues<'a>(
        &'a self,
        fix_versions: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<BTreeSet<IssueId>>> + Send + 'a>>;
}
