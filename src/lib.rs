//! # release-audit
//!
//! Cross-references the commit history of release branches against the
//! issues JIRA marks as fixed for a release.
//!
//! ## Reports
//!
//! - Issues committed to the previous release but missing from the current one
//! - Issues fixed in JIRA with no matching commit
//! - Issues with commits that JIRA does not list as fixed
//!
//! ## Quick Start
//!
//! ```rust
//! use release_audit::audit::extract;
//!
//! let issue = extract("[HBSE-123] Fix region split").unwrap();
//! assert_eq!(issue.as_str(), "HBASE-123");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod cli;
pub mod git;
pub mod jira;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of release-audit.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
