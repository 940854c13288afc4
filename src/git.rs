//! Git repository access.

pub mod error;
pub mod repository;

pub use error::GitError;
pub use repository::{CommitSource, GitRepository};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
