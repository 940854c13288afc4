//! Git-specific error handling.

use thiserror::Error;

/// Repository errors the audit cannot recover from.
#[derive(Error, Debug)]
pub enum GitError {
    /// The two branches share no history.
    #[error("can not find merge base for {first} and {second}")]
    NoMergeBase {
        /// First revision given.
        first: String,
        /// Second revision given.
        second: String,
    },

    /// A branch, tag or commit could not be resolved.
    #[error("Failed to resolve revision: {0}")]
    UnknownRevision(String),
}
