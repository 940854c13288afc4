//! JIRA-specific error handling.

use thiserror::Error;

/// JIRA REST API errors.
#[derive(Error, Debug)]
pub enum JiraError {
    /// The configured base URL is not usable.
    #[error("Invalid JIRA URL: {0}")]
    InvalidUrl(String),

    /// No fix versions were given to search for.
    #[error("At least one fix version is required")]
    NoFixVersions,

    /// JIRA search request failed with error message.
    #[error("JIRA search request failed: {0}")]
    ApiRequestFailed(String),

    /// Invalid response format from the JIRA search API.
    #[error("Invalid response format from JIRA: {0}")]
    InvalidResponseFormat(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}
