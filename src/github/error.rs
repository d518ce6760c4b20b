//! Error types exposed by the remote source layer.

use thiserror::Error;

/// Errors surfaced while parsing input or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The repository identifier did not match `owner/name`.
    #[error("repository identifier must match owner/name: {identifier}")]
    InvalidRepositoryId {
        /// The identifier as supplied on the command line.
        identifier: String,
    },

    /// The API base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing or blank.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A pull request without a merge timestamp reached record formatting.
    ///
    /// Only merged pull requests are mirrored; the synchroniser filters
    /// unmerged ones out before formatting, so this indicates a caller bug.
    #[error("pull request #{number} is not merged")]
    NotMerged {
        /// Repository-local pull request number.
        number: u64,
    },

    /// The commit listing for a pull request came back empty.
    ///
    /// A pull request always carries at least one commit; an empty history
    /// violates that data-shape assumption and aborts the run loudly rather
    /// than silently skipping the pull request.
    #[error("pull request #{number} has no commits")]
    EmptyCommitHistory {
        /// Repository-local pull request number.
        number: u64,
    },
}
