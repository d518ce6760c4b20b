//! Gateways for reading pull request data through Octocrab.
//!
//! The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests. Pagination is handled
//! transparently: every listing operation drains all pages before returning.

mod client;
mod error_mapping;
mod octocrab_impl;

pub use octocrab_impl::OctocrabSourceGateway;

use async_trait::async_trait;

use crate::github::error::FetchError;
use crate::github::locator::RepositoryId;
use crate::github::models::{ClosedPullRequest, PullRequestComment, PullRequestCommit};

/// Gateway that can read pull request data for a repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceGateway: Send + Sync {
    /// List every closed pull request in the repository.
    async fn list_closed_pull_requests(
        &self,
        id: &RepositoryId,
    ) -> Result<Vec<ClosedPullRequest>, FetchError>;

    /// List the commits on a pull request, oldest first.
    async fn list_commits(
        &self,
        id: &RepositoryId,
        number: u64,
    ) -> Result<Vec<PullRequestCommit>, FetchError>;

    /// List all review comments on a pull request.
    async fn list_review_comments(
        &self,
        id: &RepositoryId,
        number: u64,
    ) -> Result<Vec<PullRequestComment>, FetchError>;
}
