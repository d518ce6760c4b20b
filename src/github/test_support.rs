//! In-memory source gateway for exercising the synchroniser without HTTP.

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::FetchError;
use super::gateway::SourceGateway;
use super::locator::RepositoryId;
use super::models::{ClosedPullRequest, PullRequestComment, PullRequestCommit};

/// A canned source gateway serving pre-configured pull request data.
///
/// Pull requests are registered per repository identifier; commit and comment
/// listings are keyed by repository identifier and pull request number, so
/// repositories sharing a number never see each other's data. Unknown
/// repositories list as empty, matching a repository with no closed pull
/// requests.
#[derive(Debug, Default)]
pub struct StaticSourceGateway {
    pulls: HashMap<String, Vec<ClosedPullRequest>>,
    commits: HashMap<(String, u64), Vec<PullRequestCommit>>,
    comments: HashMap<(String, u64), Vec<PullRequestComment>>,
}

impl StaticSourceGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a closed pull request with its commit and comment listings.
    #[must_use]
    pub fn with_pull(
        mut self,
        repository: &str,
        pull: ClosedPullRequest,
        commits: Vec<PullRequestCommit>,
        comments: Vec<PullRequestComment>,
    ) -> Self {
        self.commits
            .insert((repository.to_owned(), pull.number), commits);
        self.comments
            .insert((repository.to_owned(), pull.number), comments);
        self.pulls
            .entry(repository.to_owned())
            .or_default()
            .push(pull);
        self
    }
}

#[async_trait]
impl SourceGateway for StaticSourceGateway {
    async fn list_closed_pull_requests(
        &self,
        id: &RepositoryId,
    ) -> Result<Vec<ClosedPullRequest>, FetchError> {
        Ok(self.pulls.get(&id.to_string()).cloned().unwrap_or_default())
    }

    async fn list_commits(
        &self,
        id: &RepositoryId,
        number: u64,
    ) -> Result<Vec<PullRequestCommit>, FetchError> {
        Ok(self
            .commits
            .get(&(id.to_string(), number))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_review_comments(
        &self,
        id: &RepositoryId,
        number: u64,
    ) -> Result<Vec<PullRequestComment>, FetchError> {
        Ok(self
            .comments
            .get(&(id.to_string(), number))
            .cloned()
            .unwrap_or_default())
    }
}
