//! Data models for pull requests, commits, and review comments.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types. Fields GitHub always supplies are
//! required so that unexpected payload shapes fail at deserialisation rather
//! than silently producing empty values; genuinely nullable fields (assignee,
//! merge timestamp, commit author date) use `Option`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A closed pull request as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPullRequest {
    /// Remote-assigned identifier, stable across syncs.
    pub id: u64,
    /// Repository-local pull request number.
    pub number: u64,
    /// Short repository name, not owner-qualified.
    pub repository: String,
    /// Pull request title.
    pub title: String,
    /// Assignee login, absent when nobody is assigned.
    pub assignee: Option<String>,
    /// Ref name the pull request targets.
    pub target_branch: String,
    /// Ref name the pull request comes from.
    pub source_branch: String,
    /// Merge instant; `None` means the pull request was closed unmerged.
    pub merged_at: Option<DateTime<Utc>>,
}

impl ClosedPullRequest {
    /// Returns true when the pull request was merged rather than just closed.
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

/// A commit on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestCommit {
    /// Commit SHA.
    pub sha: String,
    /// Author date from the commit metadata, when recorded.
    pub authored_at: Option<DateTime<Utc>>,
}

/// A review comment attached to a pull request diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestComment {
    /// Remote-assigned comment identifier.
    pub id: u64,
    /// Login of the comment author.
    pub author: String,
    /// Raw comment text.
    pub body: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) id: u64,
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) assignee: Option<ApiUser>,
    pub(super) base: ApiBaseRef,
    pub(super) head: ApiHeadRef,
    pub(super) merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiBaseRef {
    #[serde(rename = "ref")]
    pub(super) ref_name: String,
    pub(super) repo: ApiRepository,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiHeadRef {
    #[serde(rename = "ref")]
    pub(super) ref_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommit {
    pub(super) sha: String,
    pub(super) commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitDetail {
    pub(super) author: Option<ApiCommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitAuthor {
    pub(super) date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiReviewComment {
    pub(super) id: u64,
    pub(super) user: ApiUser,
    pub(super) body: String,
    pub(super) created_at: DateTime<Utc>,
}

impl From<ApiPullRequest> for ClosedPullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            id: value.id,
            number: value.number,
            repository: value.base.repo.name,
            title: value.title,
            assignee: value.assignee.map(|user| user.login),
            target_branch: value.base.ref_name,
            source_branch: value.head.ref_name,
            merged_at: value.merged_at,
        }
    }
}

impl From<ApiCommit> for PullRequestCommit {
    fn from(value: ApiCommit) -> Self {
        Self {
            sha: value.sha,
            authored_at: value.commit.author.and_then(|author| author.date),
        }
    }
}

impl From<ApiReviewComment> for PullRequestComment {
    fn from(value: ApiReviewComment) -> Self {
        Self {
            id: value.id,
            author: value.user.login,
            body: value.body,
            created_at: value.created_at,
        }
    }
}
