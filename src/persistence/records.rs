//! Storage records persisted into the mirror tables.

use chrono::NaiveDateTime;
use diesel::prelude::{Insertable, Queryable};

use super::schema::{comments, pull_requests};

/// Converts a remote-assigned unsigned id into the signed storage form.
///
/// Diesel's `BigInt` binds as `i64`; remote ids fit comfortably, so saturate
/// rather than fail on the theoretical overflow.
#[must_use]
pub fn storage_id(remote: u64) -> i64 {
    i64::try_from(remote).unwrap_or(i64::MAX)
}

/// A merged pull request in storage shape.
///
/// Rows are inserted exactly once and never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Insertable)]
#[diesel(table_name = pull_requests)]
pub struct PullRequestRecord {
    /// Remote-assigned identifier, the dedup key.
    pub id: i64,
    /// Short repository name as reported by the API.
    pub repository: String,
    /// Repository-local pull request number.
    pub number: i32,
    /// Pull request title.
    pub title: String,
    /// Assignee login, absent when nobody was assigned.
    pub assignee: Option<String>,
    /// Ref name the pull request targeted.
    pub target_branch: String,
    /// Ref name the pull request came from.
    pub source_branch: String,
    /// First commit author date in the display timezone, absent when the
    /// commit metadata carried no author date.
    pub first_commit_at: Option<NaiveDateTime>,
    /// Merge instant in the display timezone; always present, unmerged pull
    /// requests are never stored.
    pub merged_at: NaiveDateTime,
    /// Count of commits on the pull request.
    pub num_commits: i32,
}

/// A review comment in storage shape.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Insertable)]
#[diesel(table_name = comments)]
pub struct CommentRecord {
    /// Remote-assigned comment identifier.
    pub comment_id: i64,
    /// Pull request assignee at fetch time, denormalised onto the comment.
    pub assignee: Option<String>,
    /// Comment author login; never equals `assignee`.
    pub commenter: String,
    /// Raw comment text.
    pub body: String,
    /// Creation instant in the display timezone.
    pub created_at: NaiveDateTime,
    /// Owning pull request id.
    pub pull_id: i64,
}
