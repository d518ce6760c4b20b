//! Normalises remote pull request data into storage records.
//!
//! The reader sits between the raw gateway and the storage layer: it fetches
//! the commit history for each pull request, converts instants into the fixed
//! display timezone, denormalises the assignee onto comments, and drops
//! comments authored by the assignee themselves.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

use crate::persistence::records::{CommentRecord, PullRequestRecord, storage_id};

use super::error::FetchError;
use super::gateway::SourceGateway;
use super::locator::RepositoryId;
use super::models::ClosedPullRequest;

/// Offset of the fixed display timezone (UTC+9) in seconds.
pub const DISPLAY_OFFSET_SECONDS: i32 = 9 * 3600;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn display_offset() -> FixedOffset {
    // Nine hours is always inside chrono's valid offset range; fall back to
    // UTC rather than panic.
    FixedOffset::east_opt(DISPLAY_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Converts an instant to its wall-clock time in the display timezone.
#[must_use]
pub fn display_datetime(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&display_offset()).naive_local()
}

/// Optional variant of [`display_datetime`]: absent in, absent out.
#[must_use]
pub fn display_datetime_opt(instant: Option<DateTime<Utc>>) -> Option<NaiveDateTime> {
    instant.map(display_datetime)
}

/// Renders an instant in the display timezone as `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn display_timestamp(instant: DateTime<Utc>) -> String {
    display_datetime(instant).format(DISPLAY_FORMAT).to_string()
}

/// Optional variant of [`display_timestamp`]: absent in, absent out.
#[must_use]
pub fn display_timestamp_opt(instant: Option<DateTime<Utc>>) -> Option<String> {
    instant.map(display_timestamp)
}

/// Reads pull request details through a gateway and shapes them for storage.
pub struct SourceReader<'g, G>
where
    G: SourceGateway,
{
    gateway: &'g G,
}

impl<'g, G> SourceReader<'g, G>
where
    G: SourceGateway,
{
    /// Creates a reader over the provided gateway.
    #[must_use]
    pub const fn new(gateway: &'g G) -> Self {
        Self { gateway }
    }

    /// Builds the storage record for a merged pull request.
    ///
    /// Fetches the commit listing to derive the first commit timestamp and
    /// the commit count.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotMerged`] when called with an unmerged pull
    /// request, [`FetchError::EmptyCommitHistory`] when the commit listing is
    /// empty, and propagates gateway failures.
    pub async fn format_pull_request(
        &self,
        id: &RepositoryId,
        pull: &ClosedPullRequest,
    ) -> Result<PullRequestRecord, FetchError> {
        tracing::info!(
            repository = %pull.repository,
            number = pull.number,
            "fetching pull request details"
        );

        let merged_at = pull.merged_at.ok_or(FetchError::NotMerged {
            number: pull.number,
        })?;

        let commits = self.gateway.list_commits(id, pull.number).await?;
        let first_commit = commits.first().ok_or(FetchError::EmptyCommitHistory {
            number: pull.number,
        })?;

        Ok(PullRequestRecord {
            id: storage_id(pull.id),
            repository: pull.repository.clone(),
            number: saturating_count(pull.number),
            title: pull.title.clone(),
            assignee: pull.assignee.clone(),
            target_branch: pull.target_branch.clone(),
            source_branch: pull.source_branch.clone(),
            first_commit_at: display_datetime_opt(first_commit.authored_at),
            merged_at: display_datetime(merged_at),
            num_commits: saturating_count(commits.len()),
        })
    }

    /// Fetches the review comments for a pull request as storage records.
    ///
    /// Comments authored by the pull request's assignee at fetch time are
    /// excluded. With no assignee, every comment is eligible.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn fetch_comments(
        &self,
        id: &RepositoryId,
        pull: &ClosedPullRequest,
    ) -> Result<Vec<CommentRecord>, FetchError> {
        let comments = self.gateway.list_review_comments(id, pull.number).await?;
        let assignee = pull.assignee.as_deref();

        Ok(comments
            .into_iter()
            .filter(|comment| Some(comment.author.as_str()) != assignee)
            .map(|comment| CommentRecord {
                comment_id: storage_id(comment.id),
                assignee: pull.assignee.clone(),
                commenter: comment.author,
                body: comment.body,
                created_at: display_datetime(comment.created_at),
                pull_id: storage_id(pull.id),
            })
            .collect())
    }
}

fn saturating_count<T>(value: T) -> i32
where
    i32: TryFrom<T>,
{
    // Counts come from the API as unsigned; saturate rather than wrap on the
    // (never observed) overflow.
    i32::try_from(value).unwrap_or(i32::MAX)
}
