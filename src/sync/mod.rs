//! Incremental synchronisation of merged pull requests into storage.
//!
//! One [`Synchronizer::sync`] call handles one repository: diff the remote
//! closed pull requests against the ids already stored, fetch details and
//! review comments for the new merged ones, and hand everything to the store
//! as a single transactional batch. Reruns are idempotent because previously
//! stored ids are skipped before any detail fetch happens.

use thiserror::Error;

use crate::github::error::FetchError;
use crate::github::gateway::SourceGateway;
use crate::github::locator::RepositoryId;
use crate::github::models::ClosedPullRequest;
use crate::github::reader::SourceReader;
use crate::persistence::records::storage_id;
use crate::persistence::{PullRequestStore, StorageError};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Errors surfaced by a synchronisation run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// Reading from the remote source failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Persisting the batch failed; the batch was rolled back.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Rows inserted by one successful synchronisation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Newly inserted pull request rows.
    pub pull_requests: usize,
    /// Newly inserted comment rows.
    pub comments: usize,
}

/// Orchestrates the diff-and-fetch-and-store flow for one repository.
pub struct Synchronizer<'a, G, S>
where
    G: SourceGateway,
    S: PullRequestStore,
{
    gateway: &'a G,
    store: &'a mut S,
}

impl<'a, G, S> Synchronizer<'a, G, S>
where
    G: SourceGateway,
    S: PullRequestStore,
{
    /// Creates a synchroniser over the given gateway and store.
    #[must_use]
    pub const fn new(gateway: &'a G, store: &'a mut S) -> Self {
        Self { gateway, store }
    }

    /// Mirrors every merged, not-yet-stored pull request of the repository.
    ///
    /// Details and comments are only fetched for pull requests passing both
    /// the merged filter and the dedup check, and the whole batch commits in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fetch`] when the remote source fails and
    /// [`SyncError::Storage`] when the commit fails; in the latter case the
    /// entire batch has been rolled back.
    pub async fn sync(&mut self, id: &RepositoryId) -> Result<SyncReport, SyncError> {
        let stored_ids = self.store.stored_pull_request_ids()?;
        let closed = self.gateway.list_closed_pull_requests(id).await?;

        let candidates: Vec<_> = closed
            .into_iter()
            .filter(ClosedPullRequest::is_merged)
            .filter(|pull| !stored_ids.contains(&storage_id(pull.id)))
            .collect();

        let reader = SourceReader::new(self.gateway);
        let mut new_pull_requests = Vec::with_capacity(candidates.len());
        let mut new_comments = Vec::new();
        for pull in &candidates {
            new_pull_requests.push(reader.format_pull_request(id, pull).await?);
            new_comments.extend(reader.fetch_comments(id, pull).await?);
        }

        self.store.insert_batch(&new_pull_requests, &new_comments)?;

        Ok(SyncReport {
            pull_requests: new_pull_requests.len(),
            comments: new_comments.len(),
        })
    }
}

/// Mirrors each repository in turn over one shared store session.
///
/// A failed commit discards that repository's batch, is logged, and does not
/// stop later repositories. Remote source failures propagate: the original
/// data may be mid-listing and the safest move is to end the run.
///
/// # Errors
///
/// Returns [`SyncError::Fetch`] when reading from the remote source fails.
pub async fn mirror_repositories<G, S>(
    gateway: &G,
    store: &mut S,
    telemetry: &dyn TelemetrySink,
    identifiers: &[RepositoryId],
) -> Result<(), SyncError>
where
    G: SourceGateway,
    S: PullRequestStore,
{
    for id in identifiers {
        let mut synchronizer = Synchronizer::new(gateway, &mut *store);
        match synchronizer.sync(id).await {
            Ok(report) => {
                tracing::info!(
                    repository = %id,
                    pull_requests = report.pull_requests,
                    comments = report.comments,
                    "repository mirrored"
                );
                telemetry.record(TelemetryEvent::RepositoryMirrored {
                    repository: id.to_string(),
                    pull_requests: report.pull_requests,
                    comments: report.comments,
                });
            }
            Err(SyncError::Storage(error)) => {
                tracing::error!(repository = %id, %error, "batch discarded, continuing");
            }
            Err(error) => return Err(error),
        }
    }

    Ok(())
}
