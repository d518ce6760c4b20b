//! In-memory store for exercising the synchroniser without a database.

use std::collections::HashSet;

use super::StorageError;
use super::records::{CommentRecord, PullRequestRecord};
use super::store::PullRequestStore;

/// A store backed by plain vectors, enforcing primary-key uniqueness the way
/// the real database does.
///
/// Batches are applied atomically: a duplicate id or an injected failure
/// leaves the store exactly as it was, mirroring the transaction rollback of
/// [`super::PgStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Stored pull request rows, in insertion order.
    pub pull_requests: Vec<PullRequestRecord>,
    /// Stored comment rows, in insertion order.
    pub comments: Vec<CommentRecord>,
    fail_next_insert: bool,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `insert_batch` call fail as a simulated commit error.
    pub const fn fail_next_insert(&mut self) {
        self.fail_next_insert = true;
    }
}

impl PullRequestStore for InMemoryStore {
    fn stored_pull_request_ids(&mut self) -> Result<HashSet<i64>, StorageError> {
        Ok(self.pull_requests.iter().map(|record| record.id).collect())
    }

    fn insert_batch(
        &mut self,
        new_pull_requests: &[PullRequestRecord],
        new_comments: &[CommentRecord],
    ) -> Result<(), StorageError> {
        if self.fail_next_insert {
            self.fail_next_insert = false;
            return Err(StorageError::BatchInsertFailed {
                message: "simulated commit failure".to_owned(),
            });
        }

        let existing_ids: HashSet<i64> =
            self.pull_requests.iter().map(|record| record.id).collect();
        if new_pull_requests
            .iter()
            .any(|record| existing_ids.contains(&record.id))
        {
            return Err(StorageError::BatchInsertFailed {
                message: "duplicate key value violates unique constraint".to_owned(),
            });
        }

        self.pull_requests.extend_from_slice(new_pull_requests);
        self.comments.extend_from_slice(new_comments);
        Ok(())
    }
}
