//! Storage gateway owning the database session and transaction boundary.

use std::collections::HashSet;

use diesel::Connection;
use diesel::QueryDsl;
use diesel::RunQueryDsl;
use diesel::pg::PgConnection;

use super::StorageError;
use super::records::{CommentRecord, PullRequestRecord};
use super::schema::{comments, pull_requests};

/// Store that can report known pull request ids and accept insert batches.
#[cfg_attr(test, mockall::automock)]
pub trait PullRequestStore {
    /// Reads the ids of every pull request currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QueryFailed`] when the query fails.
    fn stored_pull_request_ids(&mut self) -> Result<HashSet<i64>, StorageError>;

    /// Inserts the batch inside one transaction.
    ///
    /// Any failure rolls the entire batch back; no partial persistence.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BatchInsertFailed`] when the transaction does
    /// not commit.
    fn insert_batch(
        &mut self,
        pull_requests: &[PullRequestRecord],
        comments: &[CommentRecord],
    ) -> Result<(), StorageError>;
}

/// Postgres-backed store holding the single long-lived connection.
///
/// The connection is reused sequentially across repository identifiers; there
/// is deliberately no pooling because the mirror makes one call at a time.
pub struct PgStore {
    connection: PgConnection,
}

impl PgStore {
    /// Connects to the database at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BlankDatabaseUrl`] for a blank URL and
    /// [`StorageError::ConnectionFailed`] when Diesel cannot connect.
    pub fn connect(database_url: &str) -> Result<Self, StorageError> {
        let trimmed = database_url.trim();
        if trimmed.is_empty() {
            return Err(StorageError::BlankDatabaseUrl);
        }

        let connection =
            PgConnection::establish(trimmed).map_err(|error| StorageError::ConnectionFailed {
                message: error.to_string(),
            })?;

        Ok(Self { connection })
    }
}

impl PullRequestStore for PgStore {
    fn stored_pull_request_ids(&mut self) -> Result<HashSet<i64>, StorageError> {
        pull_requests::table
            .select(pull_requests::id)
            .load::<i64>(&mut self.connection)
            .map(|ids| ids.into_iter().collect())
            .map_err(|error| StorageError::QueryFailed {
                message: error.to_string(),
            })
    }

    fn insert_batch(
        &mut self,
        new_pull_requests: &[PullRequestRecord],
        new_comments: &[CommentRecord],
    ) -> Result<(), StorageError> {
        self.connection
            .transaction::<_, diesel::result::Error, _>(|connection| {
                diesel::insert_into(pull_requests::table)
                    .values(new_pull_requests)
                    .execute(connection)?;
                diesel::insert_into(comments::table)
                    .values(new_comments)
                    .execute(connection)?;
                Ok(())
            })
            .map_err(|error| StorageError::BatchInsertFailed {
                message: error.to_string(),
            })
    }
}
