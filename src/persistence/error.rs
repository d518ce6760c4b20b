//! Error types for the persistence layer.

use thiserror::Error;

/// Errors returned while connecting to, migrating, or writing the database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The database URL was present but blank.
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,

    /// Establishing a Postgres connection failed.
    #[error("failed to connect to database: {message}")]
    ConnectionFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Running pending migrations failed.
    #[error("failed to run database migrations: {message}")]
    MigrationFailed {
        /// Error detail from Diesel migrations.
        message: String,
    },

    /// Reading the schema version from the migration table failed.
    #[error("failed to read schema version after migrations: {message}")]
    SchemaVersionQueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// The migrations completed but no schema version could be found.
    #[error("no schema version recorded after migrations ran")]
    MissingSchemaVersion,

    /// Reading the stored pull request ids failed.
    #[error("failed to query stored pull request ids: {message}")]
    QueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// Committing a batch insert failed; the whole batch was rolled back.
    #[error("failed to commit batch insert: {message}")]
    BatchInsertFailed {
        /// Error detail from the failed transaction.
        message: String,
    },
}
