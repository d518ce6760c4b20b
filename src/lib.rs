//! Prism library crate for mirroring merged pull requests.
//!
//! The library wraps Octocrab to list closed pull requests, their commits and
//! review comments, normalises them into storage records, and persists new
//! rows into a Postgres database through Diesel. Synchronisation is
//! incremental: pull requests already present in the database are skipped.

pub mod config;
pub mod github;
pub mod persistence;
pub mod sync;
pub mod telemetry;

pub use config::{ConfigError, MirrorConfig};
pub use github::{
    ClosedPullRequest, FetchError, OctocrabSourceGateway, PersonalAccessToken, RepositoryId,
    SourceGateway, SourceReader,
};
pub use persistence::{
    CommentRecord, PgStore, PullRequestRecord, PullRequestStore, StorageError, migrate_database,
};
pub use sync::{SyncError, SyncReport, Synchronizer, mirror_repositories};
