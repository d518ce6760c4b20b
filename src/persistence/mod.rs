//! Postgres persistence for mirrored pull requests.
//!
//! The schema is managed with Diesel migrations so the mirror tables are
//! created automatically on first run and upgraded consistently across
//! deployments. All writes for one synchronisation run go through a single
//! transaction: either the whole batch lands or none of it does.

mod error;
mod migrator;
pub mod records;
pub mod schema;
mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::StorageError;
pub use migrator::{INITIAL_SCHEMA_VERSION, SchemaVersion, migrate_database};
pub use records::{CommentRecord, PullRequestRecord};
pub use store::{PgStore, PullRequestStore};

#[cfg(test)]
pub use store::MockPullRequestStore;
