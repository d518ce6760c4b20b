//! GitHub remote source access and normalisation.
//!
//! This module wraps Octocrab to list closed pull requests, commit histories,
//! and review comments, then normalises the responses into the storage shape
//! (display-timezone timestamps, explicit optional assignees). Errors are
//! mapped into user-friendly variants so that callers can surface precise
//! failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod reader;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::FetchError;
pub use gateway::{OctocrabSourceGateway, SourceGateway};
pub use locator::{PersonalAccessToken, RepositoryId, RepositoryName, RepositoryOwner};
pub use models::{ClosedPullRequest, PullRequestComment, PullRequestCommit};
pub use reader::SourceReader;

#[cfg(test)]
pub use gateway::MockSourceGateway;
