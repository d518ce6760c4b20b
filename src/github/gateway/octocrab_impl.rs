//! Octocrab implementation of the source gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;

use crate::github::error::FetchError;
use crate::github::locator::{PersonalAccessToken, RepositoryId};
use crate::github::models::{
    ApiCommit, ApiPullRequest, ApiReviewComment, ClosedPullRequest, PullRequestComment,
    PullRequestCommit,
};

use super::SourceGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// Octocrab-backed gateway.
pub struct OctocrabSourceGateway {
    client: Octocrab,
}

impl OctocrabSourceGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token against the public
    /// GitHub API.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` when the base URI cannot be parsed or
    /// `FetchError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        id: &RepositoryId,
    ) -> Result<Self, FetchError> {
        let octocrab = build_octocrab_client(token, id.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }

    /// Fetches every page of a listing endpoint and converts the items.
    async fn drain_pages<Api, Domain>(
        &self,
        operation: &str,
        path: String,
        query: Option<&[(&str, &str)]>,
    ) -> Result<Vec<Domain>, FetchError>
    where
        Api: DeserializeOwned + Into<Domain>,
    {
        let page = self
            .client
            .get::<Page<Api>, _, _>(path, query)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|items| items.into_iter().map(Into::into).collect())
            .map_err(|error| map_octocrab_error(operation, &error))
    }
}

#[async_trait]
impl SourceGateway for OctocrabSourceGateway {
    async fn list_closed_pull_requests(
        &self,
        id: &RepositoryId,
    ) -> Result<Vec<ClosedPullRequest>, FetchError> {
        self.drain_pages::<ApiPullRequest, _>(
            "list closed pulls",
            id.pulls_path(),
            Some(&[("state", "closed")]),
        )
        .await
    }

    async fn list_commits(
        &self,
        id: &RepositoryId,
        number: u64,
    ) -> Result<Vec<PullRequestCommit>, FetchError> {
        self.drain_pages::<ApiCommit, _>(
            "list pull commits",
            id.pull_commits_path(number),
            None,
        )
        .await
    }

    async fn list_review_comments(
        &self,
        id: &RepositoryId,
        number: u64,
    ) -> Result<Vec<PullRequestComment>, FetchError> {
        self.drain_pages::<ApiReviewComment, _>(
            "list review comments",
            id.review_comments_path(number),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::client::build_octocrab_client;
    use super::{OctocrabSourceGateway, SourceGateway};
    use crate::github::error::FetchError;
    use crate::github::locator::{PersonalAccessToken, RepositoryId};

    fn gateway_against(server: &MockServer) -> OctocrabSourceGateway {
        let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
        let client =
            build_octocrab_client(&token, &server.uri()).expect("client should be constructed");
        OctocrabSourceGateway::new(client)
    }

    fn repo() -> RepositoryId {
        RepositoryId::parse("owner/repo").expect("identifier should parse")
    }

    fn pull_json(id: u64, number: u64, merged_at: Option<&str>) -> serde_json::Value {
        json!({
            "id": id,
            "number": number,
            "title": format!("PR {number}"),
            "assignee": { "login": "alice" },
            "base": { "ref": "main", "repo": { "name": "repo" } },
            "head": { "ref": format!("feature/{number}") },
            "merged_at": merged_at
        })
    }

    #[tokio::test]
    async fn list_closed_pull_requests_drains_all_pages() {
        let server = MockServer::start().await;
        let gateway = gateway_against(&server);

        let next_url = format!(
            "{}/repos/owner/repo/pulls?state=closed&page=2",
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .and(query_param("state", "closed"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([pull_json(2, 8, Some("2024-01-02T00:00:00Z"))])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .and(query_param("state", "closed"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([pull_json(1, 7, None)]))
                    .insert_header("Link", format!("<{next_url}>; rel=\"next\"")),
            )
            .mount(&server)
            .await;

        let pulls = gateway
            .list_closed_pull_requests(&repo())
            .await
            .expect("listing should succeed");

        assert_eq!(pulls.len(), 2);
        assert_eq!(pulls.first().map(|pull| pull.id), Some(1));
        assert_eq!(pulls.last().map(|pull| pull.id), Some(2));
        assert!(pulls.last().is_some_and(|pull| pull.is_merged()));
    }

    #[tokio::test]
    async fn list_commits_converts_author_dates() {
        let server = MockServer::start().await;
        let gateway = gateway_against(&server);

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls/7/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "sha": "abc123",
                    "commit": { "author": { "name": "Alice", "date": "2024-01-01T00:00:00Z" } }
                },
                {
                    "sha": "def456",
                    "commit": { "author": null }
                }
            ])))
            .mount(&server)
            .await;

        let commits = gateway
            .list_commits(&repo(), 7)
            .await
            .expect("listing should succeed");

        assert_eq!(commits.len(), 2);
        assert!(commits.first().is_some_and(|c| c.authored_at.is_some()));
        assert!(commits.last().is_some_and(|c| c.authored_at.is_none()));
    }

    #[tokio::test]
    async fn list_review_comments_maps_fields() {
        let server = MockServer::start().await;
        let gateway = gateway_against(&server);

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls/7/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 31,
                    "user": { "login": "bob" },
                    "body": "Please rename this.",
                    "created_at": "2024-01-03T09:00:00Z"
                }
            ])))
            .mount(&server)
            .await;

        let comments = gateway
            .list_review_comments(&repo(), 7)
            .await
            .expect("listing should succeed");

        assert_eq!(comments.len(), 1);
        assert_eq!(comments.first().map(|c| c.author.as_str()), Some("bob"));
    }

    #[tokio::test]
    async fn authentication_failures_map_to_authentication_errors() {
        let server = MockServer::start().await;
        let gateway = gateway_against(&server);

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let error = gateway
            .list_closed_pull_requests(&repo())
            .await
            .expect_err("listing should fail");

        assert!(matches!(error, FetchError::Authentication { .. }));
    }
}
