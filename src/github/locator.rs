//! Identifier parsing and identity wrappers for repository access.

use std::fmt;

use url::Url;

use super::error::FetchError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, FetchError> {
        if value.is_empty() {
            return Err(FetchError::InvalidRepositoryId {
                identifier: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, FetchError> {
        if value.is_empty() {
            return Err(FetchError::InvalidRepositoryId {
                identifier: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, FetchError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FetchError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// A repository identifier in `owner/name` form with its derived API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryId {
    /// Parses a repository identifier of the form `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidRepositoryId` when the identifier does not
    /// split into exactly two non-empty segments, or `FetchError::InvalidUrl`
    /// when the API base cannot be constructed.
    pub fn parse(identifier: &str) -> Result<Self, FetchError> {
        let mut segments = identifier.split('/');

        let invalid = || FetchError::InvalidRepositoryId {
            identifier: identifier.to_owned(),
        };

        let owner_segment = segments.next().ok_or_else(invalid)?;
        let name_segment = segments.next().ok_or_else(invalid)?;
        if segments.next().is_some() {
            return Err(invalid());
        }

        let owner = RepositoryOwner::new(owner_segment).map_err(|_| invalid())?;
        let repository = RepositoryName::new(name_segment).map_err(|_| invalid())?;
        let api_base = Url::parse("https://api.github.com")
            .map_err(|error| FetchError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL for the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// API path for listing pull requests.
    pub(crate) fn pulls_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    /// API path for listing the commits on a pull request.
    pub(crate) fn pull_commits_path(&self, number: u64) -> String {
        format!(
            "/repos/{}/{}/pulls/{number}/commits",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    /// API path for listing the review comments on a pull request.
    pub(crate) fn review_comments_path(&self, number: u64) -> String {
        format!(
            "/repos/{}/{}/pulls/{number}/comments",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner.as_str(), self.repository.as_str())
    }
}
