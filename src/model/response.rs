use std::fmt::Display;

use super::RepositoryRecord;

/// A page of the repository listing.
#[derive(Debug, PartialEq, Eq)]
pub struct PageResponse {
    /// Retrieved repositories, in listing order
    pub(crate) repositories: Vec<RepositoryRecord>,

    /// The API rate limit information, when the endpoint reports it
    pub(crate) rate_limit: Option<ApiRateLimit>,
}

impl PageResponse {
    /// Creates a new `PageResponse` instance with the given repositories.
    pub fn new(repositories: Vec<RepositoryRecord>, rate_limit: Option<ApiRateLimit>) -> Self {
        Self {
            repositories,
            rate_limit,
        }
    }

    /// Retrieves the list of repositories.
    pub fn repositories(&self) -> &[RepositoryRecord] {
        &self.repositories
    }

    /// Retrieves the API rate limit information.
    pub fn rate_limit(&self) -> Option<&ApiRateLimit> {
        self.rate_limit.as_ref()
    }

    /// Consumes the response and returns its repositories.
    pub fn into_repositories(self) -> Vec<RepositoryRecord> {
        self.repositories
    }
}

/// The upstream API rate limit as reported by the response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRateLimit {
    /// The maximum number of requests that can be made in the current window.
    pub limit: u32,
    /// The remaining number of requests in the current window.
    pub remaining: u32,
    /// The time at which the window resets, in seconds since the epoch.
    pub reset_at: i64,
}

impl ApiRateLimit {
    /// Whether the window is exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl Display for ApiRateLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RateLimit: calls={}/{}, reset={}",
            self.limit.saturating_sub(self.remaining),
            self.limit,
            self.reset_at
        )
    }
}
