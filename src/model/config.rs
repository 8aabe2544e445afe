use std::time::Duration;

/// The account whose repositories are aggregated when none is configured.
pub const DEFAULT_GITHUB_USERNAME: &str = "BishnuMukherjee123";

/// The REST production endpoint for GitHub.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// The public profile root for GitHub accounts.
pub const GITHUB_PROFILE_ROOT: &str = "https://github.com";

/// Tunables of the totals aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Minimum time between two aggregations when nothing failed.
    pub base_interval: Duration,

    /// Time added to the minimum interval for every consecutive failure.
    pub failure_penalty: Duration,

    /// Maximum number of pages fetched in one aggregation.
    pub max_pages: u32,

    /// Number of repositories requested per page.
    pub per_page: u16,

    /// Timeout of a single request.
    pub request_timeout: Duration,

    /// Number of attempts for a single page.
    pub retry_attempts: u32,

    /// Base delay of the linear retry backoff.
    pub retry_base_delay: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_secs(30),
            failure_penalty: Duration::from_secs(10),
            max_pages: 10,
            per_page: 100,
            request_timeout: Duration::from_secs(20),
            retry_attempts: 3,
            retry_base_delay: Duration::from_secs(2),
        }
    }
}

impl AggregatorConfig {
    /// The minimum interval between two aggregations after the given number of failures.
    pub fn dynamic_interval(&self, consecutive_failures: u32) -> Duration {
        self.base_interval + self.failure_penalty * consecutive_failures
    }

    /// Summarizes the throttling applied to the upstream API.
    pub fn rate_limit_info(&self, has_token: bool) -> RateLimitInfo {
        RateLimitInfo {
            has_token,
            min_interval: self.base_interval,
        }
    }
}

/// Throttling information exposed to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Whether a token is configured.
    pub has_token: bool,
    /// Minimum interval between two aggregations.
    pub min_interval: Duration,
}

/// The public profile URL of an account.
pub fn profile_url(username: &str) -> String {
    format!("{GITHUB_PROFILE_ROOT}/{username}")
}
