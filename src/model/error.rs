use std::time::Duration;

use thiserror::Error;

/// The standard result type used at the application edge.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// The result of a single request to the listing endpoint.
pub type FetchResult<T> = Result<T, FetchError>;

/// The result of an aggregation.
pub type StatsResult<T> = Result<T, StatsError>;

/// The result of a contact form operation.
pub type ContactResult<T> = Result<T, ContactError>;

/// Failure of a single request to the listing endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The endpoint rejected the credentials (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// The endpoint refused to serve the request (HTTP 403).
    #[error("forbidden: upstream rate limit exceeded")]
    Forbidden,

    /// The account does not exist (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Any other non-success status.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// The request did not complete within the timeout and was cancelled.
    #[error("request timed out")]
    Timeout,

    /// The request could not reach the endpoint.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether another attempt of the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Status(_) | FetchError::Timeout | FetchError::Transport(_)
        )
    }
}

/// Classified failure of an aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The local throttle refused to start a new aggregation.
    #[error("rate limited locally, retry in {}s", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    /// The network is reported offline.
    #[error("no internet connection")]
    NoConnection,

    /// The upstream API rejected the request because of its own rate limit.
    #[error("upstream rate limit exceeded")]
    RateLimitExceeded,

    /// The account does not exist upstream.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// The request was rejected even without credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// The upstream API answered with an unexpected status.
    #[error("api error: {status}")]
    ApiError { status: u16 },

    /// The upstream API could not be reached.
    #[error("network error: {0}")]
    NetworkError(String),

    /// Any other failure.
    #[error("unknown error: {0}")]
    UnknownError(String),
}

impl StatsError {
    /// Classifies a request failure for the given account.
    pub fn from_fetch_error(error: FetchError, account: &str) -> Self {
        match error {
            FetchError::Unauthorized => StatsError::Unauthorized,
            FetchError::Forbidden => StatsError::RateLimitExceeded,
            FetchError::NotFound => StatsError::AccountNotFound(account.to_string()),
            FetchError::Status(status) => StatsError::ApiError { status },
            FetchError::Timeout => StatsError::NetworkError(error.to_string()),
            FetchError::Transport(message) => StatsError::NetworkError(message),
            FetchError::Decode(message) => StatsError::UnknownError(message),
        }
    }
}

/// Failure of a contact form operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A required service is missing its configuration.
    #[error("{0} is not configured")]
    NotConfigured(String),

    /// The submitted message is incomplete or malformed.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// The email service failed to deliver the message.
    #[error("email delivery failed: {0}")]
    Delivery(String),

    /// The message could not be stored.
    #[error("storage failed: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_fetch_errors() {
        assert!(FetchError::Status(500).is_retryable());
        assert!(FetchError::Timeout.is_retryable());
        assert!(FetchError::Transport("connection refused".to_string()).is_retryable());

        assert!(!FetchError::Unauthorized.is_retryable());
        assert!(!FetchError::Forbidden.is_retryable());
        assert!(!FetchError::NotFound.is_retryable());
        assert!(!FetchError::Decode("eof".to_string()).is_retryable());
    }

    #[test]
    fn classify_fetch_errors() {
        assert_eq!(
            StatsError::RateLimitExceeded,
            StatsError::from_fetch_error(FetchError::Forbidden, "octo")
        );
        assert_eq!(
            StatsError::AccountNotFound("octo".to_string()),
            StatsError::from_fetch_error(FetchError::NotFound, "octo")
        );
        assert_eq!(
            StatsError::ApiError { status: 502 },
            StatsError::from_fetch_error(FetchError::Status(502), "octo")
        );
        assert_eq!(
            StatsError::Unauthorized,
            StatsError::from_fetch_error(FetchError::Unauthorized, "octo")
        );
        assert!(matches!(
            StatsError::from_fetch_error(FetchError::Timeout, "octo"),
            StatsError::NetworkError(_)
        ));
        assert!(matches!(
            StatsError::from_fetch_error(FetchError::Decode("eof".to_string()), "octo"),
            StatsError::UnknownError(_)
        ));
    }
}
