use std::{sync::Arc, time::Duration};

use log::warn;
use tokio::time::sleep;

use crate::{FetchResult, PageRequest, PageResponse, RepositoryPageFetcher};

/// A struct that retries a RepositoryPageFetcher a specified number of times in case of a
/// retryable failure with a linear backoff strategy.
pub struct FetcherRetrier {
    /// The fetcher to be retried.
    fetcher: Arc<dyn RepositoryPageFetcher>,

    /// The maximum number of attempts for a request.
    max_attempts: u32,

    /// The base delay for linear backoff.
    base_delay: Duration,
}

impl FetcherRetrier {
    /// Creates a new `FetcherRetrier` instance with the given maximum number of attempts.
    pub fn new(
        fetcher: Arc<dyn RepositoryPageFetcher>,
        max_attempts: u32,
        base_delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    fn calculate_linear_backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

#[async_trait::async_trait]
impl RepositoryPageFetcher for FetcherRetrier {
    /// Retries the request if it fails with a retryable error, up to the maximum number of attempts.
    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse> {
        let mut attempts = 0;

        loop {
            match self.fetcher.fetch_page(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() => {
                    attempts += 1;
                    if attempts >= self.max_attempts {
                        warn!("Fetch of {request} failed after {attempts} attempts: {e}");
                        return Err(e);
                    }
                    let delay = self.calculate_linear_backoff_delay(attempts);
                    warn!("Fetch attempt #{attempts} failed: {e}, retrying in {delay:?}");
                    sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn has_credentials(&self) -> bool {
        self.fetcher.has_credentials()
    }
}
