use crate::{FetchResult, PageRequest, PageResponse};

/// A trait for fetching pages of the repository listing of an account.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryPageFetcher: Sync + Send {
    /// Fetches one page of the listing.
    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse>;

    /// Whether credentials are configured for authenticated requests.
    fn has_credentials(&self) -> bool;
}
