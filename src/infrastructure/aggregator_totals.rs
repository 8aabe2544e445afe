use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::{
    AggregatorConfig, AggregatorState, Clock, ConnectivityProbe, FetchError, FetchResult,
    PageRequest, RepositoryPageFetcher, RepositoryRecord, StatsAggregator, StatsError,
    StatsResult, TotalsSummary,
};

/// Aggregates the star and fork totals of every repository owned by one account.
///
/// Calls are serialized: the state lock is held for the whole aggregation, so an
/// overlapping caller waits and is then judged by the throttle against the
/// reservation made by the call it waited for.
pub struct TotalsAggregator {
    username: String,
    config: AggregatorConfig,
    fetcher: Arc<dyn RepositoryPageFetcher>,
    fallback_fetcher: Arc<dyn RepositoryPageFetcher>,
    connectivity: Arc<dyn ConnectivityProbe>,
    clock: Arc<dyn Clock>,
    state: Mutex<AggregatorState>,
}

impl TotalsAggregator {
    /// Creates a new `TotalsAggregator` instance with an empty state.
    pub fn new(
        username: &str,
        config: AggregatorConfig,
        fetcher: Arc<dyn RepositoryPageFetcher>,
        connectivity: Arc<dyn ConnectivityProbe>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            username: username.to_string(),
            config,
            fallback_fetcher: fetcher.clone(),
            fetcher,
            connectivity,
            clock,
            state: Mutex::new(AggregatorState::default()),
        }
    }

    /// Sets the fetcher used for the fallback request, which must be sent once.
    ///
    /// Defaults to the listing fetcher. Pass the undecorated fetcher when the listing
    /// fetcher retries.
    pub fn with_fallback_fetcher(
        mut self,
        fallback_fetcher: Arc<dyn RepositoryPageFetcher>,
    ) -> Self {
        self.fallback_fetcher = fallback_fetcher;

        self
    }

    /// Returns a snapshot of the current state.
    pub async fn state(&self) -> AggregatorState {
        self.state.lock().await.clone()
    }

    /// Fetches the listing with the credentials if any, then without them once they are
    /// rejected. The downgrade happens at most once per run.
    async fn fetch_all_repositories(&self) -> FetchResult<Vec<RepositoryRecord>> {
        let mut authenticated = self.fetcher.has_credentials();
        let mut repositories = vec![];
        info!("Fetching repositories for {}", self.username);

        for page in 1..=self.config.max_pages {
            let request = PageRequest::new(page, self.config.per_page, authenticated);
            let response = match self.fetcher.fetch_page(&request).await {
                Err(FetchError::Unauthorized) if request.is_authenticated() => {
                    warn!("Token rejected, retrying page {page} without it");
                    authenticated = false;
                    self.fetcher.fetch_page(&request.anonymous()).await?
                }
                result => result?,
            };
            if let Some(rate_limit) = response.rate_limit() {
                debug!("{rate_limit}");
                if rate_limit.is_exhausted() {
                    warn!("Upstream rate limit exhausted, next requests will be rejected");
                }
            }
            if response.repositories().is_empty() {
                debug!("Page {page} is empty, last page reached");
                break;
            }
            info!(
                "Page {page}: found {} repositories",
                response.repositories().len()
            );
            repositories.extend(response.into_repositories());
        }
        info!("Total repositories fetched: {}", repositories.len());

        Ok(repositories)
    }

    fn calculate_totals(&self, repositories: Vec<RepositoryRecord>) -> TotalsSummary {
        if repositories.is_empty() {
            warn!("No repositories found for {}", self.username);
        }
        if let Some(owner) = repositories.first().and_then(|repository| repository.owner()) {
            if owner != self.username {
                warn!("Expected repositories of {}, but got {owner}", self.username);
            }
        }
        let totals = TotalsSummary::from_repositories(repositories);
        info!("{totals}");

        totals
    }

    /// Fetches the first page-size worth of records anonymously, without pagination nor retry.
    async fn fetch_fallback(&self) -> StatsResult<TotalsSummary> {
        info!("Network error detected, trying fallback request");
        let request = PageRequest::fallback(self.config.per_page);
        match self.fallback_fetcher.fetch_page(&request).await {
            Ok(response) => Ok(self.calculate_totals(response.into_repositories())),
            Err(e) => {
                warn!("Fallback request failed: {e}");
                Err(StatsError::NetworkError(format!(
                    "fallback request failed: {e}"
                )))
            }
        }
    }

    async fn recover(
        &self,
        error: FetchError,
        cached_totals: Option<TotalsSummary>,
    ) -> StatsResult<TotalsSummary> {
        match (error, cached_totals) {
            (FetchError::Forbidden, Some(cached_totals)) => {
                info!("Returning cached totals due to upstream rate limiting");
                Ok(cached_totals)
            }
            (FetchError::Transport(_), _) => self.fetch_fallback().await,
            (error, _) => Err(StatsError::from_fetch_error(error, &self.username)),
        }
    }
}

#[async_trait::async_trait]
impl StatsAggregator for TotalsAggregator {
    async fn get_totals(&self) -> StatsResult<TotalsSummary> {
        let mut state = self.state.lock().await;
        if let Err(retry_after) = state.try_reserve(self.clock.now(), &self.config) {
            warn!(
                "Rate limiting: wait {}s before next request (failures: {})",
                retry_after.as_secs_f64().ceil(),
                state.consecutive_failures()
            );
            return Err(StatsError::RateLimited { retry_after });
        }

        if !self.connectivity.is_online().await {
            state.record_failure();
            warn!("No internet connection");
            return Err(StatsError::NoConnection);
        }

        match self.fetch_all_repositories().await {
            Ok(repositories) => {
                let totals = self.calculate_totals(repositories);
                state.record_success(totals.clone());

                Ok(totals)
            }
            Err(e) => {
                state.record_failure();
                warn!(
                    "Aggregation failed: {e} (failures: {})",
                    state.consecutive_failures()
                );
                let cached_totals = state.cached_totals().cloned();

                self.recover(e, cached_totals).await
            }
        }
    }
}
