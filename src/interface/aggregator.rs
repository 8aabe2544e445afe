use crate::{StatsResult, TotalsSummary};

/// A trait for computing the repository statistics of an account.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StatsAggregator: Sync + Send {
    /// Computes the star and fork totals, or a classified failure.
    async fn get_totals(&self) -> StatsResult<TotalsSummary>;
}
