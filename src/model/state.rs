use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{AggregatorConfig, TotalsSummary};

/// The state kept by an aggregator between two aggregations.
#[derive(Debug, Default, Clone)]
pub struct AggregatorState {
    /// The time of the most recent attempted aggregation
    last_fetch_time: Option<DateTime<Utc>>,

    /// The number of failed aggregations since the last success
    consecutive_failures: u32,

    /// The most recent successful summary
    cached_totals: Option<TotalsSummary>,
}

impl AggregatorState {
    /// Reserves an aggregation attempt at `now` if the throttle allows it.
    ///
    /// On refusal, returns the time left before the next attempt is allowed and
    /// leaves the state untouched. A granted reservation is never rolled back.
    pub fn try_reserve(
        &mut self,
        now: DateTime<Utc>,
        config: &AggregatorConfig,
    ) -> Result<(), Duration> {
        let interval = config.dynamic_interval(self.consecutive_failures);
        if let Some(last_fetch_time) = self.last_fetch_time {
            let elapsed = (now - last_fetch_time).to_std().unwrap_or_default();
            if elapsed < interval {
                return Err(interval - elapsed);
            }
        }
        self.last_fetch_time = Some(now);

        Ok(())
    }

    /// Records a successful aggregation.
    pub fn record_success(&mut self, totals: TotalsSummary) {
        self.consecutive_failures = 0;
        self.cached_totals = Some(totals);
    }

    /// Records a failed aggregation.
    pub fn record_failure(&mut self) {
        self.consecutive_failures += 1;
    }

    /// Retrieves the time of the most recent attempted aggregation.
    pub fn last_fetch_time(&self) -> Option<DateTime<Utc>> {
        self.last_fetch_time
    }

    /// Retrieves the number of failed aggregations since the last success.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Retrieves the most recent successful summary.
    pub fn cached_totals(&self) -> Option<&TotalsSummary> {
        self.cached_totals.as_ref()
    }
}
