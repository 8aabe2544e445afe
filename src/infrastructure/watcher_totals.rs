use std::{future::Future, sync::Arc, time::Duration};

use log::{info, warn};
use tokio::{sync::Mutex, time::interval};

use crate::{StatsAggregator, StatsError, TotalsDelta, TotalsSummary};

/// The default time between two polls of the aggregator.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);

/// The outcome of one poll of the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchUpdate {
    /// The first totals were received.
    Initial(TotalsSummary),

    /// The totals differ from the displayed ones.
    Changed {
        totals: TotalsSummary,
        delta: TotalsDelta,
    },

    /// The totals are identical to the displayed ones.
    Unchanged,

    /// The aggregation failed, the displayed totals are kept.
    Failed(StatsError),
}

/// Polls an aggregator and keeps track of the totals currently displayed.
pub struct TotalsWatcher {
    aggregator: Arc<dyn StatsAggregator>,
    poll_interval: Duration,
    displayed: Mutex<Option<TotalsSummary>>,
}

impl TotalsWatcher {
    /// Creates a new `TotalsWatcher` instance.
    pub fn new(aggregator: Arc<dyn StatsAggregator>, poll_interval: Duration) -> Self {
        Self {
            aggregator,
            poll_interval,
            displayed: Mutex::new(None),
        }
    }

    /// Retrieves the totals currently displayed.
    pub async fn displayed(&self) -> Option<TotalsSummary> {
        self.displayed.lock().await.clone()
    }

    /// Fetches fresh totals and compares them with the displayed ones.
    pub async fn poll(&self) -> WatchUpdate {
        let totals = match self.aggregator.get_totals().await {
            Ok(totals) => totals,
            Err(e) => {
                warn!("Failed to refresh totals: {e}");
                return WatchUpdate::Failed(e);
            }
        };
        let mut displayed = self.displayed.lock().await;
        let update = match displayed.as_ref() {
            None => WatchUpdate::Initial(totals.clone()),
            Some(previous) => {
                let delta = totals.compare(previous);
                if !delta.has_changes() {
                    return WatchUpdate::Unchanged;
                }
                log_delta(previous, &totals, &delta);
                WatchUpdate::Changed {
                    totals: totals.clone(),
                    delta,
                }
            }
        };
        *displayed = Some(totals);

        update
    }

    /// Polls on every interval tick, starting immediately, until `shutdown` completes.
    pub async fn run<F, U>(&self, shutdown: F, mut on_update: U)
    where
        F: Future<Output = ()>,
        U: FnMut(&WatchUpdate),
    {
        let mut ticker = interval(self.poll_interval);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Stopping totals watcher");
                    break;
                }
                _ = ticker.tick() => {
                    let update = self.poll().await;
                    on_update(&update);
                }
            }
        }
    }
}

fn log_delta(previous: &TotalsSummary, current: &TotalsSummary, delta: &TotalsDelta) {
    if delta.stars > 0 {
        info!(
            "Stars increased: {} -> {} (+{})",
            previous.total_stars, current.total_stars, delta.stars
        );
    } else if delta.stars < 0 {
        info!(
            "Stars decreased: {} -> {} ({})",
            previous.total_stars, current.total_stars, delta.stars
        );
    }
    if delta.forks > 0 {
        info!(
            "Forks increased: {} -> {} (+{})",
            previous.total_forks, current.total_forks, delta.forks
        );
    } else if delta.forks < 0 {
        info!(
            "Forks decreased: {} -> {} ({})",
            previous.total_forks, current.total_forks, delta.forks
        );
    }
}
