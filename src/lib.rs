//! Aggregated GitHub statistics and contact form delivery for a personal portfolio.
//!
//! The [`TotalsAggregator`] sums the stars and forks of every repository owned by a
//! fixed account, while protecting the upstream API with a self-imposed throttle,
//! bounded retries and a stale-cache fallback. The [`ContactFormSubmitter`] stores
//! and forwards messages submitted through the contact form.

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
