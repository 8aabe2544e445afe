use chrono::{DateTime, Utc};

/// A source of the current time.
pub trait Clock: Sync + Send {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(test)]
pub(crate) use manual::ManualClock;
