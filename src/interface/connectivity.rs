/// A trait reporting whether the network is reachable.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ConnectivityProbe: Sync + Send {
    /// Returns `false` when the network is known to be offline.
    async fn is_online(&self) -> bool;
}
