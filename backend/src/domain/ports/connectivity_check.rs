//! Driven port reporting whether the database answers.
use async_trait::async_trait;

/// Cheap liveness check against the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityCheck: Send + Sync {
    /// Whether a round trip to the store succeeded.
    async fn is_connected(&self) -> bool;
}

/// Check used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureConnectivityCheck;

#[async_trait]
impl ConnectivityCheck for FixtureConnectivityCheck {
    async fn is_connected(&self) -> bool {
        false
    }
}
