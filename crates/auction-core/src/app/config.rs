//! ExpiryConfig - scheduler tunables.

use std::future::Future;
use std::time::Duration;

use crate::ports::StoreError;

/// Scan period of the expiry loop.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound for a single store call (find / update / insert).
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryConfig {
    pub check_interval: Duration,
    pub store_timeout: Duration,
}

impl ExpiryConfig {
    pub fn with_check_interval(mut self, check_interval: Duration) -> Self {
        self.check_interval = check_interval;
        self
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Run one store call, failing with `StoreError::Timeout` once `timeout` elapses.
pub(crate) async fn bounded<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| StoreError::Timeout(timeout))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_thirty_and_ten_seconds() {
        let config = ExpiryConfig::default();
        assert_eq!(config.check_interval, Duration::from_secs(30));
        assert_eq!(config.store_timeout, Duration::from_secs(10));
    }

    #[test]
    fn setters_override_one_field() {
        let config = ExpiryConfig::default().with_store_timeout(Duration::from_secs(1));
        assert_eq!(config.check_interval, DEFAULT_CHECK_INTERVAL);
        assert_eq!(config.store_timeout, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_call_times_out() {
        let limit = Duration::from_secs(10);
        let slow = async {
            tokio::time::sleep(Duration::from_secs(15)).await;
            Ok::<_, StoreError>(())
        };

        assert_eq!(bounded(limit, slow).await, Err(StoreError::Timeout(limit)));
    }

    #[tokio::test]
    async fn bounded_call_passes_result_through() {
        let limit = Duration::from_secs(10);

        assert_eq!(bounded(limit, async { Ok::<_, StoreError>(7) }).await, Ok(7));
        let err = bounded(limit, async { Err::<(), _>(StoreError::Query("boom".into())) }).await;
        assert_eq!(err, Err(StoreError::Query("boom".into())));
    }
}
