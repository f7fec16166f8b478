//! Polling combinator for wall-clock-bounded waits.
//!
//! Driver implementations suspend on [`wait_until`] until their condition
//! holds or the budget is spent. The condition is always checked at least
//! once, so a zero budget still observes an already-satisfied state.

use crate::result::{TableroError, TableroResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for a single wait operation
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: crate::timeouts::COMMON_DASHBOARD_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create options with the default dashboard-wait budget
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the given budget
    #[must_use]
    pub fn with_budget(timeout: Duration) -> Self {
        Self {
            timeout_ms: timeout.as_millis() as u64,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }
}

/// Poll `condition` until it holds or `options.timeout_ms` elapses.
///
/// Returns the elapsed time on success.
///
/// # Errors
///
/// [`TableroError::Timeout`] when the budget is spent before the
/// condition holds.
pub async fn wait_until<F, Fut>(mut condition: F, options: &WaitOptions) -> TableroResult<Duration>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    let timeout = Duration::from_millis(options.timeout_ms);
    let poll_interval = Duration::from_millis(options.poll_interval_ms);

    loop {
        if condition().await {
            return Ok(start.elapsed());
        }
        if start.elapsed() >= timeout {
            return Err(TableroError::Timeout {
                ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(poll_interval).await;
    }
}
