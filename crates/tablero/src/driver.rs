//! Abstract wait/action driver over the dashboard UI.
//!
//! [`DashboardDriver`] is the only seam between page objects and a real
//! browser session. Implementations poll the rendered tree; page objects
//! stay free of browser plumbing. The crate ships [`RecordingDriver`], a
//! test double with a call history, so verbs can be verified without a
//! browser; real CDP control lives behind the `browser` feature.

use crate::locator::Locator;
use crate::result::TableroResult;
use crate::wait::{self, WaitOptions};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Wait/action primitives the page objects compose
#[async_trait]
pub trait DashboardDriver: Send + Sync {
    /// Suspend until the located element is visible.
    ///
    /// # Errors
    ///
    /// [`crate::TableroError::Timeout`] when the element does not become
    /// visible within `timeout`.
    async fn wait_visibility(&self, locator: &Locator, timeout: Duration) -> TableroResult<()>;

    /// Suspend until the located element is visible and clickable, then
    /// dispatch a click. No click is dispatched after a failed wait.
    ///
    /// # Errors
    ///
    /// [`crate::TableroError::Timeout`] when the element is not reachable
    /// within `timeout`.
    async fn wait_and_click(&self, locator: &Locator, timeout: Duration) -> TableroResult<()>;

    /// URL of the active page
    async fn current_url(&self) -> TableroResult<String>;
}

/// A driver call, as recorded by [`RecordingDriver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// A visibility wait with the literal query and budget passed through
    WaitVisibility {
        /// Rendered XPath query
        xpath: String,
        /// Budget in milliseconds
        timeout_ms: u64,
    },
    /// A dispatched click (recorded only after the wait succeeded)
    Click {
        /// Rendered XPath query
        xpath: String,
        /// Budget in milliseconds
        timeout_ms: u64,
    },
    /// A URL read
    CurrentUrl,
}

#[derive(Debug, Default)]
struct RecordingState {
    visible: HashSet<String>,
    url: String,
    calls: Vec<DriverCall>,
}

/// In-memory driver double for unit tests.
///
/// Visibility is a set of XPath strings; waits poll it with real timing, so
/// timeout behavior matches a live driver. Clones share state, which lets a
/// test flip visibility while a wait is in flight.
#[derive(Debug, Clone)]
pub struct RecordingDriver {
    state: Arc<Mutex<RecordingState>>,
    poll_interval_ms: u64,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDriver {
    /// Create an empty driver (nothing visible, no URL)
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RecordingState::default())),
            poll_interval_ms: wait::DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Use a custom polling interval (tests with tight budgets)
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Mark the element behind `locator` as visible
    pub async fn set_visible(&self, locator: &Locator) {
        let mut state = self.state.lock().await;
        let _ = state.visible.insert(locator.xpath());
    }

    /// Mark the element behind `locator` as hidden
    pub async fn set_hidden(&self, locator: &Locator) {
        let mut state = self.state.lock().await;
        let _ = state.visible.remove(&locator.xpath());
    }

    /// Set the URL reported by `current_url`
    pub async fn set_url(&self, url: impl Into<String>) {
        self.state.lock().await.url = url.into();
    }

    /// Snapshot of every recorded call, in order
    pub async fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().await.calls.clone()
    }

    /// XPath queries of dispatched clicks, in order
    pub async fn clicks(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Click { xpath, .. } => Some(xpath.clone()),
                _ => None,
            })
            .collect()
    }

    async fn poll_visible(&self, xpath: &str, timeout: Duration) -> TableroResult<()> {
        let options = WaitOptions::with_budget(timeout).with_poll_interval(self.poll_interval_ms);
        let state = Arc::clone(&self.state);
        let _elapsed = wait::wait_until(
            || {
                let state = Arc::clone(&state);
                let xpath = xpath.to_string();
                async move { state.lock().await.visible.contains(&xpath) }
            },
            &options,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DashboardDriver for RecordingDriver {
    async fn wait_visibility(&self, locator: &Locator, timeout: Duration) -> TableroResult<()> {
        let xpath = locator.xpath();
        self.state
            .lock()
            .await
            .calls
            .push(DriverCall::WaitVisibility {
                xpath: xpath.clone(),
                timeout_ms: timeout.as_millis() as u64,
            });
        self.poll_visible(&xpath, timeout).await
    }

    async fn wait_and_click(&self, locator: &Locator, timeout: Duration) -> TableroResult<()> {
        let xpath = locator.xpath();
        self.poll_visible(&xpath, timeout).await?;
        self.state.lock().await.calls.push(DriverCall::Click {
            xpath,
            timeout_ms: timeout.as_millis() as u64,
        });
        Ok(())
    }

    async fn current_url(&self) -> TableroResult<String> {
        let mut state = self.state.lock().await;
        state.calls.push(DriverCall::CurrentUrl);
        Ok(state.url.clone())
    }
}
