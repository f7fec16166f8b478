//! Named timeout categories for dashboard operations.
//!
//! Every page-object verb has a documented default category it resolves to
//! when the caller passes no explicit timeout. The categories are the three
//! budgets the dashboard UI actually needs: full page loads, clicks on
//! dashboard items, and ordinary element waits.

use std::time::Duration;

/// Full page load budget (2 minutes)
pub const LOAD_PAGE_TIMEOUT_MS: u64 = 120_000;

/// Budget for clicking a dashboard item (2 seconds)
pub const CLICK_DASHBOARD_ITEM_TIMEOUT_MS: u64 = 2_000;

/// Common dashboard element wait budget (5 seconds)
pub const COMMON_DASHBOARD_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Timeout category an operation resolves its default budget from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeoutCategory {
    /// Full page load
    PageLoad,
    /// Click on a dashboard item
    ClickItem,
    /// Ordinary dashboard element wait
    DashboardWait,
}

impl TimeoutCategory {
    /// Budget for this category in milliseconds
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        match self {
            Self::PageLoad => LOAD_PAGE_TIMEOUT_MS,
            Self::ClickItem => CLICK_DASHBOARD_ITEM_TIMEOUT_MS,
            Self::DashboardWait => COMMON_DASHBOARD_WAIT_TIMEOUT_MS,
        }
    }

    /// Budget for this category as a `Duration`
    #[must_use]
    pub const fn duration(self) -> Duration {
        Duration::from_millis(self.as_millis())
    }

    /// Resolve an optional caller-supplied timeout against this category
    #[must_use]
    pub fn resolve(self, timeout: Option<Duration>) -> Duration {
        timeout.unwrap_or_else(|| self.duration())
    }
}

impl std::fmt::Display for TimeoutCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::PageLoad => "page-load",
            Self::ClickItem => "click-item",
            Self::DashboardWait => "dashboard-wait",
        };
        write!(f, "{name}")
    }
}
