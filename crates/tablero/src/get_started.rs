//! Page object for the dashboard's Getting Started view.
//!
//! Exposes workflow-level verbs (wait for the page, select a sample,
//! confirm creation) over the wait/action driver. The driver is an explicit
//! constructor argument; the page object holds no other state.
//!
//! Every verb takes an optional timeout; `None` resolves to the verb's
//! documented [`TimeoutCategory`]. Waits are idempotent; clicks re-dispatch
//! on every invocation.

use crate::driver::DashboardDriver;
use crate::locator::Locator;
use crate::result::TableroResult;
use crate::timeouts::TimeoutCategory;
use std::time::Duration;
use tracing::{debug, trace};

/// Title shown on the Getting Started page
pub const GET_STARTED_PAGE_TITLE: &str = "Getting Started";

/// The Getting Started page object
#[derive(Debug)]
pub struct GetStarted<D: DashboardDriver> {
    driver: D,
}

impl<D: DashboardDriver> GetStarted<D> {
    /// Create a page object over the given driver
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// The underlying driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Wait until a container whose title contains `expected_text` is
    /// visible. Default budget: dashboard-wait.
    pub async fn wait_title_contains(
        &self,
        expected_text: &str,
        timeout: Option<Duration>,
    ) -> TableroResult<()> {
        debug!(expected_text, "GetStarted.wait_title_contains");

        let page_title_locator = Locator::title_contains(expected_text);
        let timeout = TimeoutCategory::DashboardWait.resolve(timeout);

        self.driver
            .wait_visibility(&page_title_locator, timeout)
            .await
    }

    /// Wait until the Getting Started page is shown. Default budget:
    /// page-load.
    pub async fn wait_page(&self, timeout: Option<Duration>) -> TableroResult<()> {
        debug!("GetStarted.wait_page");

        let timeout = TimeoutCategory::PageLoad.resolve(timeout);

        self.wait_title_contains(GET_STARTED_PAGE_TITLE, Some(timeout))
            .await
    }

    /// Wait until the sample card is visible. Default budget:
    /// dashboard-wait.
    pub async fn wait_sample(
        &self,
        sample_name: &str,
        timeout: Option<Duration>,
    ) -> TableroResult<()> {
        debug!(sample_name, "GetStarted.wait_sample");

        let sample_locator = self.sample_locator(sample_name);
        let timeout = TimeoutCategory::DashboardWait.resolve(timeout);

        self.driver.wait_visibility(&sample_locator, timeout).await
    }

    /// Wait until the sample card is clickable, then click it. Default
    /// budget: click-item.
    pub async fn click_on_sample(
        &self,
        sample_name: &str,
        timeout: Option<Duration>,
    ) -> TableroResult<()> {
        debug!(sample_name, "GetStarted.click_on_sample");

        let sample_locator = self.sample_locator(sample_name);
        let timeout = TimeoutCategory::ClickItem.resolve(timeout);

        self.driver.wait_and_click(&sample_locator, timeout).await
    }

    /// Wait until the sample's card carries the selected visual state.
    /// Default budget: dashboard-wait.
    pub async fn wait_sample_selected(
        &self,
        sample_name: &str,
        timeout: Option<Duration>,
    ) -> TableroResult<()> {
        debug!(sample_name, "GetStarted.wait_sample_selected");

        let selected_sample_locator = Locator::sample_selected(sample_name);
        let timeout = TimeoutCategory::DashboardWait.resolve(timeout);

        self.driver
            .wait_visibility(&selected_sample_locator, timeout)
            .await
    }

    /// Wait until the sample's card does not carry the selected visual
    /// state. Default budget: dashboard-wait.
    pub async fn wait_sample_unselected(
        &self,
        sample_name: &str,
        timeout: Option<Duration>,
    ) -> TableroResult<()> {
        debug!(sample_name, "GetStarted.wait_sample_unselected");

        let unselected_sample_locator = Locator::sample_unselected(sample_name);
        let timeout = TimeoutCategory::DashboardWait.resolve(timeout);

        self.driver
            .wait_visibility(&unselected_sample_locator, timeout)
            .await
    }

    /// Wait until the first enabled "Create & Open" control is clickable,
    /// then click it. Default budget: click-item.
    pub async fn click_create_and_open_button(
        &self,
        timeout: Option<Duration>,
    ) -> TableroResult<()> {
        debug!("GetStarted.click_create_and_open_button");

        let create_and_open_button_locator = Locator::create_and_open_button();
        let timeout = TimeoutCategory::ClickItem.resolve(timeout);

        self.driver
            .wait_and_click(&create_and_open_button_locator, timeout)
            .await
    }

    fn sample_locator(&self, sample_name: &str) -> Locator {
        trace!(sample_name, "GetStarted.sample_locator");

        Locator::sample(sample_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DriverCall, RecordingDriver};
    use crate::result::TableroError;
    use crate::timeouts::{
        CLICK_DASHBOARD_ITEM_TIMEOUT_MS, COMMON_DASHBOARD_WAIT_TIMEOUT_MS, LOAD_PAGE_TIMEOUT_MS,
    };

    fn page_with_driver() -> (GetStarted<RecordingDriver>, RecordingDriver) {
        let driver = RecordingDriver::new().with_poll_interval(10);
        let handle = driver.clone();
        (GetStarted::new(driver), handle)
    }

    mod pass_through_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_page_is_wait_title_contains_getting_started() {
            let (page, driver) = page_with_driver();
            driver
                .set_visible(&Locator::title_contains(GET_STARTED_PAGE_TITLE))
                .await;

            page.wait_page(None).await.unwrap();

            // The recorded call carries the literal title-contains query
            // and the page-load budget, exactly as an explicit
            // wait_title_contains("Getting Started", page_load) would.
            assert_eq!(
                driver.calls().await,
                vec![DriverCall::WaitVisibility {
                    xpath: Locator::title_contains(GET_STARTED_PAGE_TITLE).xpath(),
                    timeout_ms: LOAD_PAGE_TIMEOUT_MS,
                }]
            );
        }

        #[tokio::test]
        async fn test_wait_page_forwards_explicit_timeout() {
            let (page, driver) = page_with_driver();
            driver
                .set_visible(&Locator::title_contains(GET_STARTED_PAGE_TITLE))
                .await;

            page.wait_page(Some(Duration::from_millis(400)))
                .await
                .unwrap();

            assert_eq!(
                driver.calls().await,
                vec![DriverCall::WaitVisibility {
                    xpath: Locator::title_contains(GET_STARTED_PAGE_TITLE).xpath(),
                    timeout_ms: 400,
                }]
            );
        }
    }

    mod default_timeout_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_sample_uses_dashboard_wait_default() {
            let (page, driver) = page_with_driver();
            driver.set_visible(&Locator::sample("app")).await;

            page.wait_sample("app", None).await.unwrap();

            match driver.calls().await.as_slice() {
                [DriverCall::WaitVisibility { timeout_ms, .. }] => {
                    assert_eq!(*timeout_ms, COMMON_DASHBOARD_WAIT_TIMEOUT_MS);
                }
                other => panic!("unexpected calls: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_click_on_sample_uses_click_item_default() {
            let (page, driver) = page_with_driver();
            driver.set_visible(&Locator::sample("app")).await;

            page.click_on_sample("app", None).await.unwrap();

            match driver.calls().await.as_slice() {
                [DriverCall::Click { timeout_ms, .. }] => {
                    assert_eq!(*timeout_ms, CLICK_DASHBOARD_ITEM_TIMEOUT_MS);
                }
                other => panic!("unexpected calls: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_wait_sample_selected_uses_dashboard_wait_default() {
            let (page, driver) = page_with_driver();
            driver.set_visible(&Locator::sample_selected("app")).await;

            page.wait_sample_selected("app", None).await.unwrap();

            match driver.calls().await.as_slice() {
                [DriverCall::WaitVisibility { xpath, timeout_ms }] => {
                    assert_eq!(*timeout_ms, COMMON_DASHBOARD_WAIT_TIMEOUT_MS);
                    assert_eq!(xpath, &Locator::sample_selected("app").xpath());
                }
                other => panic!("unexpected calls: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_create_and_open_uses_click_item_default() {
            let (page, driver) = page_with_driver();
            driver.set_visible(&Locator::create_and_open_button()).await;

            page.click_create_and_open_button(None).await.unwrap();

            match driver.calls().await.as_slice() {
                [DriverCall::Click { xpath, timeout_ms }] => {
                    assert_eq!(*timeout_ms, CLICK_DASHBOARD_ITEM_TIMEOUT_MS);
                    assert_eq!(xpath, &Locator::create_and_open_button().xpath());
                }
                other => panic!("unexpected calls: {other:?}"),
            }
        }
    }

    mod selection_tests {
        use super::*;

        #[tokio::test]
        async fn test_selected_and_unselected_watch_distinct_queries() {
            let (page, driver) = page_with_driver();
            driver.set_visible(&Locator::sample_selected("app")).await;
            driver.set_visible(&Locator::sample_unselected("app")).await;

            page.wait_sample_selected("app", None).await.unwrap();
            page.wait_sample_unselected("app", None).await.unwrap();

            let calls = driver.calls().await;
            match calls.as_slice() {
                [DriverCall::WaitVisibility { xpath: first, .. }, DriverCall::WaitVisibility { xpath: second, .. }] => {
                    assert_ne!(first, second);
                }
                other => panic!("unexpected calls: {other:?}"),
            }
        }
    }

    mod workflow_tests {
        use super::*;

        #[tokio::test]
        async fn test_sample_then_confirm_issues_two_ordered_clicks() {
            let (page, driver) = page_with_driver();
            let sample = Locator::sample("django-realworld-example-app");
            let button = Locator::create_and_open_button();
            driver.set_visible(&sample).await;
            driver.set_visible(&button).await;

            page.click_on_sample("django-realworld-example-app", None)
                .await
                .unwrap();
            page.click_create_and_open_button(None).await.unwrap();

            assert_eq!(driver.clicks().await, vec![sample.xpath(), button.xpath()]);
        }

        #[tokio::test]
        async fn test_every_wait_rejects_with_timeout_when_never_visible() {
            let (page, driver) = page_with_driver();
            let budget = Some(Duration::from_millis(60));

            for result in [
                page.wait_title_contains("Workspaces", budget).await,
                page.wait_page(budget).await,
                page.wait_sample("app", budget).await,
                page.wait_sample_selected("app", budget).await,
                page.wait_sample_unselected("app", budget).await,
            ] {
                match result {
                    Err(TableroError::Timeout { ms }) => assert_eq!(ms, 60),
                    other => panic!("expected Timeout, got {other:?}"),
                }
            }
            assert!(driver.clicks().await.is_empty());
        }

        #[tokio::test]
        async fn test_failed_click_wait_dispatches_no_click() {
            let (page, driver) = page_with_driver();

            let result = page
                .click_on_sample("app", Some(Duration::from_millis(60)))
                .await;
            assert!(result.is_err());

            let result = page
                .click_create_and_open_button(Some(Duration::from_millis(60)))
                .await;
            assert!(result.is_err());

            assert!(driver.clicks().await.is_empty());
        }
    }
}
