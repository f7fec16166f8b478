//! Real browser control over CDP (Chrome DevTools Protocol).
//!
//! [`CdpDriver`] implements [`DashboardDriver`](crate::DashboardDriver)
//! against a live chromium via `chromiumoxide`. Visibility is probed by
//! evaluating the locator's XPath in the page and checking the node's
//! box; clicks are dispatched on the resolved node. Only compiled with
//! the `browser` feature.

use crate::driver::DashboardDriver;
use crate::locator::Locator;
use crate::result::{TableroError, TableroResult};
use crate::wait::{self, WaitOptions};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// CDP-backed wait/action driver
pub struct CdpDriver {
    page: Page,
    browser: Mutex<CdpBrowser>,
    poll_interval_ms: u64,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl std::fmt::Debug for CdpDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpDriver")
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish_non_exhaustive()
    }
}

impl CdpDriver {
    /// Launch a browser and open an initial blank page.
    ///
    /// # Errors
    ///
    /// [`TableroError::BrowserLaunchError`] when the browser cannot be
    /// launched, [`TableroError::PageError`] when the page cannot be
    /// created.
    pub async fn launch(config: BrowserConfig) -> TableroResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| TableroError::BrowserLaunchError {
                message: e.to_string(),
            })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| TableroError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| TableroError::PageError {
                message: e.to_string(),
            })?;

        Ok(Self {
            page,
            browser: Mutex::new(browser),
            poll_interval_ms: wait::DEFAULT_POLL_INTERVAL_MS,
            handle,
        })
    }

    /// Navigate the page to `url`
    pub async fn goto(&self, url: &str) -> TableroResult<()> {
        let _ = self
            .page
            .goto(url)
            .await
            .map_err(|e| TableroError::PageError {
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Close the browser session
    pub async fn close(&self) -> TableroResult<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(|e| TableroError::PageError {
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn visibility_probe(xpath: &str) -> String {
        format!(
            "(() => {{ \
               const node = document.evaluate({xpath:?}, document, null, \
                 XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue; \
               if (!node) return false; \
               const rect = node.getBoundingClientRect(); \
               return rect.width > 0 && rect.height > 0; \
             }})()"
        )
    }

    fn click_script(xpath: &str) -> String {
        format!(
            "(() => {{ \
               const node = document.evaluate({xpath:?}, document, null, \
                 XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue; \
               if (!node) return false; \
               node.click(); \
               return true; \
             }})()"
        )
    }

    async fn evaluate_bool(&self, script: String) -> bool {
        match self.page.evaluate(script).await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            // Evaluation failures (navigation in flight, detached frame)
            // count as not-ready; the poll loop keeps the budget.
            Err(_) => false,
        }
    }
}

#[async_trait]
impl DashboardDriver for CdpDriver {
    async fn wait_visibility(&self, locator: &Locator, timeout: Duration) -> TableroResult<()> {
        let xpath = locator.xpath();
        let options = WaitOptions::with_budget(timeout).with_poll_interval(self.poll_interval_ms);

        let _elapsed = wait::wait_until(
            || self.evaluate_bool(Self::visibility_probe(&xpath)),
            &options,
        )
        .await?;
        Ok(())
    }

    async fn wait_and_click(&self, locator: &Locator, timeout: Duration) -> TableroResult<()> {
        self.wait_visibility(locator, timeout).await?;

        let xpath = locator.xpath();
        if self.evaluate_bool(Self::click_script(&xpath)).await {
            Ok(())
        } else {
            Err(TableroError::ElementNotFound { query: xpath })
        }
    }

    async fn current_url(&self) -> TableroResult<String> {
        self.page
            .url()
            .await
            .map_err(|e| TableroError::PageError {
                message: e.to_string(),
            })?
            .ok_or_else(|| TableroError::PageError {
                message: "page has no URL".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod config_tests {
        use super::*;

        #[test]
        fn test_config_default() {
            let config = BrowserConfig::default();
            assert!(config.headless);
            assert!(config.sandbox);
            assert_eq!(config.viewport_width, 1920);
        }

        #[test]
        fn test_config_builder() {
            let config = BrowserConfig::default()
                .with_headless(false)
                .with_viewport(1280, 720)
                .with_no_sandbox()
                .with_chromium_path("/usr/bin/chromium");

            assert!(!config.headless);
            assert_eq!(config.viewport_width, 1280);
            assert!(!config.sandbox);
            assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        }
    }

    mod script_tests {
        use super::*;

        #[test]
        fn test_visibility_probe_embeds_quoted_xpath() {
            let script = CdpDriver::visibility_probe("//div[contains(@title, 'x')]");
            assert!(script.contains("document.evaluate"));
            assert!(script.contains("\"//div[contains(@title, 'x')]\""));
            assert!(script.contains("getBoundingClientRect"));
        }

        #[test]
        fn test_click_script_dispatches_click() {
            let script = CdpDriver::click_script("//button");
            assert!(script.contains("node.click()"));
            assert!(script.contains("if (!node) return false"));
        }
    }
}
