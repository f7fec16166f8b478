//! Tablero: page objects and workflow scenarios for dashboard E2E testing
//!
//! Tablero (Spanish: "dashboard") drives a cloud-workspace dashboard end to
//! end: a typed locator builder renders query intents to XPath, a
//! wait/action driver polls the rendered tree with per-operation budgets,
//! a page object exposes workflow verbs over the Getting Started view, and
//! a five-phase scenario state machine orchestrates provision → install →
//! migrate → serve → teardown against the workflow-step libraries.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  scenario ──► steps (workspace / project / task verbs)           │
//! │      │                                                           │
//! │  get_started ──► locator ──► driver ──► browser DOM              │
//! │  (page object)   (XPath)    (wait/click, polled)                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Results flow back as `TableroResult`; a spent budget is always
//! [`TableroError::Timeout`], fatal to the enclosing phase.
//!
//! # Example
//!
//! ```ignore
//! use tablero::{BrowserConfig, CdpDriver, GetStarted};
//!
//! let driver = CdpDriver::launch(BrowserConfig::default()).await?;
//! driver.goto("https://che.local/dashboard/getting-started").await?;
//!
//! let dashboard = GetStarted::new(driver);
//! dashboard.wait_page(None).await?;
//! dashboard.click_on_sample("django-realworld-example-app", None).await?;
//! dashboard.click_create_and_open_button(None).await?;
//! ```

#![warn(missing_docs)]

#[cfg(feature = "browser")]
mod browser;
mod driver;
mod get_started;
mod locator;
pub mod logging;
mod result;
mod scenario;
mod steps;
mod timeouts;
pub mod wait;
pub mod workspace_name;

#[cfg(feature = "browser")]
pub use browser::{BrowserConfig, CdpDriver};
pub use driver::{DashboardDriver, DriverCall, RecordingDriver};
pub use get_started::{GetStarted, GET_STARTED_PAGE_TITLE};
pub use locator::{DashboardQuery, Locator};
pub use result::{TableroError, TableroResult};
pub use scenario::{
    Phase, PhaseOutcome, ScenarioReport, StackScenario, StepOutcome, TeardownReport,
    INSTALL_TASK_TIMEOUT_MS, MIGRATE_TASK_TIMEOUT_MS, SERVE_TASK_TIMEOUT_MS,
};
pub use steps::{CodeExecutionHelper, ProjectManager, RecordingSteps, WorkspaceHandler};
pub use timeouts::{
    TimeoutCategory, CLICK_DASHBOARD_ITEM_TIMEOUT_MS, COMMON_DASHBOARD_WAIT_TIMEOUT_MS,
    LOAD_PAGE_TIMEOUT_MS,
};
