//! Result and error types for Tablero.

use thiserror::Error;

/// Result type for Tablero operations
pub type TableroResult<T> = Result<T, TableroError>;

/// Errors that can occur while driving the dashboard
#[derive(Debug, Error)]
pub enum TableroError {
    /// Operation timed out
    ///
    /// Every wait, click and task run carries a wall-clock budget; this is
    /// the failure it produces when the target state is not reached in time.
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error (script evaluation, navigation, lost session)
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Element resolved by a locator is no longer present
    #[error("Element not found for query: {query}")]
    ElementNotFound {
        /// XPath query that failed to resolve
        query: String,
    },

    /// Workspace name could not be resolved from the browser URL
    #[error("Cannot resolve workspace name from URL: {url}")]
    InvalidUrl {
        /// The offending URL
        url: String,
    },
}
