//! Diagnostic logging setup for test binaries.
//!
//! Page-object verbs log at debug, locator helpers at trace, scenario
//! phase boundaries at info. Call [`init`] once from the test entry
//! point; the filter honors `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber with an env-derived filter.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
