//! Workspace-name resolution from the active browser URL.
//!
//! The dashboard routes the opened workspace as the final path segment of
//! the IDE URL (`https://host/{namespace}/{workspace}`); the name is owned
//! by the test spec for the duration of its teardown only.

use crate::result::{TableroError, TableroResult};

/// Extract the workspace name from an IDE URL.
///
/// Query string, fragment and trailing slashes are ignored; the last
/// non-empty path segment is the name.
///
/// # Errors
///
/// [`TableroError::InvalidUrl`] when no path segment is present.
pub fn from_url(url: &str) -> TableroResult<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);

    let mut segments = after_scheme.split('/').filter(|s| !s.is_empty());
    let _host = segments.next();

    segments.last().map_or_else(
        || {
            Err(TableroError::InvalidUrl {
                url: url.to_string(),
            })
        },
        |segment| Ok(segment.to_string()),
    )
}
