//! Typed locator builder for the Getting Started dashboard view.
//!
//! Every query the page object needs is an intent in [`DashboardQuery`];
//! rendering to a structural XPath expression happens in one place,
//! [`DashboardQuery::to_xpath`]. Construction is pure: no UI or network
//! access, and the same input always renders the same query.
//!
//! Parameter values are interpolated into the XPath templates without
//! escaping. Callers own parameter hygiene: a value containing the
//! template's `'` delimiter corrupts the query.

use serde::{Deserialize, Serialize};

/// Query intent against the rendered dashboard tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardQuery {
    /// Container element whose `title` attribute contains the text
    TitleContains(String),
    /// Sample entry whose label equals the name, under a devfile marker
    Sample(String),
    /// Sample entry in a template card carrying the `selected` class
    SampleSelected(String),
    /// Sample entry in a template card without the `selected` class
    SampleUnselected(String),
    /// First enabled "Create & Open" confirmation button
    CreateAndOpenButton,
}

impl DashboardQuery {
    /// Render the intent to an XPath expression
    #[must_use]
    pub fn to_xpath(&self) -> String {
        match self {
            Self::TitleContains(text) => {
                format!("//div[contains(@title, '{text}')]")
            }
            Self::Sample(name) => {
                format!("//div[contains(@devfile, 'devfile')]/div/b[contains(text(), '{name}')]")
            }
            Self::SampleSelected(name) => format!(
                "//div[contains(@class, 'get-started-template') and contains(@class, 'selected')]//span[text()='{name}']"
            ),
            Self::SampleUnselected(name) => format!(
                "//div[contains(@class, 'get-started-template') and not(contains(@class, 'selected'))]//span[text()='{name}']"
            ),
            Self::CreateAndOpenButton => {
                "(//che-button-save-flat[@che-button-title='Create & Open'][@aria-disabled='false']/button)[1]"
                    .to_string()
            }
        }
    }
}

/// An immutable structural query against the dashboard UI tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    query: DashboardQuery,
}

impl Locator {
    /// Locator for a container whose title contains `text`
    #[must_use]
    pub fn title_contains(text: impl Into<String>) -> Self {
        Self {
            query: DashboardQuery::TitleContains(text.into()),
        }
    }

    /// Locator for a sample entry by name
    #[must_use]
    pub fn sample(name: impl Into<String>) -> Self {
        Self {
            query: DashboardQuery::Sample(name.into()),
        }
    }

    /// Locator for a sample entry in its selected visual state
    #[must_use]
    pub fn sample_selected(name: impl Into<String>) -> Self {
        Self {
            query: DashboardQuery::SampleSelected(name.into()),
        }
    }

    /// Locator for a sample entry in its unselected visual state
    #[must_use]
    pub fn sample_unselected(name: impl Into<String>) -> Self {
        Self {
            query: DashboardQuery::SampleUnselected(name.into()),
        }
    }

    /// Locator for the first enabled "Create & Open" button
    #[must_use]
    pub fn create_and_open_button() -> Self {
        Self {
            query: DashboardQuery::CreateAndOpenButton,
        }
    }

    /// The query intent
    #[must_use]
    pub const fn query(&self) -> &DashboardQuery {
        &self.query
    }

    /// Render to an XPath expression
    #[must_use]
    pub fn xpath(&self) -> String {
        self.query.to_xpath()
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.xpath())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod rendering_tests {
        use super::*;

        #[test]
        fn test_title_contains_template() {
            let locator = Locator::title_contains("Getting Started");
            assert_eq!(
                locator.xpath(),
                "//div[contains(@title, 'Getting Started')]"
            );
        }

        #[test]
        fn test_sample_template_carries_devfile_marker() {
            let locator = Locator::sample("django-realworld-example-app");
            let xpath = locator.xpath();
            assert!(xpath.contains("contains(@devfile, 'devfile')"));
            assert!(xpath.contains("django-realworld-example-app"));
        }

        #[test]
        fn test_selected_sample_template() {
            let xpath = Locator::sample_selected("node-sample").xpath();
            assert!(xpath.contains("contains(@class, 'get-started-template')"));
            assert!(xpath.contains("contains(@class, 'selected')"));
            assert!(xpath.contains("span[text()='node-sample']"));
        }

        #[test]
        fn test_create_and_open_button_is_first_enabled() {
            let xpath = Locator::create_and_open_button().xpath();
            assert!(xpath.starts_with('('));
            assert!(xpath.ends_with(")[1]"));
            assert!(xpath.contains("@che-button-title='Create & Open'"));
            assert!(xpath.contains("@aria-disabled='false'"));
        }
    }

    mod exclusivity_tests {
        use super::*;

        // Selected requires the 'selected' class predicate; unselected
        // requires its negation. No element satisfies both.
        #[test]
        fn test_selected_and_unselected_are_mutually_exclusive() {
            let selected = Locator::sample_selected("app").xpath();
            let unselected = Locator::sample_unselected("app").xpath();

            assert!(selected.contains("and contains(@class, 'selected')"));
            assert!(unselected.contains("and not(contains(@class, 'selected'))"));
            assert_ne!(selected, unselected);
        }

        #[test]
        fn test_unselected_negates_the_exact_selected_predicate() {
            let selected = Locator::sample_selected("app").xpath();
            let unselected = Locator::sample_unselected("app").xpath();

            let predicate = "contains(@class, 'selected')";
            assert!(selected.contains(predicate));
            assert!(unselected.contains(&format!("not({predicate})")));
        }
    }

    mod determinism_tests {
        use super::*;

        proptest! {
            #[test]
            fn prop_sample_locator_is_deterministic(name in "[a-zA-Z0-9_-]{1,40}") {
                let first = Locator::sample(&name).xpath();
                let second = Locator::sample(&name).xpath();
                prop_assert_eq!(first, second);
            }

            #[test]
            fn prop_distinct_names_render_distinct_queries(
                a in "[a-z]{1,20}",
                b in "[A-Z]{1,20}",
            ) {
                prop_assert_ne!(
                    Locator::sample(&a).xpath(),
                    Locator::sample(&b).xpath()
                );
            }
        }

        #[test]
        fn test_locator_equality_follows_query() {
            assert_eq!(Locator::sample("x"), Locator::sample("x"));
            assert_ne!(Locator::sample("x"), Locator::sample_selected("x"));
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display_renders_xpath() {
            let locator = Locator::title_contains("Workspaces");
            assert_eq!(locator.to_string(), locator.xpath());
        }
    }
}
