//! Search client handed to the product search widget.
//!
//! The generator never queries the search service. It emits a session
//! description (endpoints, keys, vertical, static facet filter) that the
//! client-side widget reads from a JSON data island. The client is built
//! once in `main` and passed by reference into every render, so tests can
//! substitute their own `SearchBackend`.

use crate::config::{EndpointUrls, SearchConfig};
use crate::utils::html::escape_script;
use serde::Serialize;

/// Facet field that scopes product results to a category.
pub const LINKED_CATEGORY_FIELD: &str = "c_linkedCategories.name";

/// Source of search sessions for rendered pages.
pub trait SearchBackend: Send + Sync {
    fn config(&self) -> &SearchConfig;

    fn endpoints(&self) -> EndpointUrls {
        self.config().endpoints.urls()
    }

    /// Session bound to this client and scoped by `filter`.
    fn session(&self, filter: FacetFilter) -> SearchSession {
        let config = self.config();
        SearchSession {
            api_key: config.api_key.clone(),
            experience_key: config.experience_key.clone(),
            locale: config.locale.clone(),
            endpoints: self.endpoints(),
            vertical_key: config.vertical_key.clone(),
            static_filters: vec![filter],
        }
    }
}

/// The hosted headless search client.
#[derive(Debug, Clone)]
pub struct HeadlessSearcher {
    config: SearchConfig,
    endpoints: EndpointUrls,
}

impl HeadlessSearcher {
    pub fn new(config: SearchConfig) -> Self {
        let endpoints = config.endpoints.urls();
        Self { config, endpoints }
    }
}

impl SearchBackend for HeadlessSearcher {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn endpoints(&self) -> EndpointUrls {
        self.endpoints.clone()
    }
}

/// Equality filter on one facet field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetFilter {
    pub field_id: String,
    pub matcher: &'static str,
    pub value: String,
}

impl FacetFilter {
    pub fn equals(field_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            matcher: "$eq",
            value: value.into(),
        }
    }

    /// Products linked to the category named `name`.
    pub fn linked_category(name: &str) -> Self {
        Self::equals(LINKED_CATEGORY_FIELD, name)
    }
}

/// Everything the widget needs to start searching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSession {
    pub api_key: String,
    pub experience_key: String,
    pub locale: String,
    pub endpoints: EndpointUrls,
    pub vertical_key: String,
    pub static_filters: Vec<FacetFilter>,
}

impl SearchSession {
    /// JSON for the `<script type="application/json">` data island.
    pub fn to_script_json(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".into());
        escape_script(&json).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;

    fn config() -> SearchConfig {
        SearchConfig {
            api_key: "abc123".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_session_carries_client_config() {
        let searcher = HeadlessSearcher::new(config());
        let session = searcher.session(FacetFilter::linked_category("Widgets"));

        assert_eq!(session.api_key, "abc123");
        assert_eq!(session.experience_key, "answers");
        assert_eq!(session.vertical_key, "products");
        assert_eq!(session.endpoints, Endpoints::Sandbox.urls());
        assert_eq!(
            session.static_filters,
            [FacetFilter::equals("c_linkedCategories.name", "Widgets")]
        );
    }

    #[test]
    fn test_session_json_shape() {
        let searcher = HeadlessSearcher::new(config());
        let json = searcher
            .session(FacetFilter::linked_category("Widgets"))
            .to_script_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["verticalKey"], "products");
        assert_eq!(value["staticFilters"][0]["fieldId"], LINKED_CATEGORY_FIELD);
        assert_eq!(value["staticFilters"][0]["matcher"], "$eq");
        assert_eq!(value["staticFilters"][0]["value"], "Widgets");
        assert!(value["endpoints"]["verticalSearch"].is_string());
    }

    #[test]
    fn test_session_json_cannot_close_script() {
        let searcher = HeadlessSearcher::new(config());
        let json = searcher
            .session(FacetFilter::linked_category("</script><b>"))
            .to_script_json();
        assert!(!json.contains("</script>"));
    }
}
