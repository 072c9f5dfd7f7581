//! `[search]` configuration: the hosted search client behind the product
//! search widget.
//!
//! ```toml
//! [search]
//! api_key = "..."
//! experience_key = "answers"
//! locale = "en"
//! endpoints = "sandbox"
//! vertical_key = "products"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Search environment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoints {
    #[default]
    Sandbox,
    Production,
}

/// Concrete URLs for one endpoint set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointUrls {
    pub universal_search: String,
    pub vertical_search: String,
    pub question_submission: String,
    pub universal_autocomplete: String,
    pub vertical_autocomplete: String,
    pub filter_search: String,
}

impl Endpoints {
    fn hosts(self) -> (&'static str, &'static str) {
        match self {
            Self::Sandbox => ("https://sbx-cdn.yextapis.com", "https://sbx-api.yextapis.com"),
            Self::Production => (
                "https://prod-cdn.us.yextapis.com",
                "https://prod-api.us.yextapis.com",
            ),
        }
    }

    /// Expand the endpoint set into full request URLs.
    pub fn urls(self) -> EndpointUrls {
        let (cdn, api) = self.hosts();
        let search = format!("{cdn}/v2/accounts/me/search");
        EndpointUrls {
            universal_search: format!("{search}/query"),
            vertical_search: format!("{search}/vertical/query"),
            question_submission: format!("{api}/v2/accounts/me/createQuestion"),
            universal_autocomplete: format!("{search}/autocomplete"),
            vertical_autocomplete: format!("{search}/vertical/autocomplete"),
            filter_search: format!("{search}/filtersearch"),
        }
    }
}

/// Static search client configuration, built once per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: String,
    /// Must match the experience configured on the search platform.
    pub experience_key: String,
    pub locale: String,
    pub endpoints: Endpoints,
    pub vertical_key: String,
    /// Placeholder shown in the widget's search bar.
    pub placeholder: String,
}

pub struct SearchFields {
    pub api_key: FieldPath,
    pub experience_key: FieldPath,
    pub locale: FieldPath,
    pub vertical_key: FieldPath,
}

impl SearchConfig {
    pub const FIELDS: SearchFields = SearchFields {
        api_key: FieldPath::new("search.api_key"),
        experience_key: FieldPath::new("search.experience_key"),
        locale: FieldPath::new("search.locale"),
        vertical_key: FieldPath::new("search.vertical_key"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.api_key.trim().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.api_key,
                "search api key is not configured",
                "copy the key from the search experience's API settings",
            );
        } else if !self.api_key.chars().all(|c| c.is_ascii_alphanumeric()) {
            diag.warn(Self::FIELDS.api_key, "api key contains non-alphanumeric characters");
        }

        for (field, value) in [
            (Self::FIELDS.experience_key, &self.experience_key),
            (Self::FIELDS.locale, &self.locale),
            (Self::FIELDS.vertical_key, &self.vertical_key),
        ] {
            if value.trim().is_empty() {
                diag.error(field, "must not be empty");
            }
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            experience_key: "answers".into(),
            locale: "en".into(),
            endpoints: Endpoints::Sandbox,
            vertical_key: "products".into(),
            placeholder: "Search all NWC products".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_sets_differ_by_host() {
        let sandbox = Endpoints::Sandbox.urls();
        let prod = Endpoints::Production.urls();
        assert!(sandbox.vertical_search.starts_with("https://sbx-cdn.yextapis.com/"));
        assert!(prod.vertical_search.starts_with("https://prod-cdn.us.yextapis.com/"));
        assert!(sandbox.vertical_search.ends_with("/search/vertical/query"));
        assert_ne!(sandbox, prod);
    }

    #[test]
    fn test_endpoints_from_toml() {
        let config: SearchConfig = toml::from_str(
            r#"
            api_key = "abc123"
            endpoints = "production"
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoints, Endpoints::Production);
        assert_eq!(config.vertical_key, "products");
        assert_eq!(config.experience_key, "answers");
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let mut diag = ConfigDiagnostics::new();
        SearchConfig::default().validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, SearchConfig::FIELDS.api_key);
    }

    #[test]
    fn test_empty_vertical_is_an_error() {
        let config = SearchConfig {
            api_key: "abc123".into(),
            vertical_key: " ".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, SearchConfig::FIELDS.vertical_key);
    }
}
