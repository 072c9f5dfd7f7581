//! `[site]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Default favicon, emitted as the `rel="icon"` link of every page.
pub const DEFAULT_FAVICON: &str = "/yext-favicon.ico";

/// Site-wide information shared by every rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title, used in the header when a page has no logo.
    pub title: String,

    /// Site URL (e.g., "https://shop.example.com"). Required for the sitemap.
    pub url: Option<String>,

    /// Language used for `<html lang>` when a record carries no locale.
    pub language: String,

    /// Favicon href written into every head config.
    pub favicon: String,

    /// Logo used when the record's site context has none.
    pub logo: Option<String>,
}

pub struct SiteFields {
    pub title: FieldPath,
    pub url: FieldPath,
    pub language: FieldPath,
    pub favicon: FieldPath,
}

impl SiteSectionConfig {
    pub const FIELDS: SiteFields = SiteFields {
        title: FieldPath::new("site.title"),
        url: FieldPath::new("site.url"),
        language: FieldPath::new("site.language"),
        favicon: FieldPath::new("site.favicon"),
    };

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `sitemap_enabled`, `url` must be set
    /// - `url` must be an http(s) URL with a host
    pub fn validate(&self, sitemap_enabled: bool, diag: &mut ConfigDiagnostics) {
        if sitemap_enabled && self.url.is_none() {
            diag.error_with_hint(
                Self::FIELDS.url,
                "sitemap is enabled but the site url is not configured",
                format!("set {}, e.g.: \"https://example.com\"", Self::FIELDS.url),
            );
        }

        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        if self.favicon.is_empty() {
            diag.warn(Self::FIELDS.favicon, "empty favicon href, pages will link to \"\"");
        }
        if self.language.is_empty() {
            diag.error(Self::FIELDS.language, "language must not be empty");
        }
    }
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: None,
            language: "en".into(),
            favicon: DEFAULT_FAVICON.into(),
            logo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(site: &SiteSectionConfig, sitemap: bool) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        site.validate(sitemap, &mut diag);
        diag
    }

    #[test]
    fn test_default_site_is_valid() {
        let site = SiteSectionConfig::default();
        assert_eq!(site.favicon, DEFAULT_FAVICON);
        assert!(!validate(&site, false).has_errors());
    }

    #[test]
    fn test_sitemap_requires_url() {
        let site = SiteSectionConfig::default();
        let diag = validate(&site, true);
        assert_eq!(diag.errors()[0].field, SiteSectionConfig::FIELDS.url);
    }

    #[test]
    fn test_url_scheme_and_host() {
        let mut site = SiteSectionConfig {
            url: Some("ftp://example.com".into()),
            ..Default::default()
        };
        assert!(validate(&site, false).has_errors());

        site.url = Some("not a url".into());
        assert!(validate(&site, false).has_errors());

        site.url = Some("https://shop.example.com".into());
        assert!(!validate(&site, true).has_errors());
    }
}
