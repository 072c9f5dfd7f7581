//! Sitemap generation.
//!
//! Lists every canonical page for search engine indexing. Redirect stubs
//! are left out.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/widgets</loc>
//!   </url>
//! </urlset>
//! ```

use crate::log;
use crate::utils::url::url_path;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub struct Sitemap {
    urls: Vec<String>,
}

impl Sitemap {
    /// Build from the site URL and canonical page paths.
    pub fn build<'a>(base_url: &str, paths: impl IntoIterator<Item = &'a str>) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let urls = paths
            .into_iter()
            .map(|path| format!("{base_url}{}", url_path(path)))
            .collect();
        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(64 + self.urls.len() * 64);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for loc in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&loc));
            xml.push_str("</loc>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write to `file` (already resolved against the output directory).
    pub fn write(self, file: &Path) -> Result<()> {
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        let count = self.len();
        fs::write(file, self.into_xml())
            .with_context(|| format!("Failed to write sitemap to {}", file.display()))?;

        log!("sitemap"; "{} ({} urls)", file.file_name().unwrap_or_default().to_string_lossy(), count);
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::build("https://example.com", []).into_xml();
        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_urls() {
        let sitemap = Sitemap::build(
            "https://shop.example.com/",
            ["widgets", "en/NY/Albany/Main St-7"],
        );
        assert_eq!(sitemap.len(), 2);
        let xml = sitemap.into_xml();
        assert!(xml.contains("<loc>https://shop.example.com/widgets</loc>"));
        assert!(xml.contains("<loc>https://shop.example.com/en/NY/Albany/Main%20St-7</loc>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_sitemap_write() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sitemap.xml");
        Sitemap::build("https://example.com", ["widgets"]).write(&file).unwrap();
        let xml = fs::read_to_string(&file).unwrap();
        assert!(xml.contains("<loc>https://example.com/widgets</loc>"));
    }
}
