//! Category page template.
//!
//! The build pipeline drives a `PageTemplate` through the render contract:
//! for every selected record it asks for the canonical path, the redirect
//! paths, the head config and the page body, each with the same record and
//! a `RenderContext` for the page being written.
//!
//! | Module     | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `route`    | Canonical path, redirects, output file mapping |
//! | `head`     | `HeadConfig` builder and `<head>` rendering    |
//! | `compose`  | Breadcrumb, banner, subcategories, search      |
//! | `family`   | VDOM family the page tree is built from        |
//! | `conflict` | Duplicate output path detection                |
//! | `write`    | Writing documents and redirect stubs           |

mod compose;
mod conflict;
mod family;
mod head;
mod route;
mod write;

pub use compose::{Crumb, breadcrumb_trail, compose_page, subcategories_label};
pub use conflict::{Claim, PathClaim, PathConflict, PathRegistry};
pub use head::{Attributes, CHARSET, HeadConfig, Tag, TagKind, VIEWPORT, build_head_config};
pub use family::{AisleSite, RawElement};
pub use route::{
    page_output_file, redirect_output_file, relative_prefix_to_root, resolve_path,
    resolve_redirects,
};
pub use write::{write_page, write_redirect};

use crate::config::SiteSectionConfig;
use crate::search::SearchBackend;
use crate::stream::EntityRecord;
use tola_vdom::prelude::*;

/// Per-page context handed to every template call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// `../` segments leading from the page back to the site root.
    pub relative_prefix_to_root: String,
    /// Canonical path of the page being rendered.
    pub path: String,
}

impl RenderContext {
    pub fn for_path(path: &str) -> Self {
        Self {
            relative_prefix_to_root: relative_prefix_to_root(path),
            path: path.to_string(),
        }
    }
}

/// The render contract between the build pipeline and a page template.
pub trait PageTemplate: Sync {
    fn path(&self, record: &EntityRecord) -> String;

    fn redirects(&self, record: &EntityRecord) -> Vec<String>;

    fn head(&self, record: &EntityRecord, ctx: &RenderContext) -> HeadConfig;

    /// Page body (`<body>` element).
    fn render(&self, record: &EntityRecord, ctx: &RenderContext) -> RawElement;

    /// `<html lang>` of the document.
    fn lang(&self, record: &EntityRecord) -> String {
        record.effective_locale().to_string()
    }

    /// Full HTML document for the record.
    fn document(&self, record: &EntityRecord, ctx: &RenderContext) -> String {
        let head = self.head(record, ctx);
        let body = self.render(record, ctx);
        render_document(&self.lang(record), &head, body)
    }
}

/// `<!DOCTYPE html>` document from a head config and a body element.
///
/// The tree runs through the indexer and processor before rendering, the
/// same phases every VDOM document goes through.
pub fn render_document(lang: &str, head: &HeadConfig, body: RawElement) -> String {
    let mut html = AisleSite::element("html", Attrs::new());
    if !lang.is_empty() {
        html.set_attr("lang", lang);
    }
    html.push_elem(head.to_element());
    html.push_elem(body);

    let processed = Pipeline::new(Document::new(html))
        .pipe(AisleSite::indexer())
        .pipe(AisleSite::processor())
        .into_inner();

    let bytes = render_document_bytes(&processed, &RenderConfig::new(false, false));
    let rendered = String::from_utf8_lossy(&bytes);

    // Prepend the doctype unless the renderer already wrote one.
    let has_doctype = rendered
        .get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!doctype"));
    if has_doctype {
        rendered.into_owned()
    } else {
        format!("<!DOCTYPE html>\n{rendered}")
    }
}

/// Category landing page: the template behind every `ce_category` document.
pub struct CategoryTemplate<'a> {
    site: &'a SiteSectionConfig,
    search: &'a dyn SearchBackend,
}

impl<'a> CategoryTemplate<'a> {
    pub fn new(site: &'a SiteSectionConfig, search: &'a dyn SearchBackend) -> Self {
        Self { site, search }
    }
}

impl PageTemplate for CategoryTemplate<'_> {
    fn path(&self, record: &EntityRecord) -> String {
        resolve_path(record)
    }

    fn redirects(&self, record: &EntityRecord) -> Vec<String> {
        resolve_redirects(record)
    }

    fn head(&self, record: &EntityRecord, ctx: &RenderContext) -> HeadConfig {
        build_head_config(record, ctx, &self.site.favicon)
    }

    fn render(&self, record: &EntityRecord, ctx: &RenderContext) -> RawElement {
        compose_page(record, ctx, self.site, self.search)
    }

    fn lang(&self, record: &EntityRecord) -> String {
        match record.effective_locale() {
            "" => self.site.language.clone(),
            locale => locale.to_string(),
        }
    }
}
