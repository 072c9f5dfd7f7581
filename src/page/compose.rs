//! Category landing page composition.
//!
//! Layout, top to bottom: breadcrumb trail, category banner, subcategory
//! links (only when the record has any), then the product search region
//! scoped to the current category.

use super::{AisleSite, RawElement, RenderContext};
use crate::config::SiteSectionConfig;
use crate::search::{FacetFilter, SearchBackend};
use crate::stream::{EntityRecord, LinkedEntity};
use crate::utils::url::url_path;
use tola_vdom::prelude::*;

/// One breadcrumb segment. `href` is `None` for the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb<'a> {
    pub name: &'a str,
    pub href: Option<String>,
}

/// Department (if linked) followed by the category itself.
pub fn breadcrumb_trail(record: &EntityRecord) -> Vec<Crumb<'_>> {
    let mut trail = Vec::with_capacity(2);
    if let Some(department) = record.department() {
        trail.push(Crumb {
            name: &department.name,
            href: Some(url_path(department.slug.as_deref().unwrap_or_default())),
        });
    }
    trail.push(Crumb {
        name: &record.name,
        href: None,
    });
    trail
}

/// Heading of the subcategory block.
pub fn subcategories_label(name: &str) -> String {
    format!("{name} Subcategories")
}

/// Compose the page body for a category record.
pub fn compose_page(
    record: &EntityRecord,
    _ctx: &RenderContext,
    site: &SiteSectionConfig,
    search: &dyn SearchBackend,
) -> RawElement {
    let name = record.name.as_str();

    let mut sections = vec![
        breadcrumb(&breadcrumb_trail(record)),
        category_banner(
            name,
            record.category_description.as_deref(),
            record.banner_url(),
        ),
    ];

    if let Some(subcategories) = record.subcategories() {
        sections.push(related_categories(&subcategories_label(name), subcategories));
    }

    let mut results = AisleSite::element("div", Attrs::from([("class", "mx-auto max-w-7xl px-4")]));
    results.push_elem(product_search(name, search));
    sections.push(results);

    page_layout(record, site, true, sections)
}

fn page_layout(
    record: &EntityRecord,
    site: &SiteSectionConfig,
    include_search_header: bool,
    sections: Vec<RawElement>,
) -> RawElement {
    let logo = record
        .site
        .site_logo
        .as_ref()
        .map(|photo| photo.url.as_str())
        .filter(|url| !url.is_empty())
        .or(site.logo.as_deref());

    let mut home = AisleSite::element("a", Attrs::from([("href", "/"), ("class", "site-logo")]));
    match logo {
        Some(src) => {
            let alt = record.site.name.as_deref().unwrap_or(&site.title);
            home.push_elem(AisleSite::element("img", Attrs::from([("src", src), ("alt", alt)])));
        }
        None => home.push_text(&site.title),
    }

    let mut header = AisleSite::element("header", Attrs::from([("class", "site-header")]));
    header.push_elem(home);
    if include_search_header {
        let mut form = AisleSite::element(
            "form",
            Attrs::from([("action", "/search"), ("role", "search"), ("class", "search-header")]),
        );
        form.push_elem(AisleSite::element(
            "input",
            Attrs::from([("type", "search"), ("name", "query"), ("aria-label", "Search")]),
        ));
        header.push_elem(form);
    }

    let mut main = AisleSite::element("main", Attrs::new());
    for section in sections {
        main.push_elem(section);
    }

    let mut body = AisleSite::element("body", Attrs::new());
    body.push_elem(header);
    body.push_elem(main);
    body.push_elem(AisleSite::element("footer", Attrs::from([("class", "site-footer")])));
    body
}

fn breadcrumb(trail: &[Crumb<'_>]) -> RawElement {
    let mut nav = AisleSite::element(
        "nav",
        Attrs::from([("aria-label", "Breadcrumb"), ("class", "flex flex-row my-4 px-4")]),
    );

    for (index, crumb) in trail.iter().enumerate() {
        let mut item = AisleSite::element("div", Attrs::new());
        if index != 0 {
            let mut separator =
                AisleSite::element("span", Attrs::from([("class", "mx-2 text-gray-400")]));
            separator.push_text(">");
            item.push_elem(separator);
        }
        let mut segment = match &crumb.href {
            Some(href) => AisleSite::element(
                "a",
                Attrs::from([
                    ("href", href.as_str()),
                    ("class", "text-brand-primary hover:text-brand-hover"),
                ]),
            ),
            None => AisleSite::element(
                "span",
                Attrs::from([("aria-current", "page"), ("class", "text-brand-primary")]),
            ),
        };
        segment.push_text(crumb.name);
        item.push_elem(segment);
        nav.push_elem(item);
    }
    nav
}

fn category_banner(name: &str, description: Option<&str>, photo_url: Option<&str>) -> RawElement {
    let mut banner = AisleSite::element("section", Attrs::from([("class", "category-banner")]));
    if let Some(url) = photo_url {
        banner.push_elem(AisleSite::element(
            "img",
            Attrs::from([("src", url), ("alt", name), ("class", "category-banner-photo")]),
        ));
    }

    let mut heading = AisleSite::element("h1", Attrs::new());
    heading.push_text(name);
    banner.push_elem(heading);

    if let Some(description) = description {
        let mut paragraph = AisleSite::element("p", Attrs::new());
        paragraph.push_text(description);
        banner.push_elem(paragraph);
    }
    banner
}

fn related_categories(title: &str, categories: &[LinkedEntity]) -> RawElement {
    let mut list = AisleSite::element("ul", Attrs::from([("class", "related-categories-list")]));
    for category in categories {
        let href = category.href();
        let mut link = AisleSite::element("a", Attrs::from([("href", href.as_str())]));
        link.push_text(&category.name);

        let mut item = AisleSite::element("li", Attrs::new());
        item.push_elem(link);
        list.push_elem(item);
    }

    let mut heading = AisleSite::element("h2", Attrs::new());
    heading.push_text(title);

    let mut section = AisleSite::element("section", Attrs::from([("class", "related-categories")]));
    section.push_elem(heading);
    section.push_elem(list);
    section
}

/// Search provider bound to `search`, wrapping a results region filtered
/// to products linked to the category `name`.
fn product_search(name: &str, search: &dyn SearchBackend) -> RawElement {
    let facet = FacetFilter::linked_category(name);
    let session = search.session(facet.clone());
    let placeholder = search.config().placeholder.as_str();

    let mut data = AisleSite::element(
        "script",
        Attrs::from([("type", "application/json"), ("data-search-session", "")]),
    );
    data.push(Node::Text(Text::raw(session.to_script_json())));

    let mut widget = AisleSite::element(
        "div",
        Attrs::from([
            ("class", "product-search"),
            ("data-facet-field", facet.field_id.as_str()),
            ("data-facet-value", facet.value.as_str()),
        ]),
    );
    widget.push_elem(AisleSite::element(
        "input",
        Attrs::from([
            ("type", "search"),
            ("placeholder", placeholder),
            ("aria-label", placeholder),
        ]),
    ));
    widget.push_elem(AisleSite::element("div", Attrs::from([("data-search-results", "")])));

    let mut provider = AisleSite::element(
        "div",
        Attrs::from([("data-search-provider", session.vertical_key.as_str())]),
    );
    provider.push_elem(data);
    provider.push_elem(widget);
    provider
}
