//! Head metadata for rendered pages.
//!
//! `build_head_config` only describes the head; escaping happens when the
//! VDOM tree from `HeadConfig::to_element` is rendered.

use super::{AisleSite, RenderContext, RawElement};
use crate::stream::EntityRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tola_vdom::prelude::*;

pub const CHARSET: &str = "UTF-8";
pub const VIEWPORT: &str = "width=device-width, initial-scale=1";

/// Kind of a head tag descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Meta,
    Link,
}

impl TagKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Link => "link",
        }
    }
}

/// Ordered attribute list, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Tag {
    #[serde(rename = "type")]
    pub kind: TagKind,
    pub attributes: Attributes,
}

impl Tag {
    pub fn new<K, V>(kind: TagKind, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            kind,
            attributes: attributes.into_iter().collect(),
        }
    }
}

/// Contents of a document's `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HeadConfig {
    pub title: String,
    pub charset: String,
    pub viewport: String,
    pub tags: Vec<Tag>,
}

/// Head for a category page: title from the record name, the record
/// description verbatim as the description meta, then the favicon link.
///
/// The render context is part of the render contract but not used here.
pub fn build_head_config(record: &EntityRecord, _ctx: &RenderContext, favicon: &str) -> HeadConfig {
    HeadConfig {
        title: record.name.clone(),
        charset: CHARSET.into(),
        viewport: VIEWPORT.into(),
        tags: vec![
            Tag::new(
                TagKind::Meta,
                [("name", "description"), ("content", record.description.as_str())],
            ),
            Tag::new(
                TagKind::Link,
                [("rel", "icon"), ("type", "image/x-icon"), ("href", favicon)],
            ),
        ],
    }
}

impl HeadConfig {
    /// `<head>` element: charset, viewport, title, then tags in order.
    pub fn to_element(&self) -> RawElement {
        let mut head = AisleSite::element("head", Attrs::new());
        head.push_elem(AisleSite::element(
            "meta",
            Attrs::from([("charset", self.charset.as_str())]),
        ));
        head.push_elem(AisleSite::element(
            "meta",
            Attrs::from([("name", "viewport"), ("content", self.viewport.as_str())]),
        ));

        let mut title = AisleSite::element("title", Attrs::new());
        title.push_text(&self.title);
        head.push_elem(title);

        for tag in &self.tags {
            let mut elem = AisleSite::element(tag.kind.as_str(), Attrs::new());
            for (name, value) in tag.attributes.iter() {
                elem.set_attr(name, value);
            }
            head.push_elem(elem);
        }
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::EntityId;

    fn record() -> EntityRecord {
        EntityRecord {
            id: EntityId::new("42"),
            name: "Widgets".into(),
            description: "Everything \"widget\" & more".into(),
            ..Default::default()
        }
    }

    fn head() -> HeadConfig {
        build_head_config(&record(), &RenderContext::for_path("widgets"), "/yext-favicon.ico")
    }

    #[test]
    fn test_head_fields() {
        let head = head();
        assert_eq!(head.title, "Widgets");
        assert_eq!(head.charset, "UTF-8");
        assert_eq!(head.viewport, "width=device-width, initial-scale=1");
    }

    #[test]
    fn test_exactly_two_tags_in_order() {
        let head = head();
        assert_eq!(head.tags.len(), 2);

        let description = &head.tags[0];
        assert_eq!(description.kind, TagKind::Meta);
        assert_eq!(description.attributes.get("name"), Some("description"));
        // Stored verbatim, not escaped.
        assert_eq!(
            description.attributes.get("content"),
            Some("Everything \"widget\" & more")
        );

        let icon = &head.tags[1];
        assert_eq!(icon.kind, TagKind::Link);
        assert_eq!(icon.attributes.get("rel"), Some("icon"));
        assert_eq!(icon.attributes.get("type"), Some("image/x-icon"));
        assert_eq!(icon.attributes.get("href"), Some("/yext-favicon.ico"));
    }

    #[test]
    fn test_context_does_not_change_head() {
        let a = build_head_config(&record(), &RenderContext::for_path("widgets"), "/f.ico");
        let b = build_head_config(&record(), &RenderContext::for_path("en/NY/x-1"), "/f.ico");
        assert_eq!(a, b);
    }

    #[test]
    fn test_head_element_order() {
        let head = head().to_element();
        let tags: Vec<_> = head
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Element(e) => Some(e.as_ref()),
                _ => None,
            })
            .collect();
        assert_eq!(tags.len(), 5);
        assert!(tags[0].tag == "meta");
        assert_eq!(tags[0].get_attr("charset").map(|v| v.to_string()).as_deref(), Some("UTF-8"));
        assert!(tags[2].tag == "title");
        assert_eq!(tags[2].text_content(), "Widgets");
        assert!(tags[4].tag == "link");
        assert_eq!(
            tags[4].get_attr("href").map(|v| v.to_string()).as_deref(),
            Some("/yext-favicon.ico")
        );
    }

    #[test]
    fn test_rendered_head_escapes_description() {
        let html = crate::page::render_document("en", &head(), AisleSite::element("body", Attrs::new()));
        assert!(html.contains("<title>Widgets</title>"));
        assert!(html.contains("&amp; more"));
        assert!(!html.contains("\"widget\" & more"));
    }

    #[test]
    fn test_head_serializes_like_platform_head_config() {
        let value = serde_json::to_value(head()).unwrap();
        assert_eq!(value["tags"][0]["type"], "meta");
        assert_eq!(value["tags"][0]["attributes"]["name"], "description");
        assert_eq!(value["tags"][1]["type"], "link");
        assert_eq!(value["charset"], "UTF-8");
    }
}
