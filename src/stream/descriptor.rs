//! `[stream]` data-fetch descriptor.
//!
//! Declares which entities the category template is generated for and which
//! fields each hydrated document carries. The built-in descriptor matches
//! the category stream; `aisle.toml` may override any part of it:
//!
//! ```toml
//! [stream]
//! id = "my-stream-id-category"
//! filter.entity_types = ["ce_category"]
//! localization = { locales = ["en"], primary = false }
//! ```

use super::EntityRecord;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields hydrated into each category document.
const CATEGORY_FIELDS: &[&str] = &[
    "id",
    "uid",
    "slug",
    "meta",
    "name",
    "c_categoryDescription",
    "c_bannerPhoto",
    "c_linkedDepartment.name",
    "c_linkedDepartment.slug",
    "c_linkedCategories.name",
    "c_linkedCategories.landingPageUrl",
    "c_linkedCategories.slug",
    "c_linkedSubcategories.name",
    "c_linkedSubcategories.landingPageUrl",
    "c_linkedSubcategories.slug",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub id: String,
    /// Field selectors; dotted paths reach into objects and lists.
    pub fields: Vec<String>,
    pub filter: StreamFilter,
    pub localization: Localization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamFilter {
    pub entity_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Localization {
    pub locales: Vec<String>,
    /// Whether only the primary language profile is generated. Carried
    /// through to the descriptor dump; exports already contain the
    /// profiles the platform resolved.
    pub primary: bool,
}

pub struct StreamFields {
    pub id: FieldPath,
    pub fields: FieldPath,
    pub entity_types: FieldPath,
    pub locales: FieldPath,
}

impl StreamConfig {
    pub const FIELDS: StreamFields = StreamFields {
        id: FieldPath::new("stream.id"),
        fields: FieldPath::new("stream.fields"),
        entity_types: FieldPath::new("stream.filter.entity_types"),
        locales: FieldPath::new("stream.localization.locales"),
    };

    /// Descriptor of the category landing-page stream.
    pub fn category() -> Self {
        Self {
            id: "my-stream-id-category".into(),
            fields: CATEGORY_FIELDS.iter().map(|f| (*f).to_string()).collect(),
            filter: StreamFilter {
                entity_types: vec!["ce_category".into()],
            },
            localization: Localization {
                locales: vec!["en".into()],
                primary: false,
            },
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.id.trim().is_empty() {
            diag.error(Self::FIELDS.id, "stream id must not be empty");
        }
        if !self.fields.iter().any(|f| f == "id") {
            diag.error_with_hint(
                Self::FIELDS.fields,
                "`id` is not selected",
                "every document needs `id`, it anchors the fallback path and redirects",
            );
        }
        if self.filter.entity_types.is_empty() {
            diag.warn(Self::FIELDS.entity_types, "empty, every entity type is accepted");
        }
        if self.localization.locales.is_empty() {
            diag.error(Self::FIELDS.locales, "at least one locale is required");
        }
    }

    /// Whether a record belongs to this stream.
    ///
    /// Records without `meta.entityType` pass the type filter and records
    /// without a locale pass the locale filter: trimmed exports are already
    /// scoped to one stream.
    pub fn accepts(&self, record: &EntityRecord) -> bool {
        let type_ok = match record.meta.entity_type() {
            Some(ty) => {
                self.filter.entity_types.is_empty()
                    || self.filter.entity_types.iter().any(|t| t == ty)
            }
            None => true,
        };
        let locale = record.effective_locale();
        let locale_ok = locale.is_empty() || self.localization.locales.iter().any(|l| l == locale);
        type_ok && locale_ok
    }

    /// Keep the records this stream accepts, in input order.
    pub fn select(&self, records: Vec<EntityRecord>) -> Vec<EntityRecord> {
        let total = records.len();
        let selected: Vec<_> = records.into_iter().filter(|r| self.accepts(r)).collect();
        if selected.len() < total {
            debug!("stream"; "{}: skipped {} of {} records", self.id, total - selected.len(), total);
        }
        selected
    }

    /// Declared field selectors missing from a raw document.
    ///
    /// A list-valued segment counts as present when any element has the
    /// rest of the path.
    pub fn missing_fields<'a>(&'a self, document: &Value) -> Vec<&'a str> {
        self.fields
            .iter()
            .map(String::as_str)
            .filter(|field| {
                let segments: Vec<&str> = field.split('.').collect();
                !has_path(document, &segments)
            })
            .collect()
    }
}

fn has_path(value: &Value, segments: &[&str]) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return !value.is_null();
    };
    match value {
        Value::Object(map) => map.get(*head).is_some_and(|child| has_path(child, rest)),
        // Lists are transparent in selectors.
        Value::Array(items) => items.iter().any(|item| has_path(item, segments)),
        _ => false,
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::category()
    }
}

impl Default for StreamFilter {
    fn default() -> Self {
        StreamConfig::category().filter
    }
}

impl Default for Localization {
    fn default() -> Self {
        StreamConfig::category().localization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{EntityId, EntityMeta};
    use serde_json::json;

    fn record(entity_type: Option<&str>, locale: &str) -> EntityRecord {
        EntityRecord {
            id: EntityId::new("1"),
            locale: locale.into(),
            meta: entity_type.map(EntityMeta::with_entity_type).unwrap_or_default(),
            ..Default::default()
        }
    }

    #[test]
    fn test_category_descriptor() {
        let stream = StreamConfig::category();
        assert_eq!(stream.id, "my-stream-id-category");
        assert_eq!(stream.filter.entity_types, ["ce_category"]);
        assert_eq!(stream.localization.locales, ["en"]);
        assert!(!stream.localization.primary);
        assert_eq!(stream.fields.len(), 15);
        assert_eq!(stream.fields[0], "id");
    }

    #[test]
    fn test_accepts_by_type_and_locale() {
        let stream = StreamConfig::category();
        assert!(stream.accepts(&record(Some("ce_category"), "en")));
        assert!(stream.accepts(&record(None, "en")));
        assert!(!stream.accepts(&record(Some("ce_product"), "en")));
        assert!(!stream.accepts(&record(Some("ce_category"), "fr")));
        assert!(stream.accepts(&record(Some("ce_category"), "")));
    }

    #[test]
    fn test_select_keeps_order() {
        let stream = StreamConfig::category();
        let mut a = record(Some("ce_category"), "en");
        a.id = EntityId::new("a");
        let b = record(Some("ce_product"), "en");
        let mut c = record(None, "en");
        c.id = EntityId::new("c");

        let ids: Vec<_> = stream
            .select(vec![a, b, c])
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_partial_override_from_toml() {
        let stream: StreamConfig = toml::from_str(
            r#"
            [localization]
            locales = ["en", "es"]
            "#,
        )
        .unwrap();
        assert_eq!(stream.id, "my-stream-id-category");
        assert_eq!(stream.localization.locales, ["en", "es"]);
        assert_eq!(stream.filter.entity_types, ["ce_category"]);
    }

    #[test]
    fn test_missing_fields_walks_lists() {
        let stream = StreamConfig::category();
        let doc = json!({
            "id": "1", "uid": 9, "slug": "widgets", "meta": {}, "name": "Widgets",
            "c_categoryDescription": "d", "c_bannerPhoto": {"url": "u"},
            "c_linkedDepartment": [{"name": "Hardware", "slug": "hardware"}],
            "c_linkedCategories": [{"name": "A"}, {"landingPageUrl": "/a", "slug": "a"}],
            "c_linkedSubcategories": [{"name": "Gears", "slug": "gears"}]
        });
        assert_eq!(stream.missing_fields(&doc), ["c_linkedSubcategories.landingPageUrl"]);
    }

    #[test]
    fn test_validate_requires_id_field() {
        let stream = StreamConfig {
            fields: vec!["name".into()],
            ..StreamConfig::category()
        };
        let mut diag = ConfigDiagnostics::new();
        stream.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, StreamConfig::FIELDS.fields);
    }
}
