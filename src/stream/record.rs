//! Hydrated entity records as exported by the content platform.
//!
//! Field names on the wire are the platform's (`c_linkedDepartment`,
//! `_site`, `meta.entityType`); Rust names drop the `c_` prefix.

use crate::utils::url::url_path;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Entity id, kept in its string form.
///
/// Streams emit ids as strings or numbers depending on the entity type;
/// both stringify the same way (`"42"` and `42` are `EntityId("42")`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integral floats drop their fraction: `42.0` is `EntityId("42")`.
    pub fn from_number(n: &Number) -> Self {
        match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => {
                Self((f as i64).to_string())
            }
            _ => Self(n.to_string()),
        }
    }
}

/// Largest integer an `f64` holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Explicit JSON `null` reads as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self::from_number(&n)),
            other => Err(serde::de::Error::custom(format!(
                "entity id must be a string or number, got {other}"
            ))),
        }
    }
}

/// Postal address. Only the fields the fallback path uses are typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub line1: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Image field (`c_bannerPhoto`, `_site.c_siteLogo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Photo {
    pub url: String,
    pub alternate_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One element of a linked-entity list (department, category, subcategory).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkedEntity {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub landing_page_url: Option<String>,
    pub slug: Option<String>,
}

impl LinkedEntity {
    /// Link target: the landing page when set, otherwise the encoded `/{slug}`.
    pub fn href(&self) -> String {
        match (&self.landing_page_url, &self.slug) {
            (Some(url), _) if !url.is_empty() => url.clone(),
            (_, Some(slug)) => url_path(slug),
            _ => "#".to_string(),
        }
    }
}

/// Site-wide context attached to every document as `_site`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContext {
    pub name: Option<String>,
    #[serde(rename = "c_siteLogo")]
    pub site_logo: Option<Photo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Platform metadata (`meta`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityMeta {
    entity_type: Option<EntityTypeRef>,
    pub locale: Option<String>,
}

/// `meta.entityType` is `{"id": "ce_category", "uid": ...}` in full exports
/// and a bare string in trimmed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum EntityTypeRef {
    Id(String),
    Object { id: String },
}

impl EntityMeta {
    pub fn with_entity_type(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: Some(EntityTypeRef::Id(entity_type.into())),
            locale: None,
        }
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_ref().map(|t| match t {
            EntityTypeRef::Id(id) | EntityTypeRef::Object { id } => id.as_str(),
        })
    }
}

/// A hydrated category entity. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: EntityId,
    #[serde(default)]
    pub uid: Option<EntityId>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locale: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: Address,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, rename = "c_categoryDescription")]
    pub category_description: Option<String>,
    #[serde(default, rename = "c_bannerPhoto")]
    pub banner_photo: Option<Photo>,
    #[serde(default, rename = "c_linkedDepartment")]
    pub linked_department: Option<Vec<LinkedEntity>>,
    #[serde(default, rename = "c_linkedCategories")]
    pub linked_categories: Option<Vec<LinkedEntity>>,
    #[serde(default, rename = "c_linkedSubcategories")]
    pub linked_subcategories: Option<Vec<LinkedEntity>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: EntityMeta,
    #[serde(default, rename = "_site", deserialize_with = "null_as_default")]
    pub site: SiteContext,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntityRecord {
    /// The linked department. Only the first list element is read; the
    /// platform models the field as a list but a category has one department.
    pub fn department(&self) -> Option<&LinkedEntity> {
        self.linked_department.as_deref().and_then(|list| list.first())
    }

    /// Linked subcategories, `None` when the field is absent or empty.
    pub fn subcategories(&self) -> Option<&[LinkedEntity]> {
        self.linked_subcategories
            .as_deref()
            .filter(|subs| !subs.is_empty())
    }

    pub fn banner_url(&self) -> Option<&str> {
        self.banner_photo
            .as_ref()
            .map(|photo| photo.url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Locale used for filtering: the document locale, else `meta.locale`.
    pub fn effective_locale(&self) -> &str {
        if !self.locale.is_empty() {
            return &self.locale;
        }
        self.meta.locale.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_ids_match() {
        let a: EntityRecord = serde_json::from_value(json!({"id": 42})).unwrap();
        let b: EntityRecord = serde_json::from_value(json!({"id": "42"})).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.id.to_string(), "42");
    }

    #[test]
    fn test_integral_float_id_drops_fraction() {
        let a: EntityRecord = serde_json::from_value(json!({"id": 42.0})).unwrap();
        assert_eq!(a.id.as_str(), "42");
        let b: EntityRecord = serde_json::from_value(json!({"id": 4.5})).unwrap();
        assert_eq!(b.id.as_str(), "4.5");
        let c: EntityRecord = serde_json::from_value(json!({"id": -3})).unwrap();
        assert_eq!(c.id.as_str(), "-3");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let record: EntityRecord = serde_json::from_value(json!({
            "id": "1",
            "name": null,
            "locale": null,
            "description": null,
            "address": {"region": null, "city": "Albany", "line1": null},
            "meta": null,
            "_site": null,
            "c_linkedDepartment": [{"name": null, "slug": "hardware"}]
        }))
        .unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.locale, "");
        assert_eq!(record.description, "");
        assert_eq!(record.address.region, "");
        assert_eq!(record.address.city, "Albany");
        assert_eq!(record.meta, EntityMeta::default());
        assert_eq!(record.department().unwrap().name, "");
    }

    #[test]
    fn test_object_id_is_rejected() {
        let result: Result<EntityRecord, _> = serde_json::from_value(json!({"id": {"x": 1}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_platform_field_names() {
        let record: EntityRecord = serde_json::from_value(json!({
            "id": "cat-1",
            "name": "Widgets",
            "c_categoryDescription": "All widgets",
            "c_bannerPhoto": {"url": "https://img.example.com/w.jpg", "width": 1200},
            "c_linkedDepartment": [{"name": "Hardware", "slug": "hardware"}],
            "c_linkedSubcategories": [{"name": "Gears", "landingPageUrl": "/gears"}],
            "meta": {"entityType": {"id": "ce_category", "uid": 123}, "locale": "en"},
            "_site": {"c_siteLogo": {"url": "https://img.example.com/logo.png"}},
            "c_unused": true
        }))
        .unwrap();

        assert_eq!(record.category_description.as_deref(), Some("All widgets"));
        assert_eq!(record.banner_url(), Some("https://img.example.com/w.jpg"));
        assert_eq!(record.department().map(|d| d.name.as_str()), Some("Hardware"));
        assert_eq!(record.subcategories().map(|subs| subs.len()), Some(1));
        assert_eq!(record.meta.entity_type(), Some("ce_category"));
        assert_eq!(record.effective_locale(), "en");
        assert!(record.site.site_logo.is_some());
        assert!(record.extra.contains_key("c_unused"));
    }

    #[test]
    fn test_department_reads_first_element_only() {
        let record: EntityRecord = serde_json::from_value(json!({
            "id": 1,
            "c_linkedDepartment": [
                {"name": "Hardware", "slug": "hardware"},
                {"name": "Garden", "slug": "garden"}
            ]
        }))
        .unwrap();
        assert_eq!(record.department().unwrap().slug.as_deref(), Some("hardware"));
    }

    #[test]
    fn test_empty_linked_lists_are_absent() {
        let record: EntityRecord = serde_json::from_value(json!({
            "id": 1,
            "c_linkedDepartment": [],
            "c_linkedSubcategories": []
        }))
        .unwrap();
        assert!(record.department().is_none());
        assert!(record.subcategories().is_none());
        assert!(record.banner_url().is_none());
    }

    #[test]
    fn test_entity_type_as_string() {
        let meta: EntityMeta = serde_json::from_value(json!({"entityType": "ce_category"})).unwrap();
        assert_eq!(meta.entity_type(), Some("ce_category"));
    }

    #[test]
    fn test_linked_entity_href() {
        let landing = LinkedEntity {
            name: "Gears".into(),
            landing_page_url: Some("https://shop.example.com/gears".into()),
            slug: Some("gears".into()),
        };
        assert_eq!(landing.href(), "https://shop.example.com/gears");

        let slug_only = LinkedEntity {
            slug: Some("gears".into()),
            ..Default::default()
        };
        assert_eq!(slug_only.href(), "/gears");
        assert_eq!(LinkedEntity::default().href(), "#");
    }
}
