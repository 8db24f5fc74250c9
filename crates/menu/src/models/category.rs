//! Category records: the wire shape returned by the sales-channel API and the
//! normalized flat form consumed by the tree builder.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Category identifier.
///
/// The API sends hex strings, while hand-written menu config often uses bare
/// numbers (`id: 5`). Both deserialize to the same string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// Parent reference of a flat record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// Synthetic root: the record is a top-level menu entry.
    Root,
    Category(CategoryId),
}

impl From<Option<CategoryId>> for ParentRef {
    fn from(parent: Option<CategoryId>) -> Self {
        parent.map_or(Self::Root, Self::Category)
    }
}

/// SEO url association of a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoUrl {
    pub seo_path_info: String,
}

/// Category as returned by `GET /sales-channel-api/v1/category`.
///
/// Only the fields the menu needs are modelled; the rest of the payload is
/// ignored. Flags and level are read leniently: a `null` or missing value
/// never rejects the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(rename = "_uniqueIdentifier")]
    pub unique_identifier: CategoryId,

    #[serde(rename = "parentId", default)]
    pub parent_id: Option<CategoryId>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub active: Option<bool>,

    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default)]
    pub level: Option<i32>,

    #[serde(rename = "seoUrls", default)]
    pub seo_urls: Option<Vec<SeoUrl>>,
}

/// Body of the category listing response: `{ "data": [ ... ] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryListBody {
    #[serde(default)]
    pub data: Vec<RawCategory>,
}

/// Normalized flat category, ready for tree building.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub parent: ParentRef,
    pub name: String,
    pub url_path: String,
    pub level: i32,
    pub active: bool,
}

/// Url path used when a category has no SEO url.
pub const DEFAULT_URL_PATH: &str = "/";

impl From<RawCategory> for CategoryRecord {
    fn from(raw: RawCategory) -> Self {
        let url_path = raw
            .seo_urls
            .and_then(|urls| urls.into_iter().next())
            .map_or_else(|| DEFAULT_URL_PATH.to_string(), |seo| seo.seo_path_info);

        Self {
            id: raw.unique_identifier,
            parent: raw.parent_id.into(),
            name: raw.name.unwrap_or_default(),
            url_path,
            level: raw.level.unwrap_or_default(),
            active: raw.is_active.or(raw.active).unwrap_or_default(),
        }
    }
}
