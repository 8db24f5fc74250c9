//! Menu tree model: nodes, the `{ result: { items } }` envelope and the cached
//! menu state.
//!
//! The serialized field names (`url_path`, `created_at_unixtime`, ...) are the
//! shape UI layers read, so they are kept stable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::{CategoryId, CategoryRecord, DEFAULT_URL_PATH};

/// A node in the navigation menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Category id, or `virtual<slotKey>` for config-defined entries.
    /// Literal children in menu config may omit it.
    #[serde(default)]
    pub id: CategoryId,

    pub name: String,

    #[serde(default = "default_url_path")]
    pub url_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Display order is insertion order unless a slot re-sorts it.
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

fn default_url_path() -> String {
    DEFAULT_URL_PATH.to_string()
}

impl MenuNode {
    /// Create a leaf node with no level or active flag.
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        url_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url_path: url_path.into(),
            level: None,
            active: None,
            children: Vec::new(),
        }
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }
}

impl From<CategoryRecord> for MenuNode {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            url_path: record.url_path,
            level: Some(record.level),
            active: Some(record.active),
            children: Vec::new(),
        }
    }
}

/// The `result` part of the menu envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuResult {
    #[serde(default)]
    pub items: Vec<MenuNode>,
}

/// Menu state held by the store.
///
/// `DataMenu::default()` serializes to `{}`, which is what readers see before
/// the first fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataMenu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MenuResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_unixtime: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at_unixtime: Option<i64>,

    /// Any other top-level envelope fields passed through a payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataMenu {
    /// Wrap mapped items in the `{ result: { items } }` envelope.
    pub fn from_items(items: Vec<MenuNode>) -> Self {
        Self {
            result: Some(MenuResult { items }),
            ..Self::default()
        }
    }

    /// Top-level items, empty before the first fetch.
    pub fn items(&self) -> &[MenuNode] {
        self.result.as_ref().map_or(&[], |r| r.items.as_slice())
    }

    /// Whether the menu must be refetched at `now` (unix seconds).
    ///
    /// A menu without an expiry stamp was never cacheable and counts as
    /// expired.
    pub fn is_expired(&self, now: i64) -> bool {
        match (self.result.as_ref(), self.expires_at_unixtime) {
            (Some(_), Some(expires)) => now >= expires,
            _ => true,
        }
    }
}

/// Payload committed to the store: `{ data: { result: { items } } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuPayload {
    pub data: DataMenu,
}

impl MenuPayload {
    pub fn from_items(items: Vec<MenuNode>) -> Self {
        Self {
            data: DataMenu::from_items(items),
        }
    }
}
