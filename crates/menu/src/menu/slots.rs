//! Config-driven menu slots.
//!
//! A menu map replaces the fetched top level with an explicit list of slots.
//! Each slot either reuses a fetched category under a new name or declares a
//! virtual entry, and may append literal children and sort them by name.
//!
//! ```yaml
//! women:
//!   id: 5
//!   name: Shoes
//!   sortAlphabetically: true
//! brands:
//!   name: Brands
//!   url_path: brands/
//!   childrenStore: brandList
//!   children:
//!     - name: All brands
//!       url_path: brands/all/
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use super::tree::sort_menu_entries;
use crate::error::{MenuError, MenuResult};
use crate::models::{CategoryId, DEFAULT_URL_PATH, MenuNode};

/// Prefix of ids generated for virtual slots.
pub const VIRTUAL_ID_PREFIX: &str = "virtual";

/// What a slot puts at its position in the menu.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotSpec {
    /// Reuse a fetched category, overriding its display name.
    Category { id: CategoryId, name: String },
    /// Synthetic entry whose children may come from a named store collection.
    Virtual {
        name: String,
        url_path: Option<String>,
        children_store: Option<String>,
    },
}

/// One configured top-level menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSlot {
    pub key: String,
    pub spec: SlotSpec,
    /// Literal nodes appended to the slot's children.
    pub children: Vec<MenuNode>,
    pub sort_alphabetically: bool,
}

impl MenuSlot {
    /// Id given to this slot when it is virtual.
    pub fn virtual_id(&self) -> CategoryId {
        CategoryId::new(format!("{VIRTUAL_ID_PREFIX}{}", self.key))
    }
}

/// Ordered slot list.
///
/// Slots are enumerated like object keys: keys that are canonical array
/// indices (`0`, `1`, `10`, not `01` or `-1`) come first in ascending numeric
/// order, then every other key in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuMap {
    slots: Vec<MenuSlot>,
}

impl MenuMap {
    /// Parse a YAML menu map.
    pub fn from_yaml(yaml: &str) -> MenuResult<Self> {
        serde_yml::from_str(yaml).map_err(|e| MenuError::Config(e.to_string()))
    }

    pub fn slots(&self) -> &[MenuSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Build the top-level item list from the configured slots.
    ///
    /// `items` is the fetched top level; `collections` are the named store
    /// collections virtual slots may draw children from. A slot naming a
    /// category id that is not among `items` is skipped with a warning.
    pub fn apply(
        &self,
        items: &[MenuNode],
        collections: &HashMap<String, Vec<MenuNode>>,
    ) -> Vec<MenuNode> {
        let mut menu = Vec::with_capacity(self.slots.len());

        for slot in &self.slots {
            let mut node = match &slot.spec {
                SlotSpec::Category { id, name } => {
                    let Some(found) = items.iter().find(|item| &item.id == id) else {
                        warn!(
                            slot = %slot.key,
                            id = %id,
                            "menu slot references unknown category, skipping"
                        );
                        continue;
                    };
                    MenuNode {
                        name: name.clone(),
                        ..found.clone()
                    }
                }
                SlotSpec::Virtual {
                    name,
                    url_path,
                    children_store,
                } => {
                    let children = match children_store {
                        Some(store) => collections.get(store).cloned().unwrap_or_else(|| {
                            warn!(
                                slot = %slot.key,
                                store = %store,
                                "children store not found, using no children"
                            );
                            Vec::new()
                        }),
                        None => Vec::new(),
                    };
                    MenuNode::new(
                        slot.virtual_id(),
                        name.clone(),
                        url_path.clone().unwrap_or_else(|| DEFAULT_URL_PATH.to_string()),
                    )
                    .with_children(children)
                }
            };

            node.children.extend(slot.children.iter().cloned());

            if slot.sort_alphabetically && !node.children.is_empty() {
                node.children = sort_menu_entries(std::mem::take(&mut node.children));
            }

            menu.push(node);
        }

        debug!(slots = self.slots.len(), items = menu.len(), "applied menu map");
        menu
    }
}

/// Slot as written in config. Keys the menu does not use (icons, css
/// classes) are ignored.
#[derive(Deserialize)]
struct SlotConfig {
    #[serde(default)]
    id: Option<CategoryId>,
    name: String,
    #[serde(default)]
    url_path: Option<String>,
    #[serde(rename = "childrenStore", default)]
    children_store: Option<String>,
    #[serde(default)]
    children: Vec<MenuNode>,
    #[serde(rename = "sortAlphabetically", default)]
    sort_alphabetically: bool,
}

impl SlotConfig {
    fn into_slot(self, key: String) -> MenuSlot {
        let spec = match self.id {
            Some(id) => SlotSpec::Category { id, name: self.name },
            None => SlotSpec::Virtual {
                name: self.name,
                url_path: self.url_path,
                children_store: self.children_store,
            },
        };

        MenuSlot {
            key,
            spec,
            children: self.children,
            sort_alphabetically: self.sort_alphabetically,
        }
    }
}

/// Slot keys may be written as strings or bare numbers.
struct SlotKey(String);

/// Numeric value of a key that is a canonical array index.
fn array_index(key: &str) -> Option<u32> {
    let n: u32 = key.parse().ok()?;
    (n != u32::MAX && n.to_string() == key).then_some(n)
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CategoryId::deserialize(deserializer).map(|id| Self(id.as_str().to_string()))
    }
}

impl<'de> Deserialize<'de> for MenuMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MenuMapVisitor;

        impl<'de> Visitor<'de> for MenuMapVisitor {
            type Value = MenuMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of menu slot keys to slot definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<MenuMap, A::Error> {
                let mut slots = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, slot)) = access.next_entry::<SlotKey, SlotConfig>()? {
                    slots.push(slot.into_slot(key.0));
                }
                slots.sort_by_key(|slot: &MenuSlot| {
                    array_index(&slot.key).map_or((1, 0), |n| (0, n))
                });
                Ok(MenuMap { slots })
            }
        }

        deserializer.deserialize_map(MenuMapVisitor)
    }
}
