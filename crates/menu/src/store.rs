//! Menu store: the current menu, cache bookkeeping and the collections
//! virtual menu slots may draw children from.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::menu::MenuMap;
use crate::models::{DataMenu, MenuNode, MenuPayload};

/// Default cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default API locale.
pub const DEFAULT_LOCALE: &str = "de";

/// Construction-time store settings.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Stamp created/expiry times on commit.
    pub cacheable: bool,
    /// Menu-specific TTL; falls back to `cache_ttl_secs` when unset.
    pub menu_ttl_secs: Option<u64>,
    pub cache_ttl_secs: u64,
    pub api_locale: String,
    /// Slot overrides applied on every commit.
    pub menu_map: Option<MenuMap>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            cacheable: true,
            menu_ttl_secs: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            api_locale: DEFAULT_LOCALE.to_string(),
            menu_map: None,
        }
    }
}

/// Holds exactly one menu until it is cleared or replaced.
#[derive(Debug, Clone)]
pub struct MenuStore {
    data_menu: DataMenu,
    /// Mapped items of the last commit, before slot overrides.
    menu_items: Vec<MenuNode>,
    cacheable: bool,
    menu_ttl_secs: Option<u64>,
    cache_ttl_secs: u64,
    api_locale: String,
    menu_map: Option<MenuMap>,
    collections: HashMap<String, Vec<MenuNode>>,
}

impl MenuStore {
    pub fn new(options: StoreOptions) -> Self {
        Self {
            data_menu: DataMenu::default(),
            menu_items: Vec::new(),
            cacheable: options.cacheable,
            menu_ttl_secs: options.menu_ttl_secs,
            cache_ttl_secs: options.cache_ttl_secs,
            api_locale: options.api_locale,
            menu_map: options.menu_map,
            collections: HashMap::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Commit a freshly mapped menu, stamping cache times with the current
    /// clock.
    pub fn set_data_menu(&mut self, payload: MenuPayload) {
        self.set_data_menu_at(payload, chrono::Utc::now().timestamp());
    }

    /// Commit a freshly mapped menu as of `now` (unix seconds).
    ///
    /// With a menu map configured, the top level is rebuilt from its slots.
    /// Locale is always stamped; created/expiry times only when cacheable.
    pub fn set_data_menu_at(&mut self, payload: MenuPayload, now: i64) {
        self.data_menu = payload.data;
        self.menu_items = self.data_menu.items().to_vec();

        if let Some(map) = &self.menu_map {
            let items = map.apply(&self.menu_items, &self.collections);
            self.data_menu.result.get_or_insert_with(Default::default).items = items;
        }

        self.data_menu.locale = Some(self.api_locale.clone());

        if self.cacheable {
            let ttl = i64::try_from(self.effective_ttl_secs()).unwrap_or(i64::MAX);
            self.data_menu.created_at_unixtime = Some(now);
            self.data_menu.expires_at_unixtime = Some(now.saturating_add(ttl));
        } else {
            self.data_menu.created_at_unixtime = None;
            self.data_menu.expires_at_unixtime = None;
        }

        info!(
            items = self.data_menu.items().len(),
            locale = %self.api_locale,
            expires_at = ?self.data_menu.expires_at_unixtime,
            "menu committed"
        );
    }

    /// Reset the menu to its empty state.
    pub fn clear_data_menu(&mut self) {
        self.data_menu = DataMenu::default();
        debug!("menu cleared");
    }

    /// Register a named node collection for virtual slots (`childrenStore`).
    pub fn set_collection(&mut self, name: impl Into<String>, nodes: Vec<MenuNode>) {
        self.collections.insert(name.into(), nodes);
    }

    pub fn set_api_locale(&mut self, locale: impl Into<String>) {
        self.api_locale = locale.into();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The full menu; serializes to `{}` before the first commit.
    pub fn data_menu(&self) -> &DataMenu {
        &self.data_menu
    }

    /// Top-level `items` field of the menu envelope.
    ///
    /// Commits store items under `result.items`, so this is `None` for menus
    /// built by the fetch action; only payloads carrying their own top-level
    /// `items` field populate it.
    pub fn data_menu_items(&self) -> Option<&Value> {
        self.data_menu.extra.get("items")
    }

    /// Top-level `stats` field of the menu envelope; see
    /// [`data_menu_items`](Self::data_menu_items).
    pub fn data_menu_stats(&self) -> Option<&Value> {
        self.data_menu.extra.get("stats")
    }

    /// Mapped items of the last commit, before slot overrides.
    pub fn menu_items(&self) -> &[MenuNode] {
        &self.menu_items
    }

    pub fn collection(&self, name: &str) -> Option<&[MenuNode]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// TTL used for expiry stamps.
    pub fn effective_ttl_secs(&self) -> u64 {
        self.menu_ttl_secs.unwrap_or(self.cache_ttl_secs)
    }

    /// Whether the store holds a menu still valid at `now` (unix seconds).
    pub fn is_fresh(&self, now: i64) -> bool {
        !self.data_menu.is_expired(now)
    }
}

impl Default for MenuStore {
    fn default() -> Self {
        Self::new(StoreOptions::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn payload() -> MenuPayload {
        MenuPayload::from_items(vec![
            MenuNode::new("5", "Footwear", "footwear/")
                .with_children(vec![MenuNode::new("51", "Boots", "footwear/boots/")]),
            MenuNode::new("6", "Bags", "bags/"),
        ])
    }

    fn with_map(yaml: &str) -> MenuStore {
        MenuStore::new(StoreOptions {
            menu_map: Some(MenuMap::from_yaml(yaml).unwrap()),
            ..StoreOptions::default()
        })
    }

    #[test]
    fn empty_before_first_commit() {
        let store = MenuStore::default();
        assert_eq!(serde_json::to_value(store.data_menu()).unwrap(), serde_json::json!({}));
        assert!(store.data_menu_items().is_none());
        assert!(store.data_menu_stats().is_none());
        assert!(!store.is_fresh(0));
    }

    #[test]
    fn commit_without_map_keeps_items() {
        let mut store = MenuStore::default();
        store.set_data_menu_at(payload(), 1_000);

        assert_eq!(store.data_menu().items().len(), 2);
        assert_eq!(store.data_menu().locale.as_deref(), Some(DEFAULT_LOCALE));
        assert_eq!(store.menu_items().len(), 2);
    }

    #[test]
    fn cache_stamps_use_effective_ttl() {
        for (menu_ttl, expected) in [
            (None, DEFAULT_CACHE_TTL_SECS),
            (Some(0), 0),
            (Some(3_600), 3_600),
        ] {
            let mut store = MenuStore::new(StoreOptions {
                menu_ttl_secs: menu_ttl,
                ..StoreOptions::default()
            });
            store.set_data_menu_at(payload(), 1_700_000_000);

            let menu = store.data_menu();
            assert_eq!(menu.created_at_unixtime, Some(1_700_000_000));
            assert_eq!(
                menu.expires_at_unixtime,
                Some(1_700_000_000 + i64::try_from(expected).unwrap())
            );
        }
    }

    #[test]
    fn not_cacheable_means_no_stamps() {
        let mut store = MenuStore::new(StoreOptions {
            cacheable: false,
            ..StoreOptions::default()
        });
        store.set_data_menu_at(payload(), 1_000);

        assert!(store.data_menu().created_at_unixtime.is_none());
        assert!(store.data_menu().expires_at_unixtime.is_none());
        assert!(!store.is_fresh(1_000));
    }

    #[test]
    fn freshness_follows_expiry() {
        let mut store = MenuStore::new(StoreOptions {
            cache_ttl_secs: 60,
            ..StoreOptions::default()
        });
        store.set_data_menu_at(payload(), 1_000);

        assert!(store.is_fresh(1_059));
        assert!(!store.is_fresh(1_060));
    }

    #[test]
    fn menu_map_rewrites_top_level() {
        let mut store = with_map("shoes:\n  id: 5\n  name: Shoes\nbrands:\n  name: Brands\n  childrenStore: brandList\n");
        store.set_collection(
            "brandList",
            vec![MenuNode::new("a", "A", "a/"), MenuNode::new("b", "B", "b/")],
        );
        store.set_data_menu_at(payload(), 1_000);

        let items = store.data_menu().items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "5");
        assert_eq!(items[0].name, "Shoes");
        assert_eq!(items[0].children.len(), 1);
        assert_eq!(items[1].id.as_str(), "virtualbrands");
        assert_eq!(items[1].children, store.collection("brandList").unwrap());

        // the pre-override copy is untouched
        assert_eq!(store.menu_items()[0].name, "Footwear");
    }

    #[test]
    fn locale_follows_store_state() {
        let mut store = MenuStore::default();
        store.set_api_locale("en");
        store.set_data_menu_at(payload(), 1_000);
        assert_eq!(store.data_menu().locale.as_deref(), Some("en"));
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut store = MenuStore::default();
        store.set_data_menu_at(payload(), 1_000);
        store.clear_data_menu();
        assert_eq!(store.data_menu(), &DataMenu::default());
    }

    #[test]
    fn items_and_stats_read_top_level_fields_only() {
        let mut store = MenuStore::default();
        store.set_data_menu_at(payload(), 1_000);
        assert!(store.data_menu_items().is_none());
        assert!(store.data_menu_stats().is_none());

        let mut with_stats = payload();
        with_stats
            .data
            .extra
            .insert("stats".to_string(), serde_json::json!({ "total": 2 }));
        store.set_data_menu_at(with_stats, 1_000);
        assert_eq!(store.data_menu_stats().unwrap()["total"], 2);
    }
}
