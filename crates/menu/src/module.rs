//! The `modApiMenu` store module: fetch action plus named getters over a
//! shared [`MenuStore`].

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiCall, ApiDispatcher};
use crate::error::{ApiError, MenuError, MenuResult};
use crate::menu::map_categories;
use crate::models::{CategoryListBody, DataMenu, MenuPayload};
use crate::store::{MenuStore, StoreOptions};

/// Namespace the module is registered under.
pub const NAMESPACE: &str = "modApiMenu";

/// Category listing: one page of 100 with SEO url associations.
pub const CATEGORY_ENDPOINT: &str =
    "/sales-channel-api/v1/category?limit=100&associations[seoUrls][]";

/// Value the fetch action resolves with.
pub const FETCH_OK: &str = "OK";

/// Getter names accepted by [`MenuModule::getter`].
pub const GETTERS: &[&str] = &["getDataMenu", "getDataMenuItems", "getDataMenuStats"];

/// Menu store module.
///
/// The store lock is only held for synchronous reads and commits, never
/// across the API await. Overlapping fetches each commit; the last one wins.
pub struct MenuModule {
    dispatcher: Arc<dyn ApiDispatcher>,
    store: RwLock<MenuStore>,
}

impl MenuModule {
    pub fn new(dispatcher: Arc<dyn ApiDispatcher>, options: StoreOptions) -> Self {
        Self {
            dispatcher,
            store: RwLock::new(MenuStore::new(options)),
        }
    }

    /// Fetch categories, map them into a menu and commit it.
    ///
    /// On failure the store is left unchanged and the error display is the
    /// fixed signal `"API request failed!"`; the cause is logged.
    pub async fn sw_get_menu(&self) -> MenuResult<&'static str> {
        let categories = self.fetch_categories().await.map_err(|e| {
            warn!(error = %e, "API get request failed");
            MenuError::ApiRequest(e)
        })?;

        let items = map_categories(categories.data);
        self.store.write().set_data_menu(MenuPayload::from_items(items));

        Ok(FETCH_OK)
    }

    /// Fetch only when the store has no fresh menu.
    ///
    /// Returns whether a fetch happened.
    pub async fn ensure_menu(&self) -> MenuResult<bool> {
        let now = chrono::Utc::now().timestamp();
        if self.store.read().is_fresh(now) {
            debug!("menu cache fresh, skipping fetch");
            return Ok(false);
        }

        self.sw_get_menu().await?;
        Ok(true)
    }

    async fn fetch_categories(&self) -> Result<CategoryListBody, ApiError> {
        let response = self.dispatcher.call(ApiCall::sw_get(CATEGORY_ENDPOINT)).await?;
        Ok(serde_json::from_value(response.data)?)
    }

    // -------------------------------------------------------------------------
    // Getters
    // -------------------------------------------------------------------------

    /// Snapshot of the full menu (`getDataMenu`).
    pub fn data_menu(&self) -> DataMenu {
        self.store.read().data_menu().clone()
    }

    /// `getDataMenuItems`.
    pub fn data_menu_items(&self) -> Option<Value> {
        self.store.read().data_menu_items().cloned()
    }

    /// `getDataMenuStats`.
    pub fn data_menu_stats(&self) -> Option<Value> {
        self.store.read().data_menu_stats().cloned()
    }

    /// Resolve a getter by its registered name. Absent values map to
    /// `Value::Null`; unknown names to `None`.
    pub fn getter(&self, name: &str) -> Option<Value> {
        match name {
            "getDataMenu" => Some(serde_json::to_value(self.data_menu()).unwrap_or(Value::Null)),
            "getDataMenuItems" => Some(self.data_menu_items().unwrap_or(Value::Null)),
            "getDataMenuStats" => Some(self.data_menu_stats().unwrap_or(Value::Null)),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Store access
    // -------------------------------------------------------------------------

    /// Reset the menu (`clearDataMenu`).
    pub fn clear_data_menu(&self) {
        self.store.write().clear_data_menu();
    }

    /// Run `f` with exclusive access to the store, e.g. to register
    /// collections or change the locale.
    pub fn with_store_mut<R>(&self, f: impl FnOnce(&mut MenuStore) -> R) -> R {
        f(&mut self.store.write())
    }
}

impl std::fmt::Debug for MenuModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuModule").field("namespace", &NAMESPACE).finish()
    }
}
