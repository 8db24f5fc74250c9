//! Storefront menu library.
//!
//! Fetches the category tree from the Shopware sales-channel API, nests it
//! into a navigation menu, applies configured slot overrides and keeps the
//! result with cache stamps. The `storefront-menu` binary is a thin CLI over
//! [`MenuModule`].

pub mod api;
pub mod config;
pub mod error;
pub mod menu;
pub mod models;
pub mod module;
pub mod store;

pub use api::{ApiCall, ApiDispatcher, ApiResponse, HttpDispatcher};
pub use config::Config;
pub use error::{ApiError, MenuError, MenuResult};
pub use module::MenuModule;
pub use store::{MenuStore, StoreOptions};
