//! Data models for categories and the menu tree.

pub mod category;
pub mod menu;

pub use category::{
    CategoryId, CategoryListBody, CategoryRecord, DEFAULT_URL_PATH, ParentRef, RawCategory, SeoUrl,
};
pub use menu::{DataMenu, MenuNode, MenuPayload, MenuResult};
