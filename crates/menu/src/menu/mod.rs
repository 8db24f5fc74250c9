//! Menu building: category mapping, tree helpers and config-driven slot
//! overrides.
//!
//! Flow on every fetch:
//! - [`map_categories`] normalizes the API records and nests them
//! - [`MenuMap::apply`] rewrites the top level from configured slots
//! - the store stamps locale and cache times

pub mod mapping;
pub mod slots;
pub mod tree;

pub use mapping::map_categories;
pub use slots::{MenuMap, MenuSlot, SlotSpec};
pub use tree::{sort_menu_entries, unflatten};
