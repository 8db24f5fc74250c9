//! Map raw API categories into the menu tree.

use tracing::debug;

use super::tree::unflatten;
use crate::models::{CategoryRecord, MenuNode, RawCategory};

/// Normalize raw categories and build the top-level node list.
///
/// Null parents become the root sentinel and the first SEO url becomes the
/// node path (`/` when there is none). Duplicate ids are not validated; see
/// [`unflatten`] for how they resolve.
pub fn map_categories(categories: Vec<RawCategory>) -> Vec<MenuNode> {
    let records: Vec<CategoryRecord> = categories.into_iter().map(CategoryRecord::from).collect();
    debug!(count = records.len(), "mapped categories");
    unflatten(records)
}
