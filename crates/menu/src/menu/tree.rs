//! Tree helpers: turn a flat parent-referenced list into nested menu nodes,
//! and order sibling entries by name.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::models::{CategoryId, CategoryRecord, MenuNode, ParentRef};

/// Build a nested tree from flat records.
///
/// - Records with [`ParentRef::Root`] become top-level nodes.
/// - Siblings keep their input order.
/// - When two records share an id, the later one wins: its data and its
///   position are used and the earlier record is discarded.
/// - Records whose parent chain never reaches the root (unknown parent ids,
///   cycles) are dropped.
pub fn unflatten(records: Vec<CategoryRecord>) -> Vec<MenuNode> {
    let total = records.len();

    let mut last_index: HashMap<CategoryId, usize> = HashMap::with_capacity(total);
    for (idx, record) in records.iter().enumerate() {
        last_index.insert(record.id.clone(), idx);
    }

    let mut roots = Vec::new();
    let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();
    let mut nodes: Vec<Option<MenuNode>> = Vec::with_capacity(total);

    for (idx, record) in records.into_iter().enumerate() {
        if last_index.get(&record.id) != Some(&idx) {
            nodes.push(None);
            continue;
        }

        match &record.parent {
            ParentRef::Root => roots.push(idx),
            ParentRef::Category(parent) => children.entry(parent.clone()).or_default().push(idx),
        }
        nodes.push(Some(MenuNode::from(record)));
    }

    let tree: Vec<MenuNode> = roots
        .into_iter()
        .filter_map(|idx| attach(idx, &mut nodes, &mut children))
        .collect();

    let unreachable = nodes.iter().flatten().count();
    if unreachable > 0 {
        debug!(unreachable, "dropped categories without a reachable parent");
    }

    debug!(records = total, roots = tree.len(), "built menu tree");
    tree
}

/// Take node `idx` out of the arena and attach its children recursively.
///
/// Each node and each child list is taken at most once, so malformed input
/// (cycles, self-parenting) cannot loop.
fn attach(
    idx: usize,
    nodes: &mut [Option<MenuNode>],
    children: &mut HashMap<CategoryId, Vec<usize>>,
) -> Option<MenuNode> {
    let mut node = nodes.get_mut(idx)?.take()?;

    if let Some(child_indexes) = children.remove(&node.id) {
        node.children = child_indexes
            .into_iter()
            .filter_map(|child| attach(child, nodes, children))
            .collect();
    }

    Some(node)
}

/// Sort entries alphabetically by name.
///
/// Comparison is case-insensitive with a case-sensitive tie-break, and the
/// sort is stable, so the result is deterministic for any input.
pub fn sort_menu_entries(mut entries: Vec<MenuNode>) -> Vec<MenuNode> {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
    entries
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn record(id: &str, parent: Option<&str>, name: &str) -> CategoryRecord {
        CategoryRecord {
            id: id.into(),
            parent: parent.map(CategoryId::from).into(),
            name: name.to_string(),
            url_path: "/".to_string(),
            level: 0,
            active: true,
        }
    }

    fn names(nodes: &[MenuNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn empty_input_gives_empty_tree() {
        assert!(unflatten(Vec::new()).is_empty());
    }

    #[test]
    fn children_land_under_parent_in_input_order() {
        let tree = unflatten(vec![
            record("1", None, "Women"),
            record("2", Some("1"), "Dresses"),
            record("3", None, "Men"),
            record("4", Some("1"), "Shoes"),
            record("5", Some("4"), "Boots"),
            record("6", Some("3"), "Shirts"),
        ]);

        assert_eq!(names(&tree), ["Women", "Men"]);
        assert_eq!(names(&tree[0].children), ["Dresses", "Shoes"]);
        assert_eq!(names(&tree[0].children[1].children), ["Boots"]);
        assert_eq!(names(&tree[1].children), ["Shirts"]);
    }

    #[test]
    fn child_listed_before_parent_is_still_attached() {
        let tree = unflatten(vec![record("2", Some("1"), "Dresses"), record("1", None, "Women")]);
        assert_eq!(tree.len(), 1);
        assert_eq!(names(&tree[0].children), ["Dresses"]);
    }

    #[test]
    fn orphans_are_dropped() {
        let tree = unflatten(vec![
            record("1", None, "Women"),
            record("2", Some("missing"), "Lost"),
        ]);
        assert_eq!(names(&tree), ["Women"]);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn duplicate_id_last_write_wins() {
        let tree = unflatten(vec![
            record("1", None, "Women"),
            record("2", None, "Men"),
            record("9", None, "Old"),
            record("3", None, "Kids"),
            record("9", Some("2"), "New"),
        ]);

        assert_eq!(names(&tree), ["Women", "Men", "Kids"]);
        assert_eq!(names(&tree[1].children), ["New"]);
    }

    #[test]
    fn cycles_do_not_hang() {
        let tree = unflatten(vec![
            record("1", Some("2"), "A"),
            record("2", Some("1"), "B"),
            record("3", Some("3"), "Self"),
            record("4", None, "Root"),
        ]);
        assert_eq!(names(&tree), ["Root"]);
    }

    #[test]
    fn sort_by_name() {
        let sorted = sort_menu_entries(vec![
            MenuNode::new("1", "Zed", "/"),
            MenuNode::new("2", "Amy", "/"),
        ]);
        assert_eq!(names(&sorted), ["Amy", "Zed"]);
    }

    #[test]
    fn sort_ignores_case_then_breaks_ties() {
        let sorted = sort_menu_entries(vec![
            MenuNode::new("1", "bags", "/"),
            MenuNode::new("2", "Bags", "/"),
            MenuNode::new("3", "Accessories", "/"),
        ]);
        assert_eq!(names(&sorted), ["Accessories", "Bags", "bags"]);
    }

    #[test]
    fn sort_is_stable_for_equal_names() {
        let sorted = sort_menu_entries(vec![
            MenuNode::new("1", "Sale", "/a"),
            MenuNode::new("2", "Sale", "/b"),
        ]);
        assert_eq!(sorted[0].id.as_str(), "1");
        assert_eq!(sorted[1].id.as_str(), "2");
    }
}
