//! Storefront menu test utilities.
//!
//! Fixture builders producing sales-channel API JSON, so tests exercise the
//! same deserialization path as real responses.

use serde_json::{Value as JsonValue, json};

/// Create a root category with default values.
pub fn test_category(id: &str, name: &str) -> TestCategory {
    TestCategory {
        id: id.to_string(),
        parent_id: None,
        name: name.to_string(),
        active: true,
        level: 1,
        seo_paths: Vec::new(),
    }
}

/// A category fixture builder.
#[derive(Debug, Clone)]
pub struct TestCategory {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub active: bool,
    pub level: i32,
    pub seo_paths: Vec<String>,
}

impl TestCategory {
    /// Place under a parent, one level below it.
    pub fn child_of(mut self, parent: &TestCategory) -> Self {
        self.parent_id = Some(parent.id.clone());
        self.level = parent.level + 1;
        self
    }

    /// Set the parent id directly (may reference a missing category).
    pub fn with_parent_id(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }

    /// Add an SEO url; the first one added is the canonical path.
    pub fn with_seo_path(mut self, path: &str) -> Self {
        self.seo_paths.push(path.to_string());
        self
    }

    /// Set as inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Render as a sales-channel API category object.
    pub fn to_json(&self) -> JsonValue {
        let seo_urls: Vec<JsonValue> = self
            .seo_paths
            .iter()
            .enumerate()
            .map(|(i, path)| json!({ "seoPathInfo": path, "isCanonical": i == 0 }))
            .collect();

        json!({
            "_uniqueIdentifier": self.id,
            "id": self.id,
            "parentId": self.parent_id,
            "name": self.name,
            "active": self.active,
            "level": self.level,
            "seoUrls": seo_urls,
            "apiAlias": "category",
        })
    }
}

/// Wrap categories in the listing body: `{ "total": n, "data": [...] }`.
pub fn category_list_body(categories: &[TestCategory]) -> JsonValue {
    json!({
        "total": categories.len(),
        "data": categories.iter().map(TestCategory::to_json).collect::<Vec<_>>(),
    })
}

/// A small two-level catalogue used across tests.
///
/// ```text
/// Women (w)        Men (m)
/// ├── Dresses (wd) └── Shirts (ms)
/// └── Shoes (ws)
/// ```
pub fn sample_catalogue() -> Vec<TestCategory> {
    let women = test_category("w", "Women").with_seo_path("women/");
    let men = test_category("m", "Men").with_seo_path("men/");
    let dresses = test_category("wd", "Dresses")
        .child_of(&women)
        .with_seo_path("women/dresses/");
    let shoes = test_category("ws", "Shoes").child_of(&women);
    let shirts = test_category("ms", "Shirts")
        .child_of(&men)
        .with_seo_path("men/shirts/");

    vec![women, dresses, men, shoes, shirts]
}
