//! Shared types passed from the scanner to the renderer.
//!
//! [`CategoryIndex`] is also what the `scan` command prints as JSON, so the
//! types derive `Serialize`.

use crate::metadata::ModuleMeta;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One HTML module discovered in a category directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRecord {
    /// `<title>` text, or `"Untitled"`.
    pub title: String,
    /// `<meta name="description">` content, or the generic fallback.
    pub description: String,
    /// `<!-- order: N -->` value, or 9999 so unordered modules sort last.
    pub order: u64,
    /// `<!-- icon: X -->` value when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Path the module was read from.
    pub source_path: String,
    /// Path relative to the scan root, always `/`-separated.
    pub relative_link: String,
}

impl ModuleRecord {
    pub fn new(meta: ModuleMeta, source_path: String, relative_link: String) -> Self {
        Self {
            title: meta.title,
            description: meta.description,
            order: meta.order,
            icon: meta.icon,
            source_path,
            relative_link,
        }
    }

    /// Page order: ascending `order`, ties broken by `title`.
    pub fn page_order(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.title.cmp(&other.title))
    }
}

/// Category name (uppercased directory name) → its modules.
///
/// `BTreeMap` keeps categories in lexicographic order, which is also the
/// order they are rendered in.
pub type CategoryIndex = BTreeMap<String, Vec<ModuleRecord>>;

/// Modules of one category in page order.
///
/// The sort is stable: modules with equal order and title keep scan order.
pub fn sorted_modules(modules: &[ModuleRecord]) -> Vec<&ModuleRecord> {
    let mut sorted: Vec<&ModuleRecord> = modules.iter().collect();
    sorted.sort_by(|a, b| a.page_order(b));
    sorted
}
