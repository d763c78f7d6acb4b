//! Shared test utilities for the hub-index test suite.
//!
//! Builds throwaway content trees and provides lookup helpers over a
//! [`CategoryIndex`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_tree(&[
//!     ("foo/bar.html", "<title>Bar Tool</title>"),
//!     ("foo/baz.html", ""),
//! ]);
//! let index = scan(tmp.path(), &HubConfig::default()).unwrap();
//!
//! let foo = find_category(&index, "FOO");
//! assert_eq!(find_module(foo, "foo/bar.html").title, "Bar Tool");
//! ```

use std::fs;
use tempfile::TempDir;

use crate::types::{CategoryIndex, ModuleRecord};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding the given `(relative path, content)` files.
///
/// Parent directories are created as needed.
pub fn setup_tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
    tmp
}

/// A record built in memory, for renderer tests that skip the filesystem.
pub fn module(title: &str, order: u64, link: &str) -> ModuleRecord {
    ModuleRecord {
        title: title.to_string(),
        description: crate::metadata::DEFAULT_DESCRIPTION.to_string(),
        order,
        icon: None,
        source_path: link.to_string(),
        relative_link: link.to_string(),
    }
}

// =========================================================================
// Index lookups — panics with a clear message on miss
// =========================================================================

/// Find a category by name. Panics if not found.
pub fn find_category<'a>(index: &'a CategoryIndex, name: &str) -> &'a [ModuleRecord] {
    index.get(name).map(Vec::as_slice).unwrap_or_else(|| {
        let names = category_names(index);
        panic!("category '{name}' not found. Available: {names:?}")
    })
}

/// Find a module by relative link. Panics if not found.
pub fn find_module<'a>(modules: &'a [ModuleRecord], link: &str) -> &'a ModuleRecord {
    modules
        .iter()
        .find(|m| m.relative_link == link)
        .unwrap_or_else(|| {
            let links = module_links(modules);
            panic!("module '{link}' not found. Available: {links:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All category names in index order.
pub fn category_names(index: &CategoryIndex) -> Vec<&str> {
    index.keys().map(String::as_str).collect()
}

/// All relative links in slice order.
pub fn module_links(modules: &[ModuleRecord]) -> Vec<&str> {
    modules.iter().map(|m| m.relative_link.as_str()).collect()
}

/// Positions of each needle in `haystack`, panicking on a miss.
///
/// Used to assert rendering order without parsing the document.
pub fn positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
    needles
        .iter()
        .map(|needle| {
            haystack
                .find(needle)
                .unwrap_or_else(|| panic!("'{needle}' not found in output"))
        })
        .collect()
}

/// Assert that `needles` appear in `haystack` in the given order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let found = positions(haystack, needles);
    let mut sorted = found.clone();
    sorted.sort_unstable();
    assert_eq!(found, sorted, "expected {needles:?} in this order");
}
