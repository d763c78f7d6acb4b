//! Directory scanning.
//!
//! Stage 1 of the pipeline. Walks the immediate subdirectories of the scan
//! root and turns each one holding module files into a category.
//!
//! ## Directory Structure
//!
//! ```text
//! root/
//! ├── hub.toml                 # Optional config (not scanned)
//! ├── index.html               # Generated output (not scanned)
//! ├── algorithms/              # Category "ALGORITHMS"
//! │   ├── heap.html
//! │   ├── k-means.html
//! │   └── index.html           # Reserved name, skipped
//! ├── llm/                     # Category "LLM"
//! │   ├── rag.html
//! │   └── notes/               # Nested directories are not visited
//! ├── drafts/                  # No module files: dropped
//! └── assets/                  # Denylisted: never a category
//! ```
//!
//! ## Rules
//!
//! - Only one level is traversed: `root/<category>/<file>`.
//! - Directory names in `ignore_dirs` are skipped; everything else is a
//!   candidate, hidden directories included.
//! - Category name = directory name uppercased. Directories whose names
//!   collide once uppercased share one category.
//! - Module files are regular files ending in `.{extension}`, minus the
//!   reserved names. Unreadable files stay in the index with default metadata.
//! - Entries are visited in file-name order so repeated scans agree.

use crate::config::HubConfig;
use crate::metadata;
use crate::types::{CategoryIndex, ModuleRecord};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Scan root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub fn scan(root: &Path, config: &HubConfig) -> Result<CategoryIndex, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut index = CategoryIndex::new();

    for dir in category_dirs(root, config)? {
        let modules = scan_category(&dir, root, config)?;
        if modules.is_empty() {
            debug!(dir = %dir.display(), "no module files, dropping category");
            continue;
        }
        let name = category_name(&dir);
        index.entry(name).or_default().extend(modules);
    }

    Ok(index)
}

/// Immediate subdirectories of `root` that may become categories.
///
/// `Path::is_dir` follows symlinks, so linked directories count and broken
/// links are skipped.
fn category_dirs(root: &Path, config: &HubConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if config.is_ignored_dir(&name) {
            debug!(dir = %name, "ignored directory");
            continue;
        }
        dirs.push(path.to_path_buf());
    }
    Ok(dirs)
}

/// Read every module file directly inside `dir`.
fn scan_category(
    dir: &Path,
    root: &Path,
    config: &HubConfig,
) -> Result<Vec<ModuleRecord>, ScanError> {
    let mut modules = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !config.is_module_file(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let meta = metadata::read_module(path);
        modules.push(ModuleRecord::new(
            meta,
            path.to_string_lossy().to_string(),
            relative_link(path, root),
        ));
    }
    Ok(modules)
}

fn category_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

/// Path of `path` relative to `root`, joined with `/` on every platform.
fn relative_link(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
