//! # Hub Index
//!
//! Builds a static landing page for a folder of standalone HTML modules.
//! Subdirectories become categories, each HTML file becomes a card, and the
//! cards are described by markers embedded in the files themselves.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      root/*/  →  CategoryIndex   (filesystem → structured data)
//! 2. Generate  index    →  root/index.html (one self-contained page)
//! ```
//!
//! Each run recomputes everything from disk; nothing is cached between runs.
//! Rendering is a pure function of the index, so re-running against an
//! unchanged tree rewrites a byte-identical page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Per-file marker extraction: `<title>`, description meta, `order`/`icon` comments |
//! | [`scan`] | Stage 1: walks category directories and builds the [`types::CategoryIndex`] |
//! | [`generate`] | Stage 2: renders the landing page with Maud and writes it |
//! | [`config`] | `hub.toml` loading, merging over stock defaults, validation |
//! | [`types`] | `ModuleRecord`, `CategoryIndex`, page ordering |
//! | [`output`] | CLI output formatting for the scan inventory |
//!
//! # Design Decisions
//!
//! ## Markers Over Front-Matter
//!
//! Module pages are standalone documents that must keep working when opened
//! directly, so their metadata lives in tags a browser already ignores or
//! uses: `<title>`, `<meta name="description">`, and HTML comments for order
//! and icon. Extraction is a tolerant pattern scan; a file with no markers
//! still gets a card.
//!
//! ## Explicit Configuration
//!
//! The exclusion lists, output filename, page texts and the keyword → icon
//! table are fields of [`config::HubConfig`], passed to the scanner and the
//! renderer. Tests swap in their own values without touching globals.
//!
//! ## Fail Soft Per File, Hard on Output
//!
//! A module that cannot be read is logged and listed with default metadata.
//! Failing to write the page is the only fatal runtime error.

pub mod config;
pub mod generate;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
