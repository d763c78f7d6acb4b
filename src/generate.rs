//! Landing page generation.
//!
//! Stage 2 of the pipeline. Takes the [`CategoryIndex`] produced by the
//! scanner and renders the single aggregated `index.html`.
//!
//! ## Page Layout
//!
//! ```text
//! header          site title, tagline, optional GitHub stars badge
//! main
//!   section       one per category, in name order
//!     h2          CATEGORY NAME  [n Modules]
//!     grid        one card per module: icon, title, description, link
//!   (or a "No modules found" block when the index is empty)
//! footer
//! ```
//!
//! ## Card Icons
//!
//! First available wins:
//!
//! 1. `<!-- icon: X -->` from the module file
//! 2. the first `[[icons.rules]]` keyword found in the title
//! 3. `icons.default`
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) with the stylesheet embedded at
//! compile time from `static/style.css`. Rendering is a pure function of the
//! index and config, so unchanged input yields byte-identical output.

use crate::config::{HubConfig, IconConfig, SiteConfig};
use crate::metadata::DEFAULT_DESCRIPTION;
use crate::output;
use crate::scan::{self, ScanError};
use crate::types::{CategoryIndex, ModuleRecord, sorted_modules};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

const CSS: &str = include_str!("../static/style.css");

/// Scan `root`, render the landing page, and write it to `root/output_file`.
///
/// Any existing file at that path is overwritten. Returns the written path.
pub fn build(root: &Path, config: &HubConfig) -> Result<PathBuf, GenerateError> {
    println!("==> Scanning {}", root.display());
    let index = scan::scan(root, config)?;
    output::print_scan_output(&index);

    let output_path = root.join(&config.output_file);
    println!("==> Generating {}", config.output_file);
    write_index(&index, config, &output_path)?;

    println!("==> Generated {}", output_path.display());
    Ok(output_path)
}

/// Render the index and write it to `path` in one call.
///
/// No temp file or rename: a crash mid-write can leave a truncated page.
pub fn write_index(
    index: &CategoryIndex,
    config: &HubConfig,
    path: &Path,
) -> Result<(), GenerateError> {
    fs::write(path, render_index(index, config).into_string())?;
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &SiteConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (site.title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the page header with title, tagline and repository badge
fn site_header(site: &SiteConfig) -> Markup {
    html! {
        header {
            h1 { (site.title) }
            @if !site.tagline.is_empty() {
                p { (site.tagline) }
            }
            @if let Some(repo) = site.repository.as_deref().filter(|r| !r.is_empty()) {
                a.github-badge href={ "https://github.com/" (repo) } target="_blank" rel="noopener noreferrer" {
                    img src={ "https://img.shields.io/github/stars/" (repo) } alt="GitHub Repo stars";
                }
            }
        }
    }
}

/// Renders the placeholder shown when no category has any module
fn empty_state() -> Markup {
    html! {
        div.empty-state {
            h2 { "No modules found" }
            p { "Add folders with HTML files to get started." }
        }
    }
}

/// Renders one category: heading with count badge, then the card grid
fn category_section(name: &str, modules: &[ModuleRecord], config: &HubConfig) -> Markup {
    html! {
        section.category-section {
            h2.category-title {
                (name)
                " "
                span.category-badge { (modules.len()) " " (config.cards.count_label) }
            }
            div.modules-grid {
                @for module in sorted_modules(modules) {
                    (module_card(module, config))
                }
            }
        }
    }
}

/// Renders a single module card
fn module_card(module: &ModuleRecord, config: &HubConfig) -> Markup {
    let description = if module.description == DEFAULT_DESCRIPTION {
        config.cards.fallback_description.as_str()
    } else {
        module.description.as_str()
    };

    html! {
        a.card href=(module.relative_link) {
            div.card-icon { (resolve_icon(module, &config.icons)) }
            h3 { (module.title) }
            p { (description) }
            div.card-footer {
                span { (config.cards.link_label) " \u{2192}" }
            }
        }
    }
}

/// Pick the card icon: explicit icon, then keyword rule, then default.
pub fn resolve_icon<'a>(module: &'a ModuleRecord, icons: &'a IconConfig) -> &'a str {
    module
        .icon
        .as_deref()
        .filter(|icon| !icon.is_empty())
        .or_else(|| icons.lookup(&module.title))
        .unwrap_or(&icons.default)
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the landing page.
pub fn render_index(index: &CategoryIndex, config: &HubConfig) -> Markup {
    let categories: Vec<(&String, &Vec<ModuleRecord>)> = index
        .iter()
        .filter(|(_, modules)| !modules.is_empty())
        .collect();

    let content = html! {
        (site_header(&config.site))
        main {
            @if categories.is_empty() {
                (empty_state())
            } @else {
                @for (name, modules) in &categories {
                    (category_section(name, modules, config))
                }
            }
        }
        footer {
            p { (config.site.footer) }
        }
    };

    base_document(&config.site, content)
}

// ============================================================================
// Tests
// ============================================================================
