//! CLI output formatting.
//!
//! Each report has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Scan Inventory
//!
//! Categories in page order, each module as positional index + title with
//! its link as the target:
//!
//! ```text
//! Found 2 categories.
//! 001 ALGORITHMS (2 modules)
//!     001 Binary Heap → algorithms/heap.html
//!     002 Untitled → algorithms/scratch.html
//! 002 LLM (1 module)
//!     001 RAG Basics → llm/rag.html
//! ```
//!
//! Diagnostics (unreadable files) go through `tracing` to stderr instead.

use crate::types::{CategoryIndex, sorted_modules};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format the scan inventory: category count, then every category and module.
pub fn format_scan_output(index: &CategoryIndex) -> Vec<String> {
    let mut lines = vec![format!("Found {} categories.", index.len())];

    for (i, (name, modules)) in index.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            name,
            plural(modules.len(), "module", "modules")
        ));
        for (j, module) in sorted_modules(modules).into_iter().enumerate() {
            lines.push(format!(
                "    {} {} \u{2192} {}",
                format_index(j + 1),
                module.title,
                module.relative_link
            ));
        }
    }

    lines
}

/// Print scan inventory to stdout.
pub fn print_scan_output(index: &CategoryIndex) {
    for line in format_scan_output(index) {
        println!("{}", line);
    }
}
