//! Module metadata extraction.
//!
//! Each module file can describe itself with four optional markers:
//!
//! ```html
//! <title>Binary Heap</title>
//! <meta name="description" content="Interactive heap visualisation">
//! <!-- order: 3 -->
//! <!-- icon: 🌲 -->
//! ```
//!
//! Extraction is a best-effort pattern scan, not a markup parser. Tags are
//! matched case-insensitively and the first textual match wins; a missing or
//! malformed marker resolves to its default:
//!
//! | Field | Default |
//! |-------|---------|
//! | title | `"Untitled"` |
//! | description | `"No description available."` |
//! | order | `9999` (sorts after every smaller explicit order) |
//! | icon | none (renderer falls back to the keyword table) |
//!
//! A file that cannot be read (I/O error, invalid UTF-8) is logged and gets
//! all defaults; it never aborts the scan.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const DEFAULT_ORDER: u64 = 9999;

// `.` spans newlines inside <title> only; the comment markers are single-line.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title>(.*?)</title>").expect("title pattern"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+name=["']description["']\s+content=["'](.*?)["']"#)
        .expect("description pattern")
});
// `\d` is any Unicode decimal digit, not only ASCII.
static ORDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--\s*order:\s*(\d+)\s*-->").expect("order pattern"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d$").expect("digit pattern"));
static ICON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--\s*icon:\s*(.+?)\s*-->").expect("icon pattern"));

/// Metadata read from a single module file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleMeta {
    pub title: String,
    pub description: String,
    pub order: u64,
    pub icon: Option<String>,
}

impl Default for ModuleMeta {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            order: DEFAULT_ORDER,
            icon: None,
        }
    }
}

/// Extract metadata from file content.
pub fn extract(content: &str) -> ModuleMeta {
    let defaults = ModuleMeta::default();
    ModuleMeta {
        title: first_capture(&TITLE_RE, content).unwrap_or(defaults.title),
        description: first_capture(&DESCRIPTION_RE, content).unwrap_or(defaults.description),
        order: first_capture(&ORDER_RE, content)
            .map(|digits| parse_order(&digits))
            .unwrap_or(defaults.order),
        icon: first_capture(&ICON_RE, content).filter(|icon| !icon.is_empty()),
    }
}

/// Read a module file and extract its metadata.
///
/// Read failures are logged and yield [`ModuleMeta::default`].
pub fn read_module(path: &Path) -> ModuleMeta {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let meta = extract(&content);
            debug!(path = %path.display(), title = %meta.title, order = meta.order, "extracted module metadata");
            meta
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error reading module file, using defaults");
            ModuleMeta::default()
        }
    }
}

/// Value of an all-digit order marker, saturating at `u64::MAX`.
///
/// A value too large to hold still sorts after every smaller order.
fn parse_order(digits: &str) -> u64 {
    digits
        .chars()
        .map(decimal_value)
        .try_fold(0u64, |acc, d| acc.checked_mul(10)?.checked_add(u64::from(d)))
        .unwrap_or(u64::MAX)
}

fn is_decimal_digit(c: char) -> bool {
    DIGIT_RE.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Numeric value of a Unicode decimal digit.
///
/// Decimal digits are assigned in contiguous runs of ten, zero first, so the
/// value is the distance from the start of the run modulo ten.
fn decimal_value(c: char) -> u32 {
    if let Some(d) = c.to_digit(10) {
        return d;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    (c as u32 - start) % 10
}

/// Trimmed text of the first capture group of the first match.
///
/// An empty title or description is kept as found: the marker was present.
fn first_capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
