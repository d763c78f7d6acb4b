//! Hub configuration module.
//!
//! Every constant the pipeline relies on (exclusion lists, output filename,
//! page texts, the keyword → icon table) lives in [`HubConfig`] and is passed
//! explicitly into the scanner and renderer. Nothing reads ambient state, so
//! tests can run against throwaway roots with their own exclusion sets.
//!
//! ## Config File Location
//!
//! An optional `hub.toml` in the scan root overrides the stock defaults:
//!
//! ```text
//! root/
//! ├── hub.toml                 # Optional overrides
//! ├── index.html               # Generated output
//! ├── algorithms/
//! │   ├── heap.html
//! │   └── k-means.html
//! └── assets/                  # Ignored (denylisted)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! output_file = "index.html"
//! extension = "html"
//! ignore_dirs = [".git", ".vscode", "__pycache__", "templates", "assets", "css", "js", "images"]
//! ignore_files = ["index.html"]
//!
//! [site]
//! title = "AI Learning Hub"
//! tagline = "..."
//! lang = "zh-CN"
//! footer = "© 2025 AI Learning Hub. Generated automatically."
//! repository = "vsme/ai-viz"
//!
//! [cards]
//! fallback_description = "点击查看详情"
//! link_label = "View Module"
//! count_label = "Modules"
//!
//! [icons]
//! default = "📄"
//!
//! [[icons.rules]]
//! keyword = "RAG"
//! icon = "🧠"
//! ```
//!
//! ## Partial Configuration
//!
//! The user file is merged over the stock defaults: tables merge key by key,
//! scalars and arrays replace. Overriding `icons.rules` therefore replaces the
//! whole table. Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file looked up in the scan root.
pub const CONFIG_FILE: &str = "hub.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Hub configuration loaded from `hub.toml`.
///
/// All fields have defaults matching the stock landing page. Unknown keys are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubConfig {
    /// Filename of the generated page, written to the scan root.
    pub output_file: String,
    /// File extension (without the dot) of module files. Case-sensitive.
    pub extension: String,
    /// Directory names that are never treated as categories.
    pub ignore_dirs: Vec<String>,
    /// Filenames skipped inside category directories.
    pub ignore_files: Vec<String>,
    /// Page-level texts: title, header, footer.
    pub site: SiteConfig,
    /// Card and section labels.
    pub cards: CardConfig,
    /// Icon fallback table.
    pub icons: IconConfig,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            output_file: "index.html".to_string(),
            extension: "html".to_string(),
            ignore_dirs: [
                ".git",
                ".vscode",
                "__pycache__",
                "templates",
                "assets",
                "css",
                "js",
                "images",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ignore_files: vec!["index.html".to_string()],
            site: SiteConfig::default(),
            cards: CardConfig::default(),
            icons: IconConfig::default(),
        }
    }
}

impl HubConfig {
    /// Validate values the pipeline cannot work around.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_file must not be empty".into(),
            ));
        }
        if self.output_file.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "output_file must be a bare filename".into(),
            ));
        }
        if self.extension.trim().is_empty() {
            return Err(ConfigError::Validation("extension must not be empty".into()));
        }
        if self.icons.default.is_empty() {
            return Err(ConfigError::Validation(
                "icons.default must not be empty".into(),
            ));
        }
        if let Some(pos) = self.icons.rules.iter().position(|r| r.keyword.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "icons.rules[{pos}].keyword must not be empty"
            )));
        }
        Ok(())
    }

    /// True if a directory with this name must not become a category.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.iter().any(|d| d == name)
    }

    /// True if a file with this name is a module candidate.
    ///
    /// The generated page itself is always excluded, even when `output_file`
    /// was changed without updating `ignore_files`.
    pub fn is_module_file(&self, name: &str) -> bool {
        let suffix = format!(".{}", self.extension);
        name.ends_with(&suffix)
            && name != self.output_file
            && !self.ignore_files.iter().any(|f| f == name)
    }
}

/// Page-level texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document `<title>` and header heading.
    pub title: String,
    /// Subtitle under the header heading.
    pub tagline: String,
    /// `lang` attribute of the root element.
    pub lang: String,
    /// Footer line.
    pub footer: String,
    /// GitHub `owner/name` for the stars badge in the header. Empty hides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "AI Learning Hub".to_string(),
            tagline: "探索人工智能的世界，从基础算法到前沿技术。".to_string(),
            lang: "zh-CN".to_string(),
            footer: "© 2025 AI Learning Hub. Generated automatically.".to_string(),
            repository: Some("vsme/ai-viz".to_string()),
        }
    }
}

/// Card and section labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// Shown instead of the generic "No description available." fallback.
    pub fallback_description: String,
    /// Call to action in the card footer.
    pub link_label: String,
    /// Suffix of the per-category count badge.
    pub count_label: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            fallback_description: "点击查看详情".to_string(),
            link_label: "View Module".to_string(),
            count_label: "Modules".to_string(),
        }
    }
}

/// Icon fallback table.
///
/// Rules are evaluated in order and the first match wins, so reordering them
/// changes which icon a title matching several keywords gets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    /// Icon used when neither the file nor a rule provides one.
    pub default: String,
    pub rules: Vec<IconRule>,
}

/// A `keyword → icon` rule.
///
/// Matches when the keyword is contained in the uppercased title or in the
/// title as written. Uppercase ASCII keywords therefore match any casing,
/// while non-Latin keywords match literally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconRule {
    pub keyword: String,
    pub icon: String,
}

impl IconRule {
    fn new(keyword: &str, icon: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            icon: icon.to_string(),
        }
    }

    pub fn matches(&self, title: &str, upper_title: &str) -> bool {
        upper_title.contains(&self.keyword) || title.contains(&self.keyword)
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            default: "📄".to_string(),
            rules: vec![
                IconRule::new("RAG", "🧠"),
                IconRule::new("SEARCH", "🔍"),
                IconRule::new("检索", "🔍"),
                IconRule::new("SPLITTER", "✂️"),
                IconRule::new("HEAP", "🌲"),
                IconRule::new("K-MEANS", "📊"),
            ],
        }
    }
}

impl IconConfig {
    /// First rule icon matching `title`, if any.
    pub fn lookup(&self, title: &str) -> Option<&str> {
        let upper = title.to_uppercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(title, &upper))
            .map(|rule| rule.icon.as_str())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(HubConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `hub.toml` from a directory as a raw TOML value.
///
/// `Ok(None)` when the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<HubConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: HubConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config for a scan root.
///
/// Uses stock defaults when `hub.toml` is absent.
pub fn load_config(root: &Path) -> Result<HubConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `hub.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Hub Index Configuration
# ========================
# Place this file in the scan root as hub.toml. All settings are optional;
# the values below are the defaults. Tables merge with the defaults key by
# key, arrays replace them. Unknown keys cause an error.

# Generated page, written to the scan root and overwritten on every run.
output_file = "index.html"

# Extension of module files inside category directories (case-sensitive).
extension = "html"

# Directory names that never become categories.
ignore_dirs = [".git", ".vscode", "__pycache__", "templates", "assets", "css", "js", "images"]

# Filenames skipped inside category directories.
ignore_files = ["index.html"]

# ---------------------------------------------------------------------------
# Page texts
# ---------------------------------------------------------------------------
[site]
title = "AI Learning Hub"
tagline = "探索人工智能的世界，从基础算法到前沿技术。"
lang = "zh-CN"
footer = "© 2025 AI Learning Hub. Generated automatically."
# GitHub owner/name for the stars badge in the header; "" hides it.
repository = "vsme/ai-viz"

# ---------------------------------------------------------------------------
# Cards
# ---------------------------------------------------------------------------
[cards]
# Shown when a module has no <meta name="description">.
fallback_description = "点击查看详情"
link_label = "View Module"
count_label = "Modules"

# ---------------------------------------------------------------------------
# Icons
# ---------------------------------------------------------------------------
# Resolution: <!-- icon: X --> in the file, then the first rule whose keyword
# appears in the uppercased or raw title, then the default.
[icons]
default = "📄"

[[icons.rules]]
keyword = "RAG"
icon = "🧠"

[[icons.rules]]
keyword = "SEARCH"
icon = "🔍"

[[icons.rules]]
keyword = "检索"
icon = "🔍"

[[icons.rules]]
keyword = "SPLITTER"
icon = "✂️"

[[icons.rules]]
keyword = "HEAP"
icon = "🌲"

[[icons.rules]]
keyword = "K-MEANS"
icon = "📊"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_stock_layout() {
        let config = HubConfig::default();
        assert_eq!(config.output_file, "index.html");
        assert_eq!(config.extension, "html");
        assert!(config.is_ignored_dir("__pycache__"));
        assert!(config.is_ignored_dir("images"));
        assert!(!config.is_ignored_dir("algorithms"));
    }

    #[test]
    fn default_repository_badge_is_set() {
        let config = HubConfig::default();
        assert_eq!(config.site.repository.as_deref(), Some("vsme/ai-viz"));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: HubConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, HubConfig::default());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[site]
title = "Notes"
"#;
        let config: HubConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.site.lang, "zh-CN");
        assert_eq!(config.output_file, "index.html");
        assert_eq!(config.icons.rules.len(), 6);
    }

    // =========================================================================
    // File filters
    // =========================================================================

    #[test]
    fn module_file_requires_extension() {
        let config = HubConfig::default();
        assert!(config.is_module_file("heap.html"));
        assert!(!config.is_module_file("heap.htm"));
        assert!(!config.is_module_file("notes.md"));
    }

    #[test]
    fn module_file_extension_is_case_sensitive() {
        let config = HubConfig::default();
        assert!(!config.is_module_file("HEAP.HTML"));
    }

    #[test]
    fn module_file_skips_reserved_names() {
        let config = HubConfig::default();
        assert!(!config.is_module_file("index.html"));
    }

    #[test]
    fn module_file_skips_renamed_output() {
        let config = HubConfig {
            output_file: "hub.html".to_string(),
            ignore_files: vec![],
            ..HubConfig::default()
        };
        assert!(!config.is_module_file("hub.html"));
        assert!(config.is_module_file("index.html"));
    }

    // =========================================================================
    // Icon table
    // =========================================================================

    #[test]
    fn icon_lookup_matches_uppercased_title() {
        let icons = IconConfig::default();
        assert_eq!(icons.lookup("Binary heap basics"), Some("🌲"));
    }

    #[test]
    fn icon_lookup_first_rule_wins() {
        let icons = IconConfig::default();
        assert_eq!(icons.lookup("RAG with hybrid search"), Some("🧠"));
    }

    #[test]
    fn icon_lookup_matches_raw_title() {
        let icons = IconConfig::default();
        assert_eq!(icons.lookup("向量检索入门"), Some("🔍"));
    }

    #[test]
    fn icon_lookup_none_when_nothing_matches() {
        let icons = IconConfig::default();
        assert_eq!(icons.lookup("Linear regression"), None);
    }

    #[test]
    fn icon_lookup_substring_match() {
        // "STORAGE" contains "RAG"
        let icons = IconConfig::default();
        assert_eq!(icons.lookup("Object storage"), Some("🧠"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, HubConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
ignore_dirs = ["drafts"]

[site]
lang = "en"
repository = "acme/demos"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.ignore_dirs, vec!["drafts"]);
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.site.repository.as_deref(), Some("acme/demos"));
        // Untouched keys keep their defaults
        assert_eq!(config.site.title, "AI Learning Hub");
    }

    #[test]
    fn load_config_rules_replace_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[[icons.rules]]
keyword = "GRAPH"
icon = "🕸️"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.icons.rules.len(), 1);
        assert_eq!(config.icons.default, "📄");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"output_file = "index.html""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"output_file = "hub.html""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(
            merged.get("output_file").unwrap().as_str(),
            Some("hub.html")
        );
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[site]
title = "Hub"
lang = "en"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[site]
lang = "fr"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let site = merged.get("site").unwrap();
        assert_eq!(site.get("lang").unwrap().as_str(), Some("fr"));
        assert_eq!(site.get("title").unwrap().as_str(), Some("Hub"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"ignore_dirs = [".git", "css"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"ignore_dirs = ["drafts"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        let dirs = merged.get("ignore_dirs").unwrap().as_array().unwrap();
        assert_eq!(dirs.len(), 1);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<HubConfig, _> = toml::from_str(r#"output = "x.html""#);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml_str = r#"
[cards]
label = "Open"
"#;
        let result: Result<HubConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[icons]
fallback = "x"
"#,
        )
        .unwrap();

        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_defaults_ok() {
        assert!(HubConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_output_file_with_separator() {
        let config = HubConfig {
            output_file: "out/index.html".to_string(),
            ..HubConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_empty_extension() {
        let config = HubConfig {
            extension: String::new(),
            ..HubConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_icon_keyword() {
        let mut config = HubConfig::default();
        config.icons.rules.push(IconRule::new("", "x"));
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("icons.rules[6]"));
    }

    #[test]
    fn validate_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), r#"output_file = """#).unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
