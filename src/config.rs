//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` in the source directory.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Optional; overrides stock defaults
//! └── data/                    # Interlink data files ([data] dir)
//!     ├── 010-quran.json
//!     └── 020-bible.json
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [data]
//! dir = "data"                # Data directory, relative to the source directory
//! strict_citations = false    # Missing cross-reference citations are errors, not warnings
//!
//! [site]
//! title = "Scripture Interlinks"
//! base_url = "https://example.org"
//! language = "en"
//!
//! [panel]
//! heading = "Related texts across traditions"
//! show_keywords = true
//! # max_related = 3          # Cap on cards per panel (omit for no cap)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where the interlink data lives and how strictly it is checked.
    pub data: DataConfig,
    /// Site identity used in generated pages and the sitemap.
    pub site: SiteSection,
    /// Related-texts panel rendering.
    pub panel: PanelConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.dir.trim().is_empty() {
            return Err(ConfigError::Validation("data.dir must not be empty".into()));
        }
        let url = &self.site.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with '/'".into(),
            ));
        }
        if self.site.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.language must not be empty".into(),
            ));
        }
        if self.panel.max_related == Some(0) {
            return Err(ConfigError::Validation(
                "panel.max_related must be at least 1 (omit it for no cap)".into(),
            ));
        }
        Ok(())
    }
}

/// Data source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Data directory (or single JSON file), relative to the source directory.
    pub dir: String,
    /// When true, a related text whose citation is missing from the entry's
    /// `cross_references` fails the load instead of logging a warning.
    pub strict_citations: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
            strict_citations: false,
        }
    }
}

/// Site identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    /// Absolute origin for sitemap URLs, without trailing slash.
    pub base_url: String,
    /// `lang` attribute of generated documents.
    pub language: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Scripture Interlinks".to_string(),
            base_url: "https://example.org".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Related-texts panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Panel heading.
    pub heading: String,
    /// Show each related text's keywords under its description.
    pub show_keywords: bool,
    /// Maximum related-text cards per panel. `None` shows all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_related: Option<usize>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            heading: "Related texts across traditions".to_string(),
            show_keywords: true,
            max_related: None,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Scripture Interlinks Configuration
# ==================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the source directory (--source, default "content").
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Interlink data
# ---------------------------------------------------------------------------
[data]
# Directory holding the interlink JSON files, relative to the source
# directory. Every *.json file is loaded, in file-name order. May also
# point at a single JSON file.
dir = "data"

# When true, a related text whose citation ("Bible Matthew 6:9") is not
# listed in its entry's cross_references fails the load. When false the
# mismatch is logged as a warning.
strict_citations = false

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Scripture Interlinks"

# Absolute origin used for sitemap URLs. No trailing slash.
base_url = "https://example.org"

# lang attribute of generated pages.
language = "en"

# ---------------------------------------------------------------------------
# Related-texts panel
# ---------------------------------------------------------------------------
[panel]
heading = "Related texts across traditions"

# Show each related text's keywords under its description.
show_keywords = true

# Maximum related-text cards per panel. Omit to show all.
# max_related = 3
"##
}
