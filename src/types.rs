//! Interlink data model.
//!
//! These types are both the in-memory value stored per verse and the shape of
//! entries in the JSON data files, so field names here are part of the data
//! schema (see [`crate::load`]).

use crate::key::{Tradition, VerseKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why two verses are linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    /// Parallel structure or wording.
    Parallel,
    /// Shared theme.
    Thematic,
    /// Shared history or narrative.
    Historical,
    /// Prophetic fulfillment.
    Prophetic,
}

impl Relevance {
    pub fn label(self) -> &'static str {
        match self {
            Relevance::Parallel => "parallel",
            Relevance::Thematic => "thematic",
            Relevance::Historical => "historical",
            Relevance::Prophetic => "prophetic",
        }
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One related verse in another tradition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelatedText {
    pub tradition: Tradition,
    /// Human-readable locator as authored, e.g. `"Matthew 6:9"`.
    pub reference: String,
    pub title: String,
    /// One paragraph; Markdown is allowed.
    pub description: String,
    pub relevance: Relevance,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl RelatedText {
    /// Citation string as it appears in `cross_references`: `"Bible Matthew 6:9"`.
    pub fn citation(&self) -> String {
        format!("{} {}", self.tradition.display_name(), self.reference)
    }

    /// Key of the related verse, for linking to its own interlinks.
    pub fn key(&self) -> VerseKey {
        VerseKey::new(self.tradition, &self.reference)
    }
}

/// Everything stored for one verse.
///
/// `themes` and `keywords` are sets in meaning but kept as vectors so authored
/// order survives a load/export cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerseInterlinks {
    pub related_texts: Vec<RelatedText>,
    /// Denormalized citations, maintained independently of `related_texts`.
    #[serde(default)]
    pub cross_references: Vec<String>,
    /// Short lowercase tags such as `"prayer"` or `"monotheism"`.
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub seo_description: String,
}

impl VerseInterlinks {
    /// Exact, case-sensitive theme membership.
    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.iter().any(|t| t == theme)
    }

    /// Whether any entry-level keyword contains `needle`.
    ///
    /// `needle` must already be lower-cased; stored keywords are folded here.
    pub fn matches_keyword(&self, needle: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| k.to_lowercase().contains(needle))
    }

    /// Citations of related texts that are missing from `cross_references`.
    pub fn missing_citations(&self) -> Vec<String> {
        self.related_texts
            .iter()
            .map(RelatedText::citation)
            .filter(|c| !self.cross_references.contains(c))
            .collect()
    }

    /// Summary used when a data file leaves `seo_description` empty.
    ///
    /// `label` names the verse itself, e.g. `Quran 1:1`.
    pub fn generated_seo_description(&self, label: &str) -> String {
        let mut summary = format!("Cross-references for {label}");
        if !self.related_texts.is_empty() {
            let citations: Vec<String> =
                self.related_texts.iter().map(RelatedText::citation).collect();
            summary.push_str(" with ");
            summary.push_str(&citations.join(", "));
        }
        summary.push('.');
        if !self.themes.is_empty() {
            summary.push_str(" Themes: ");
            summary.push_str(&self.themes.join(", "));
            summary.push('.');
        }
        summary
    }
}
