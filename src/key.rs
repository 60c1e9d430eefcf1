//! Centralized verse key derivation.
//!
//! Every interlink entry is addressed by a [`VerseKey`]: a tradition tag plus a
//! canonical reference locator. Keys written in data files and keys built from
//! page data at query time both go through [`normalize_reference`], so the two
//! sides cannot drift apart. A drift here does not fail loudly; it shows up as
//! a verse that silently has no "related texts" panel.
//!
//! ## String Form
//!
//! `{tradition}-{canonical reference}`, for example:
//! - `bible` + `"Matthew 6:9"` → `bible-matthew-6-9`
//! - `quran` + `"1:1"` → `quran-1-1`
//! - `torah` + `"Genesis 12:1-3"` → `torah-genesis-12-1-3`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown tradition tag: {0:?}")]
    UnknownTradition(String),
    #[error("verse key has no reference part: {0:?}")]
    MissingReference(String),
    #[error("verse key has an empty reference: {0:?}")]
    EmptyReference(String),
}

/// A scriptural corpus.
///
/// The set is closed; adding a tradition means adding a variant here; the key
/// format does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tradition {
    Quran,
    Bible,
    Torah,
}

impl Tradition {
    pub const ALL: [Tradition; 3] = [Tradition::Quran, Tradition::Bible, Tradition::Torah];

    /// Lowercase tag used in keys and data files.
    pub fn tag(self) -> &'static str {
        match self {
            Tradition::Quran => "quran",
            Tradition::Bible => "bible",
            Tradition::Torah => "torah",
        }
    }

    /// Name shown to readers and used in citations.
    pub fn display_name(self) -> &'static str {
        match self {
            Tradition::Quran => "Quran",
            Tradition::Bible => "Bible",
            Tradition::Torah => "Torah",
        }
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Tradition {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tradition::ALL
            .into_iter()
            .find(|t| t.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| KeyError::UnknownTradition(s.to_string()))
    }
}

/// Canonicalize a human-readable reference locator.
///
/// Lower-cases the input and replaces every run of separators (whitespace,
/// `:` or `-`) with a single `-`. Leading and trailing separators are dropped.
///
/// - `"Matthew 6:9"` → `"matthew-6-9"`
/// - `"matthew  6:9"` → `"matthew-6-9"`
/// - `"1:1-7"` → `"1-1-7"`
/// - `"  6 : 9 "` → `"6-9"`
/// - `""` → `""`
pub fn normalize_reference(reference: &str) -> String {
    collapse_separators(reference, is_separator)
}

fn is_separator(c: char) -> bool {
    c == ':' || c == '-' || c.is_whitespace()
}

/// URL slug for free text such as a theme name.
///
/// Lower-cases the input and replaces every run of characters that are not
/// letters or digits with a single `-`, then trims. The result never contains
/// `/` or `.`, so it is always a single safe path segment. Text without any
/// letters or digits slugs to `""`.
///
/// - `"divine mercy"` → `"divine-mercy"`
/// - `"../../escaped"` → `"escaped"`
/// - `"Sanctity of Life"` → `"sanctity-of-life"`
pub fn slugify(text: &str) -> String {
    collapse_separators(text, |c| !c.is_alphanumeric())
}

fn collapse_separators(text: &str, is_separator: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.chars() {
        if is_separator(c) {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('-');
        }
        pending_separator = false;
        out.extend(c.to_lowercase());
    }
    out
}

/// Normalized identifier of one verse in one tradition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseKey {
    tradition: Tradition,
    reference: String,
}

impl VerseKey {
    /// Build a key from a tradition and a raw reference as it appears in
    /// content (`"Matthew 6:9"`, `"1:1"`).
    pub fn new(tradition: Tradition, reference: &str) -> Self {
        Self {
            tradition,
            reference: normalize_reference(reference),
        }
    }

    /// Parse the string form of a key (`"bible-matthew-6-9"`).
    ///
    /// The tradition tag is everything before the first hyphen; the rest is
    /// normalized as a reference. The result's string form may differ from
    /// the input when the input was not canonical (`"Bible-Matthew-6-9"`).
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        let (tag, reference) = key
            .trim()
            .split_once('-')
            .ok_or_else(|| KeyError::MissingReference(key.to_string()))?;
        let tradition: Tradition = tag.parse()?;
        let parsed = Self::new(tradition, reference);
        if parsed.reference.is_empty() {
            return Err(KeyError::EmptyReference(key.to_string()));
        }
        Ok(parsed)
    }

    pub fn tradition(&self) -> Tradition {
        self.tradition
    }

    /// Canonical reference part, e.g. `matthew-6-9`.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Fallback label built from the canonical form, e.g. `Bible matthew-6-9`.
    ///
    /// The original spelling of a reference is not recoverable from a key.
    /// Pages prefer [`InterlinkIndex::display_label`](crate::index::InterlinkIndex::display_label),
    /// which uses a citation authored in the data when one exists.
    pub fn label(&self) -> String {
        format!("{} {}", self.tradition.display_name(), self.reference)
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.tradition.tag(), self.reference)
    }
}

impl TryFrom<String> for VerseKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VerseKey> for String {
    fn from(key: VerseKey) -> Self {
        key.to_string()
    }
}
