//! In-memory interlink index.
//!
//! An [`InterlinkIndex`] is built once (by [`crate::load`] or directly from
//! entries in tests) and is read-only afterwards. It has no interior
//! mutability, so any number of threads can query a shared `&InterlinkIndex`
//! or `Arc<InterlinkIndex>` without locking. Reloading means building a new
//! index and swapping the handle.
//!
//! # Queries
//!
//! | Method | Match rule |
//! |--------|------------|
//! | [`verse_interlinks`](InterlinkIndex::verse_interlinks) | reference normalized through [`VerseKey::new`] |
//! | [`all_interlinked_verses`](InterlinkIndex::all_interlinked_verses) | every key, index order |
//! | [`interlinks_by_theme`](InterlinkIndex::interlinks_by_theme) | exact, case-sensitive theme equality |
//! | [`interlinks_by_keyword`](InterlinkIndex::interlinks_by_keyword) | case-insensitive substring of any entry keyword |
//!
//! Themes and keywords match differently; tests pin both rules.
//!
//! A miss is never an error: lookups return `None` and filters return an
//! empty list, so a missing cross-reference only drops a panel from a page.

use crate::key::{Tradition, VerseKey};
use crate::stats::InterlinkStats;
use crate::types::VerseInterlinks;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate verse key: {0}")]
pub struct DuplicateKeyError(pub VerseKey);

#[derive(Debug, Clone, Default)]
pub struct InterlinkIndex {
    /// Entries in load order; this order is observable through every query.
    entries: Vec<(VerseKey, VerseInterlinks)>,
    /// Runtime lookup: key → position in `entries`.
    positions: HashMap<VerseKey, usize>,
    /// Authored citation per verse, from [`citation_labels`].
    labels: HashMap<VerseKey, String>,
    stats: InterlinkStats,
}

/// Reader-facing citation for every verse some related text points at.
///
/// Keys lose the authored spelling (`matthew-6-9`); citations keep it
/// (`Bible Matthew 6:9`). The first citation in entry order wins.
pub fn citation_labels<'a, I>(entries: I) -> HashMap<VerseKey, String>
where
    I: IntoIterator<Item = &'a VerseInterlinks>,
{
    let mut labels = HashMap::new();
    for text in entries.into_iter().flat_map(|e| e.related_texts.iter()) {
        labels.entry(text.key()).or_insert_with(|| text.citation());
    }
    labels
}

impl InterlinkIndex {
    /// Build an index from entries, keeping their order.
    ///
    /// Fails on the first repeated key.
    pub fn from_entries<I>(entries: I) -> Result<Self, DuplicateKeyError>
    where
        I: IntoIterator<Item = (VerseKey, VerseInterlinks)>,
    {
        let entries: Vec<(VerseKey, VerseInterlinks)> = entries.into_iter().collect();
        let mut positions = HashMap::with_capacity(entries.len());
        for (pos, (key, _)) in entries.iter().enumerate() {
            if positions.insert(key.clone(), pos).is_some() {
                return Err(DuplicateKeyError(key.clone()));
            }
        }
        let stats = InterlinkStats::compute(entries.iter().map(|(k, v)| (k, v)));
        let labels = citation_labels(entries.iter().map(|(_, v)| v));
        Ok(Self {
            entries,
            positions,
            labels,
            stats,
        })
    }

    /// Look up the interlinks for a verse as it appears in content.
    ///
    /// `reference` is normalized, so `"Matthew 6:9"` and `"matthew  6:9"`
    /// resolve to the same entry.
    pub fn verse_interlinks(&self, tradition: Tradition, reference: &str) -> Option<&VerseInterlinks> {
        self.lookup_key(&VerseKey::new(tradition, reference))
    }

    /// Look up by an already-built key.
    pub fn lookup_key(&self, key: &VerseKey) -> Option<&VerseInterlinks> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Every key in index order.
    pub fn all_interlinked_verses(&self) -> Vec<&VerseKey> {
        self.entries.iter().map(|(k, _)| k).collect()
    }

    /// Keys whose themes contain `theme` exactly (case-sensitive).
    pub fn interlinks_by_theme(&self, theme: &str) -> Vec<&VerseKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.has_theme(theme))
            .map(|(k, _)| k)
            .collect()
    }

    /// Keys with at least one keyword containing `keyword`, ignoring case.
    ///
    /// Surrounding whitespace is trimmed; a blank query matches nothing.
    pub fn interlinks_by_keyword(&self, keyword: &str) -> Vec<&VerseKey> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|(_, entry)| entry.matches_keyword(&needle))
            .map(|(k, _)| k)
            .collect()
    }

    /// Entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&VerseKey, &VerseInterlinks)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Title for a verse: its authored citation when any entry cites it,
    /// otherwise [`VerseKey::label`].
    pub fn display_label(&self, key: &VerseKey) -> String {
        self.labels.get(key).cloned().unwrap_or_else(|| key.label())
    }

    pub fn stats(&self) -> &InterlinkStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
