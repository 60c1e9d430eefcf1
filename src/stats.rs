//! Derived statistics over an interlink index.
//!
//! Computed once when an [`InterlinkIndex`](crate::index::InterlinkIndex) is
//! built. The index never changes afterwards, so the snapshot never goes stale.

use crate::key::VerseKey;
use crate::types::VerseInterlinks;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterlinkStats {
    pub total_verses: usize,
    pub total_related_texts: usize,
    pub total_cross_references: usize,
    /// Every distinct theme, sorted.
    pub themes: Vec<String>,
}

impl InterlinkStats {
    pub fn compute<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a VerseKey, &'a VerseInterlinks)>,
    {
        let mut stats = Self::default();
        let mut themes = BTreeSet::new();
        for (_, entry) in entries {
            stats.total_verses += 1;
            stats.total_related_texts += entry.related_texts.len();
            stats.total_cross_references += entry.cross_references.len();
            themes.extend(entry.themes.iter().cloned());
        }
        stats.themes = themes.into_iter().collect();
        stats
    }
}

impl fmt::Display for InterlinkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} verses, {} related texts, {} cross-references, {} themes",
            self.total_verses,
            self.total_related_texts,
            self.total_cross_references,
            self.themes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::fixture_index;

    #[test]
    fn empty_stats() {
        let stats = InterlinkStats::compute(std::iter::empty());
        assert_eq!(stats, InterlinkStats::default());
        assert_eq!(
            stats.to_string(),
            "0 verses, 0 related texts, 0 cross-references, 0 themes"
        );
    }

    #[test]
    fn totals_are_sums_over_entries() {
        let index = fixture_index();
        let stats = InterlinkStats::compute(index.iter());

        let related: usize = index.iter().map(|(_, e)| e.related_texts.len()).sum();
        let cross: usize = index.iter().map(|(_, e)| e.cross_references.len()).sum();
        assert_eq!(stats.total_verses, index.len());
        assert_eq!(stats.total_related_texts, related);
        assert_eq!(stats.total_cross_references, cross);
    }

    #[test]
    fn themes_are_sorted_and_distinct() {
        let stats = InterlinkStats::compute(fixture_index().iter());
        let mut expected = stats.themes.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(stats.themes, expected);
        assert!(stats.themes.contains(&"prayer".to_string()));
    }
}
