//! Shared test utilities for the scripture-interlinks test suite.
//!
//! Provides an in-memory fixture index, builders for related texts, lookup
//! helpers that panic with a useful message, and on-disk fixture setup.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let index = fixture_index();
//! let entry = find_entry(&index, "quran-1-1");
//! assert_eq!(entry.related_texts[0].citation(), "Bible Matthew 6:9");
//!
//! let tmp = setup_fixtures();
//! let (config, index) = load_site(tmp.path()).unwrap();
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::index::InterlinkIndex;
use crate::key::{Tradition, VerseKey};
use crate::types::{RelatedText, Relevance, VerseInterlinks};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Builders
// =========================================================================

/// A related text with placeholder title and description.
pub fn related(tradition: Tradition, reference: &str, relevance: Relevance) -> RelatedText {
    RelatedText {
        tradition,
        reference: reference.to_string(),
        title: format!("{} {}", tradition.display_name(), reference),
        description: format!("Placeholder description for {reference}."),
        relevance,
        keywords: Vec::new(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// An entry whose cross references are the citations of `related_texts`.
pub fn entry(related_texts: Vec<RelatedText>, themes: &[&str], keywords: &[&str]) -> VerseInterlinks {
    let cross_references = related_texts.iter().map(RelatedText::citation).collect();
    VerseInterlinks {
        related_texts,
        cross_references,
        themes: strings(themes),
        keywords: strings(keywords),
        seo_description: String::new(),
    }
}

/// Four-entry index used across unit tests.
///
/// | Key | Themes | Keywords |
/// |-----|--------|----------|
/// | `quran-1-1` | prayer, praise | Opening Prayer, praise |
/// | `bible-matthew-6-9` | prayer | Lord's Prayer, hallowed name |
/// | `torah-deuteronomy-6-4` | monotheism | Shema, oneness of God |
/// | `quran-112-1` | monotheism | Divine Word, oneness |
pub fn fixture_index() -> InterlinkIndex {
    let mut fatiha = related(Tradition::Quran, "1:1", Relevance::Parallel);
    fatiha.keywords = strings(&["fatiha"]);

    let mut lords_prayer = related(Tradition::Bible, "Matthew 6:9", Relevance::Parallel);
    lords_prayer.keywords = strings(&["lord's prayer"]);

    let entries = vec![
        (
            VerseKey::new(Tradition::Quran, "1:1"),
            entry(vec![lords_prayer], &["prayer", "praise"], &["Opening Prayer", "praise"]),
        ),
        (
            VerseKey::new(Tradition::Bible, "Matthew 6:9"),
            entry(vec![fatiha], &["prayer"], &["Lord's Prayer", "hallowed name"]),
        ),
        (
            VerseKey::new(Tradition::Torah, "Deuteronomy 6:4"),
            entry(
                vec![
                    related(Tradition::Quran, "112:1", Relevance::Thematic),
                    related(Tradition::Bible, "Mark 12:29", Relevance::Parallel),
                ],
                &["monotheism"],
                &["Shema", "oneness of God"],
            ),
        ),
        (
            VerseKey::new(Tradition::Quran, "112:1"),
            entry(
                vec![related(Tradition::Torah, "Deuteronomy 6:4", Relevance::Thematic)],
                &["monotheism"],
                &["Divine Word", "oneness"],
            ),
        ),
    ];
    InterlinkIndex::from_entries(entries).unwrap()
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an entry by its key string. Panics if not found.
pub fn find_entry<'a>(index: &'a InterlinkIndex, key: &str) -> &'a VerseInterlinks {
    let parsed = VerseKey::parse(key).unwrap_or_else(|e| panic!("bad key '{key}': {e}"));
    index.lookup_key(&parsed).unwrap_or_else(|| {
        let keys = key_strings(&index.all_interlinked_verses());
        panic!("entry '{key}' not found. Available: {keys:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Key strings, in the given order.
pub fn key_strings(keys: &[&VerseKey]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}
