//! # Scripture Interlinks
//!
//! A read-only lookup service answering "which passages in other scriptural
//! traditions relate to this verse?" for the Quran, the Bible and the Torah.
//! A curated JSON data asset is loaded once into an [`index::InterlinkIndex`];
//! queries are pure reads against it.
//!
//! # Architecture
//!
//! ```text
//! content/data/*.json  →  load  →  InterlinkIndex  →  queries
//!                                        │
//!                                        ├──→ render  →  dist/ (HTML + sitemap)
//!                                        └──→ output  →  CLI
//! ```
//!
//! All validation happens in [`load`]. Once an index exists it is immutable,
//! so the query layer never fails: misses are `None` or an empty `Vec`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`key`] | `Tradition`, `VerseKey` and the one reference normalization function |
//! | [`types`] | `RelatedText`, `Relevance`, `VerseInterlinks` |
//! | [`index`] | The in-memory index and the four query operations |
//! | [`stats`] | Totals and the sorted theme list, computed at construction |
//! | [`load`] | Versioned JSON schema, directory walking, load-time validation, export |
//! | [`fingerprint`] | SHA-256 digest of the canonical export |
//! | [`config`] | `config.toml` loading: stock defaults merged with the user overlay |
//! | [`render`] | Related-texts panel, verse/theme/home pages and sitemap using Maud; `ThemePages` decides which themes get a page |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Normalization Function
//!
//! `Quran 1:1`, `quran 1-1` and `QURAN  1 : 1` all name the same verse. Lookups,
//! data file keys and related-text links all go through
//! [`key::normalize_reference`], so equivalent spellings never disagree. Data
//! files must use the canonical spelling; the loader rejects anything else
//! instead of silently rewriting it.
//!
//! ## Explicit Index Value
//!
//! There is no global table. The index is built from data and passed by
//! reference, which keeps tests independent (each builds its own small index)
//! and makes reloading a matter of building a new value and swapping an `Arc`.
//!
//! ## Exact Themes, Fuzzy Keywords
//!
//! Theme lookup is exact and case-sensitive: themes are a controlled
//! vocabulary. Keyword lookup is a case-insensitive substring match, meant for
//! free-text search. The loader warns about themes that are not lowercase
//! because they can only ever be found by their exact spelling.
//!
//! ## Order Is Data
//!
//! Enumeration and filter results follow index order, which is file-name order
//! then entry order within a file. The export and the fingerprint depend on it
//! too, so reordering entries is a visible change.

pub mod config;
pub mod fingerprint;
pub mod index;
pub mod key;
pub mod load;
pub mod output;
pub mod render;
pub mod stats;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
