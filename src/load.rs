//! Interlink data loading and validation.
//!
//! Reads the versioned JSON data asset into an [`InterlinkIndex`]. All
//! data-integrity checks happen here, once, so the query layer can assume a
//! well-formed index.
//!
//! ## Data Layout
//!
//! ```text
//! content/data/
//! ├── 010-quran.json        # Loaded first
//! ├── 020-bible.json
//! ├── 030-torah.json
//! └── .draft.json           # Hidden files are skipped
//! ```
//!
//! Files are read in file-name order, entries in file order; that order is the
//! index order. `data.dir` may also name a single JSON file.
//!
//! ## Schema (version 1)
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": [
//!     {
//!       "key": "quran-1-1",
//!       "related_texts": [
//!         { "tradition": "bible", "reference": "Matthew 6:9", "title": "The Lord's Prayer",
//!           "description": "...", "relevance": "parallel", "keywords": ["prayer"] }
//!       ],
//!       "cross_references": ["Bible Matthew 6:9"],
//!       "themes": ["prayer"],
//!       "keywords": ["opening prayer"],
//!       "seo_description": "..."
//!     }
//!   ]
//! }
//! ```
//!
//! ## Validation
//!
//! Errors:
//! - Keys must parse and must already be canonical (`quran-1-1`, not `Quran-1:1`)
//! - Keys must be unique across all files
//! - Unknown fields, traditions, or relevance values are rejected
//! - With `strict_citations`, every related text's citation must appear in
//!   `cross_references`
//!
//! Warnings (logged and collected, never fatal):
//! - Citation missing from `cross_references` (non-strict)
//! - Theme that is blank or not lowercase
//! - Theme with no letters or digits (it cannot have a page)
//! - Distinct themes that slug to the same page (`Prayer` and `prayer`)
//! - Entry without related texts
//!
//! An empty `seo_description` is filled with a generated summary that names
//! the verse by its authored citation when another entry cites it.

use crate::config::{self, ConfigError, DataConfig, SiteConfig};
use crate::index::{DuplicateKeyError, InterlinkIndex, citation_labels};
use crate::key::{KeyError, VerseKey, slugify};
use crate::types::{RelatedText, VerseInterlinks};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Version of the data file format. Bump when the entry shape changes.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unsupported schema version {found} in {path} (expected {expected})", expected = SCHEMA_VERSION)]
    UnsupportedVersion { path: PathBuf, found: u64 },
    #[error("Invalid key in {path}: {source}")]
    InvalidKey { path: PathBuf, source: KeyError },
    #[error("Non-canonical key {key:?} in {path}; write it as {expected:?}")]
    NonCanonicalKey {
        path: PathBuf,
        key: String,
        expected: String,
    },
    #[error("Duplicate key {key} in {second} (first defined in {first})")]
    DuplicateKey {
        key: VerseKey,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("Entry {key} in {path} cites {citation:?} but does not list it in cross_references")]
    MissingCitation {
        path: PathBuf,
        key: VerseKey,
        citation: String,
    },
    #[error("No interlink data found at {0}")]
    NoData(PathBuf),
}

/// One data file as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterlinkDocument {
    pub version: u32,
    pub entries: Vec<InterlinkEntry>,
}

/// One entry as stored on disk: the authored key plus its interlinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterlinkEntry {
    pub key: String,
    pub related_texts: Vec<RelatedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_references: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seo_description: String,
}

impl InterlinkEntry {
    fn from_parts(key: &VerseKey, interlinks: &VerseInterlinks) -> Self {
        Self {
            key: key.to_string(),
            related_texts: interlinks.related_texts.clone(),
            cross_references: interlinks.cross_references.clone(),
            themes: interlinks.themes.clone(),
            keywords: interlinks.keywords.clone(),
            seo_description: interlinks.seo_description.clone(),
        }
    }

    fn into_parts(self) -> (String, VerseInterlinks) {
        (
            self.key,
            VerseInterlinks {
                related_texts: self.related_texts,
                cross_references: self.cross_references,
                themes: self.themes,
                keywords: self.keywords,
                seo_description: self.seo_description,
            },
        )
    }
}

/// A data file that was read, with the keys it contributed.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub keys: Vec<VerseKey>,
}

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadedData {
    pub index: InterlinkIndex,
    pub files: Vec<LoadedFile>,
    /// Non-fatal problems, already logged through `tracing`.
    pub warnings: Vec<String>,
}

/// Load config from `source/config.toml`, then the index from the configured
/// data location.
pub fn load_site(source: &Path) -> Result<(SiteConfig, LoadedData), LoadError> {
    let config = config::load_config(source)?;
    let data = load_index(&source.join(&config.data.dir), &config.data)?;
    Ok((config, data))
}

/// Load every data file under `path` (or `path` itself, if it is a file).
pub fn load_index(path: &Path, data: &DataConfig) -> Result<LoadedData, LoadError> {
    let files = data_files(path)?;
    if files.is_empty() {
        return Err(LoadError::NoData(path.to_path_buf()));
    }

    let mut entries = Vec::new();
    let mut loaded = Vec::new();
    let mut warnings = Vec::new();

    for file in files {
        let document = read_document(&file)?;
        let mut keys = Vec::with_capacity(document.entries.len());

        for raw in document.entries {
            let (authored, interlinks) = raw.into_parts();
            let key = canonical_key(&authored, &file)?;
            check_entry(&key, &interlinks, &file, data, &mut warnings)?;
            debug!(key = %key, related = interlinks.related_texts.len(), "loaded entry");

            keys.push(key.clone());
            entries.push((key, interlinks));
        }

        info!(path = %file.display(), entries = keys.len(), "loaded interlink file");
        loaded.push(LoadedFile { path: file, keys });
    }

    check_theme_slugs(&entries, &mut warnings);
    fill_seo_descriptions(&mut entries);

    let index = InterlinkIndex::from_entries(entries)
        .map_err(|DuplicateKeyError(key)| duplicate_key_error(key, &loaded))?;
    Ok(LoadedData {
        index,
        files: loaded,
        warnings,
    })
}

/// Name the first two files that define `key`. Both may be the same file.
fn duplicate_key_error(key: VerseKey, loaded: &[LoadedFile]) -> LoadError {
    let wanted = &key;
    let origins: Vec<&PathBuf> = loaded
        .iter()
        .flat_map(|file| {
            file.keys
                .iter()
                .filter(move |k| *k == wanted)
                .map(move |_| &file.path)
        })
        .take(2)
        .collect();
    let first = origins.first().map(|p| p.to_path_buf()).unwrap_or_default();
    let second = origins.get(1).map(|p| p.to_path_buf()).unwrap_or_else(|| first.clone());
    LoadError::DuplicateKey { key, first, second }
}

/// Collect data files: `path` itself, or every visible `*.json` below it in
/// file-name order.
fn data_files(path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NoData(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_json(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn read_document(path: &Path) -> Result<InterlinkDocument, LoadError> {
    let content = fs::read_to_string(path)?;
    let json_error = |source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    };

    // Check the version before the shape, so an old file reports the version
    // mismatch rather than whichever field changed.
    let value: serde_json::Value = serde_json::from_str(&content).map_err(json_error)?;
    if let Some(found) = value.get("version").and_then(serde_json::Value::as_u64)
        && found != u64::from(SCHEMA_VERSION)
    {
        return Err(LoadError::UnsupportedVersion {
            path: path.to_path_buf(),
            found,
        });
    }
    serde_json::from_value(value).map_err(json_error)
}

/// Parse an authored key and insist it is already in canonical form.
fn canonical_key(authored: &str, path: &Path) -> Result<VerseKey, LoadError> {
    let key = VerseKey::parse(authored).map_err(|source| LoadError::InvalidKey {
        path: path.to_path_buf(),
        source,
    })?;
    let expected = key.to_string();
    if expected != authored {
        return Err(LoadError::NonCanonicalKey {
            path: path.to_path_buf(),
            key: authored.to_string(),
            expected,
        });
    }
    Ok(key)
}

fn check_entry(
    key: &VerseKey,
    interlinks: &VerseInterlinks,
    path: &Path,
    data: &DataConfig,
    warnings: &mut Vec<String>,
) -> Result<(), LoadError> {
    if interlinks.related_texts.is_empty() {
        record(warnings, format!("{key}: entry has no related texts"));
    }

    for citation in interlinks.missing_citations() {
        if data.strict_citations {
            return Err(LoadError::MissingCitation {
                path: path.to_path_buf(),
                key: key.clone(),
                citation,
            });
        }
        record(
            warnings,
            format!("{key}: citation {citation:?} is not listed in cross_references"),
        );
    }

    for theme in &interlinks.themes {
        if theme.trim().is_empty() {
            record(warnings, format!("{key}: blank theme"));
        } else if slugify(theme).is_empty() {
            record(
                warnings,
                format!("{key}: theme {theme:?} has no letters or digits and gets no page"),
            );
        } else if *theme != theme.to_lowercase() {
            record(
                warnings,
                format!("{key}: theme {theme:?} is not lowercase and only matches exactly"),
            );
        }
    }
    Ok(())
}

/// Warn about distinct themes that would share one theme page.
///
/// Pages go to the first theme in sorted order; the others are listed
/// without a link.
fn check_theme_slugs(entries: &[(VerseKey, VerseInterlinks)], warnings: &mut Vec<String>) {
    let themes: BTreeSet<&String> = entries.iter().flat_map(|(_, v)| &v.themes).collect();
    let mut owners: HashMap<String, &String> = HashMap::new();
    for theme in themes {
        let slug = slugify(theme);
        if slug.is_empty() {
            continue;
        }
        if let Some(owner) = owners.get(&slug) {
            record(
                warnings,
                format!("theme {theme:?} shares page {slug:?} with theme {owner:?}"),
            );
        } else {
            owners.insert(slug, theme);
        }
    }
}

/// Fill empty `seo_description`s once every entry is known, so the summary
/// can use the authored citation of the verse itself.
fn fill_seo_descriptions(entries: &mut [(VerseKey, VerseInterlinks)]) {
    let labels = citation_labels(entries.iter().map(|(_, v)| v));
    for (key, interlinks) in entries.iter_mut() {
        if interlinks.seo_description.trim().is_empty() {
            let label = labels.get(key).cloned().unwrap_or_else(|| key.label());
            interlinks.seo_description = interlinks.generated_seo_description(&label);
        }
    }
}

fn record(warnings: &mut Vec<String>, message: String) {
    warn!("{message}");
    warnings.push(message);
}

/// Canonical document for an index: one document, entries in index order.
///
/// Loading the serialized document back yields an equal index.
pub fn export_document(index: &InterlinkIndex) -> InterlinkDocument {
    InterlinkDocument {
        version: SCHEMA_VERSION,
        entries: index
            .iter()
            .map(|(key, interlinks)| InterlinkEntry::from_parts(key, interlinks))
            .collect(),
    }
}

/// Pretty JSON of [`export_document`].
pub fn export_json(index: &InterlinkIndex) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&export_document(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Tradition;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, json: &str) {
        fs::write(dir.join(name), json).unwrap();
    }

    fn related_json(tradition: &str, reference: &str) -> String {
        format!(
            r#"{{ "tradition": "{tradition}", "reference": "{reference}", "title": "t",
                 "description": "d", "relevance": "parallel" }}"#
        )
    }

    fn doc(entries: &[String]) -> String {
        format!(r#"{{ "version": 1, "entries": [{}] }}"#, entries.join(","))
    }

    fn entry_json(key: &str, tradition: &str, reference: &str, cross: &str) -> String {
        format!(
            r#"{{ "key": "{key}", "related_texts": [{}], "cross_references": [{cross}],
                 "themes": ["prayer"], "keywords": ["Prayer"], "seo_description": "s" }}"#,
            related_json(tradition, reference)
        )
    }

    // =========================================================================
    // Fixture directory
    // =========================================================================

    #[test]
    fn load_site_reads_fixture_content() {
        let tmp = setup_fixtures();
        let (config, data) = load_site(tmp.path()).unwrap();

        assert_eq!(config.site.title, "Fixture Interlinks");
        assert_eq!(data.files.len(), 2);
        assert_eq!(
            key_strings(&data.index.all_interlinked_verses()),
            vec![
                "quran-1-1",
                "quran-112-1",
                "bible-matthew-6-9",
                "torah-deuteronomy-6-4",
            ]
        );
        assert!(data.warnings.is_empty(), "{:?}", data.warnings);
    }

    #[test]
    fn fixture_quran_entry_matches_authored_data() {
        let tmp = setup_fixtures();
        let (_, data) = load_site(tmp.path()).unwrap();
        let entry = data
            .index
            .verse_interlinks(Tradition::Quran, "1:1")
            .unwrap();
        assert_eq!(entry.related_texts[0].reference, "Matthew 6:9");
        assert!(
            entry
                .cross_references
                .contains(&"Bible Matthew 6:9".to_string())
        );
    }

    #[test]
    fn hidden_and_non_json_files_are_skipped() {
        let tmp = setup_fixtures();
        let data_dir = tmp.path().join("data");
        write(&data_dir, ".draft.json", "not json at all");
        write(&data_dir, "notes.txt", "scratch");
        let (_, data) = load_site(tmp.path()).unwrap();
        assert_eq!(data.files.len(), 2);
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    #[test]
    fn files_load_in_name_order() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "020-b.json",
            &doc(&[entry_json("bible-john-1-1", "quran", "2:255", r#""Quran 2:255""#)]),
        );
        write(
            tmp.path(),
            "010-a.json",
            &doc(&[entry_json("quran-2-255", "bible", "John 1:1", r#""Bible John 1:1""#)]),
        );
        let data = load_index(tmp.path(), &DataConfig::default()).unwrap();
        assert_eq!(
            key_strings(&data.index.all_interlinked_verses()),
            vec!["quran-2-255", "bible-john-1-1"]
        );
    }

    #[test]
    fn single_file_path_is_accepted() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "one.json",
            &doc(&[entry_json("quran-2-255", "bible", "John 1:1", r#""Bible John 1:1""#)]),
        );
        let data = load_index(&tmp.path().join("one.json"), &DataConfig::default()).unwrap();
        assert_eq!(data.index.len(), 1);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn missing_directory_is_no_data() {
        let tmp = TempDir::new().unwrap();
        let result = load_index(&tmp.path().join("nope"), &DataConfig::default());
        assert!(matches!(result, Err(LoadError::NoData(_))));
    }

    #[test]
    fn empty_directory_is_no_data() {
        let tmp = TempDir::new().unwrap();
        let result = load_index(tmp.path(), &DataConfig::default());
        assert!(matches!(result, Err(LoadError::NoData(_))));
    }

    #[test]
    fn non_canonical_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &doc(&[entry_json("quran-1:1", "bible", "Matthew 6:9", r#""Bible Matthew 6:9""#)]),
        );
        match load_index(tmp.path(), &DataConfig::default()) {
            Err(LoadError::NonCanonicalKey { key, expected, .. }) => {
                assert_eq!(key, "quran-1:1");
                assert_eq!(expected, "quran-1-1");
            }
            other => panic!("expected NonCanonicalKey, got {other:?}"),
        }
    }

    #[test]
    fn unknown_tradition_in_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &doc(&[entry_json("gita-2-47", "bible", "Matthew 6:9", r#""Bible Matthew 6:9""#)]),
        );
        assert!(matches!(
            load_index(tmp.path(), &DataConfig::default()),
            Err(LoadError::InvalidKey {
                source: KeyError::UnknownTradition(_),
                ..
            })
        ));
    }

    #[test]
    fn unknown_tradition_in_related_text_is_a_json_error() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &doc(&[entry_json("quran-1-1", "gita", "2:47", r#""Gita 2:47""#)]),
        );
        assert!(matches!(
            load_index(tmp.path(), &DataConfig::default()),
            Err(LoadError::Json { .. })
        ));
    }

    #[test]
    fn duplicate_keys_across_files_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let entry = entry_json("quran-1-1", "bible", "Matthew 6:9", r#""Bible Matthew 6:9""#);
        write(tmp.path(), "010-a.json", &doc(std::slice::from_ref(&entry)));
        write(tmp.path(), "020-b.json", &doc(&[entry]));
        match load_index(tmp.path(), &DataConfig::default()) {
            Err(LoadError::DuplicateKey { key, first, second }) => {
                assert_eq!(key.to_string(), "quran-1-1");
                assert!(first.ends_with("010-a.json"));
                assert!(second.ends_with("020-b.json"));
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_keys_within_one_file_name_that_file_twice() {
        let tmp = TempDir::new().unwrap();
        let entry = entry_json("quran-1-1", "bible", "Matthew 6:9", r#""Bible Matthew 6:9""#);
        write(tmp.path(), "010-a.json", &doc(&[entry.clone(), entry]));
        match load_index(tmp.path(), &DataConfig::default()) {
            Err(LoadError::DuplicateKey { first, second, .. }) => {
                assert!(first.ends_with("010-a.json"));
                assert_eq!(first, second);
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_version_is_reported_before_shape() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.json", r#"{ "version": 2, "verses": {} }"#);
        assert!(matches!(
            load_index(tmp.path(), &DataConfig::default()),
            Err(LoadError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn unknown_entry_field_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            r#"{ "version": 1, "entries": [ { "key": "quran-1-1", "related_texts": [], "tags": [] } ] }"#,
        );
        assert!(matches!(
            load_index(tmp.path(), &DataConfig::default()),
            Err(LoadError::Json { .. })
        ));
    }

    // =========================================================================
    // Citations, warnings, SEO fill
    // =========================================================================

    #[test]
    fn missing_citation_warns_by_default() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &doc(&[entry_json("quran-1-1", "bible", "Matthew 6:9", "")]),
        );
        let data = load_index(tmp.path(), &DataConfig::default()).unwrap();
        assert_eq!(data.warnings.len(), 1);
        assert!(data.warnings[0].contains("Bible Matthew 6:9"));
    }

    #[test]
    fn missing_citation_fails_when_strict() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &doc(&[entry_json("quran-1-1", "bible", "Matthew 6:9", "")]),
        );
        let strict = DataConfig {
            strict_citations: true,
            ..DataConfig::default()
        };
        assert!(matches!(
            load_index(tmp.path(), &strict),
            Err(LoadError::MissingCitation { .. })
        ));
    }

    #[test]
    fn mixed_case_theme_warns_but_loads() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            r#"{ "version": 1, "entries": [ {
                "key": "quran-1-1", "related_texts": [], "themes": ["Prayer"]
            } ] }"#,
        );
        let data = load_index(tmp.path(), &DataConfig::default()).unwrap();
        // One for the empty related_texts, one for the theme
        assert_eq!(data.warnings.len(), 2);
        assert_eq!(data.index.interlinks_by_theme("Prayer").len(), 1);
        assert!(data.index.interlinks_by_theme("prayer").is_empty());
    }

    #[test]
    fn theme_without_letters_or_digits_warns() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &format!(
                r#"{{ "version": 1, "entries": [ {{
                    "key": "quran-1-1", "related_texts": [{}],
                    "cross_references": ["Bible Matthew 6:9"], "themes": ["../..", "prayer"]
                }} ] }}"#,
                related_json("bible", "Matthew 6:9")
            ),
        );
        let data = load_index(tmp.path(), &DataConfig::default()).unwrap();
        assert_eq!(data.warnings.len(), 1, "{:?}", data.warnings);
        assert!(data.warnings[0].contains("gets no page"));
    }

    #[test]
    fn themes_sharing_a_page_warn() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &doc(&[
                entry_json("quran-1-1", "bible", "Matthew 6:9", r#""Bible Matthew 6:9""#),
                entry_json("quran-1-2", "bible", "Matthew 6:10", r#""Bible Matthew 6:10""#)
                    .replace(r#""themes": ["prayer"]"#, r#""themes": ["prayer!"]"#),
            ]),
        );
        let data = load_index(tmp.path(), &DataConfig::default()).unwrap();
        assert_eq!(data.warnings.len(), 1, "{:?}", data.warnings);
        assert!(data.warnings[0].contains(r#"theme "prayer!" shares page "prayer""#));
    }

    #[test]
    fn generated_seo_description_uses_authored_citation() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &doc(&[
                entry_json("quran-1-1", "bible", "Matthew 6:9", r#""Bible Matthew 6:9""#)
                    .replace(r#""seo_description": "s""#, r#""seo_description": """#),
                entry_json("bible-matthew-6-9", "quran", "1:1", r#""Quran 1:1""#),
            ]),
        );
        let data = load_index(tmp.path(), &DataConfig::default()).unwrap();
        let entry = find_entry(&data.index, "quran-1-1");
        assert!(
            entry.seo_description.starts_with("Cross-references for Quran 1:1 with"),
            "{}",
            entry.seo_description
        );
    }

    #[test]
    fn empty_seo_description_is_generated() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.json",
            &format!(
                r#"{{ "version": 1, "entries": [ {{
                    "key": "quran-1-1", "related_texts": [{}],
                    "cross_references": ["Bible Matthew 6:9"], "themes": ["prayer"]
                }} ] }}"#,
                related_json("bible", "Matthew 6:9")
            ),
        );
        let data = load_index(tmp.path(), &DataConfig::default()).unwrap();
        let entry = find_entry(&data.index, "quran-1-1");
        assert_eq!(
            entry.seo_description,
            // Nothing cites quran-1-1, so the key label stands in
            "Cross-references for Quran 1-1 with Bible Matthew 6:9. Themes: prayer."
        );
    }

    // =========================================================================
    // Export
    // =========================================================================

    #[test]
    fn export_then_reload_gives_equal_index() {
        let tmp = setup_fixtures();
        let (config, data) = load_site(tmp.path()).unwrap();

        let out = TempDir::new().unwrap();
        let exported = export_json(&data.index).unwrap();
        write(out.path(), "all.json", &exported);

        let reloaded = load_index(out.path(), &config.data).unwrap();
        let original: Vec<_> = data.index.iter().collect();
        let again: Vec<_> = reloaded.index.iter().collect();
        assert_eq!(original, again);
        assert_eq!(reloaded.index.stats(), data.index.stats());
    }

    #[test]
    fn export_is_deterministic() {
        let index = fixture_index();
        assert_eq!(export_json(&index).unwrap(), export_json(&index).unwrap());
        assert_eq!(export_document(&index).version, SCHEMA_VERSION);
        assert_eq!(export_document(&index).entries[0].key, "quran-1-1");
    }
}
