//! CLI output formatting.
//!
//! Every command has a `format_*` function returning `Vec<String>` (pure, no
//! I/O, easy to test) and a `print_*` wrapper that writes to stdout.
//!
//! Entities follow a two-level pattern: a header line with a positional index
//! and the key, then indented context lines.
//!
//! ## Lookup
//!
//! ```text
//! quran-1-1
//!     The opening verse of the Quran alongside the Lord's Prayer.
//!     Themes: prayer, praise
//!     Keywords: Opening Prayer, Bismillah
//!     001 The Lord's Prayer [parallel]
//!         Bible Matthew 6:9
//!     Cross-references: Bible Matthew 6:9
//! ```
//!
//! ## Check
//!
//! ```text
//! Data
//! 001 010-quran.json (2 entries)
//!     001 quran-1-1
//!     002 quran-112-1
//!
//! Warnings
//!     quran-112-1: theme "Tawhid" is not lowercase and only matches exactly
//!
//! 4 verses, 6 related texts, 6 cross-references, 4 themes
//! ```

use crate::index::InterlinkIndex;
use crate::key::VerseKey;
use crate::load::LoadedData;
use crate::render::GenerateSummary;
use crate::stats::InterlinkStats;
use crate::types::VerseInterlinks;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Format a single lookup. A miss is a normal outcome, not an error.
pub fn format_lookup(key: &VerseKey, entry: Option<&VerseInterlinks>) -> Vec<String> {
    let Some(entry) = entry else {
        return vec![format!("No interlinks for {key}")];
    };

    let mut lines = vec![key.to_string()];
    let ind = indent(1);
    if !entry.seo_description.is_empty() {
        lines.push(format!("{}{}", ind, truncate_desc(&entry.seo_description, 100)));
    }
    if !entry.themes.is_empty() {
        lines.push(format!("{}Themes: {}", ind, entry.themes.join(", ")));
    }
    if !entry.keywords.is_empty() {
        lines.push(format!("{}Keywords: {}", ind, entry.keywords.join(", ")));
    }
    for (i, text) in entry.related_texts.iter().enumerate() {
        lines.push(format!(
            "{}{} {} [{}]",
            ind,
            format_index(i + 1),
            text.title,
            text.relevance
        ));
        lines.push(format!("{}{}", indent(2), text.citation()));
    }
    if !entry.cross_references.is_empty() {
        lines.push(format!(
            "{}Cross-references: {}",
            ind,
            entry.cross_references.join(", ")
        ));
    }
    lines
}

/// Format a list of keys under a heading; an empty result says so.
pub fn format_key_list(heading: &str, keys: &[&VerseKey]) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", heading, keys.len())];
    if keys.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, key) in keys.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), key));
    }
    lines
}

/// Format the statistics snapshot with the data fingerprint.
pub fn format_stats(stats: &InterlinkStats, digest: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Verses: {}", stats.total_verses),
        format!("Related texts: {}", stats.total_related_texts),
        format!("Cross-references: {}", stats.total_cross_references),
        format!("Themes ({}):", stats.themes.len()),
    ];
    for theme in &stats.themes {
        lines.push(format!("{}{}", indent(1), theme));
    }
    lines.push(format!("Fingerprint: {}", digest));
    lines
}

// ============================================================================
// Check
// ============================================================================

/// Format the load summary: files with their keys, warnings, totals.
pub fn format_check_output(data: &LoadedData, data_root: &Path) -> Vec<String> {
    let mut lines = vec!["Data".to_string()];
    for (i, file) in data.files.iter().enumerate() {
        let shown = file
            .path
            .strip_prefix(data_root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&file.path);
        lines.push(format!(
            "{} {} ({} entries)",
            format_index(i + 1),
            shown.display(),
            file.keys.len()
        ));
        for (j, key) in file.keys.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), key));
        }
    }

    if !data.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &data.warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
    }

    lines.push(String::new());
    lines.push(data.index.stats().to_string());
    lines
}

// ============================================================================
// Generate
// ============================================================================

/// Format the generate summary: each written page, then totals.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec!["Home → index.html".to_string()];

    lines.push("Verses".to_string());
    for (i, (key, path)) in summary.verse_pages.iter().enumerate() {
        lines.push(format!("{}{} {} → {}", indent(1), format_index(i + 1), key, path));
    }

    if !summary.theme_pages.is_empty() {
        lines.push("Themes".to_string());
        for (i, (theme, path)) in summary.theme_pages.iter().enumerate() {
            lines.push(format!("{}{} {} → {}", indent(1), format_index(i + 1), theme, path));
        }
    }

    lines.push(format!("Sitemap → sitemap.xml ({} urls)", summary.sitemap_urls));
    lines.push(format!(
        "Generated {} verse pages, {} theme pages",
        summary.verse_pages.len(),
        summary.theme_pages.len()
    ));
    lines
}

// ============================================================================
// Print wrappers
// ============================================================================

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_lookup(key: &VerseKey, entry: Option<&VerseInterlinks>) {
    print_lines(format_lookup(key, entry));
}

pub fn print_key_list(heading: &str, keys: &[&VerseKey]) {
    print_lines(format_key_list(heading, keys));
}

pub fn print_stats(index: &InterlinkIndex, digest: &str) {
    print_lines(format_stats(index.stats(), digest));
}

pub fn print_check_output(data: &LoadedData, data_root: &Path) {
    print_lines(format_check_output(data, data_root));
}

pub fn print_generate_output(summary: &GenerateSummary) {
    print_lines(format_generate_output(summary));
}
