//! Static HTML rendering of interlinks.
//!
//! Renders the "related texts across traditions" panel that content pages
//! embed, plus a small standalone site around it:
//!
//! ```text
//! dist/
//! ├── index.html                       # Every verse, grouped by tradition, plus themes
//! ├── sitemap.xml                      # Home, verse pages, theme pages
//! ├── verses/
//! │   ├── quran-1-1.html               # Verse page: panel + SEO description
//! │   └── bible-matthew-6-9.html
//! └── themes/
//!     └── prayer.html                  # Every verse carrying the theme
//! ```
//!
//! A verse without interlinks gets no panel at all ([`panel_for`] returns
//! `None`); nothing is rendered in its place.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating with
//! automatic escaping. Descriptions are Markdown, converted with pulldown-cmark.

use crate::config::{PanelConfig, SiteConfig};
use crate::fingerprint;
use crate::index::InterlinkIndex;
use crate::key::{Tradition, VerseKey, slugify};
use crate::types::VerseInterlinks;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What [`generate`] wrote, for CLI output.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// `(key, relative path)` per verse page, in index order.
    pub verse_pages: Vec<(VerseKey, String)>,
    /// `(theme, relative path)` per theme page, in theme order.
    pub theme_pages: Vec<(String, String)>,
    pub sitemap_urls: usize,
    pub digest: String,
}

const CSS: &str = include_str!("../static/style.css");

/// Site-relative path of a verse page.
pub fn verse_page_path(key: &VerseKey) -> String {
    format!("verses/{key}.html")
}

/// URL slug of a theme: letters and digits only, see [`slugify`].
pub fn theme_slug(theme: &str) -> String {
    slugify(theme)
}

/// Theme pages a site build writes, keyed by theme.
///
/// Built once per build from the index's sorted theme list. A theme gets a
/// page when its slug is non-empty and no earlier theme already claimed it,
/// so `Prayer` wins `themes/prayer.html` over `prayer`. Themes without a page
/// are still shown on verse pages, just not linked.
#[derive(Debug, Clone, Default)]
pub struct ThemePages {
    paths: BTreeMap<String, String>,
    skipped: Vec<String>,
}

impl ThemePages {
    pub fn new(index: &InterlinkIndex) -> Self {
        let mut pages = Self::default();
        let mut claimed = HashSet::new();
        for theme in &index.stats().themes {
            let slug = theme_slug(theme);
            if slug.is_empty() || !claimed.insert(slug.clone()) {
                pages.skipped.push(theme.clone());
                continue;
            }
            pages.paths.insert(theme.clone(), format!("themes/{slug}.html"));
        }
        pages
    }

    /// Site-relative path of the theme's page, if it has one.
    pub fn path(&self, theme: &str) -> Option<&str> {
        self.paths.get(theme).map(String::as_str)
    }

    /// `(theme, path)` in theme order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(t, p)| (t.as_str(), p.as_str()))
    }

    /// Themes left without a page.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

pub fn generate(
    index: &InterlinkIndex,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let digest = fingerprint::index_digest(index)?;
    let themes = ThemePages::new(index);
    let mut summary = GenerateSummary {
        digest: digest.clone(),
        ..Default::default()
    };

    for theme in themes.skipped() {
        warn!("theme {theme:?} has no usable slug of its own; page skipped");
    }

    fs::create_dir_all(output_dir.join("verses"))?;
    fs::create_dir_all(output_dir.join("themes"))?;

    let home = render_home_page(index, &themes, config, &digest);
    fs::write(output_dir.join("index.html"), home.into_string())?;

    for (key, interlinks) in index.iter() {
        let rel = verse_page_path(key);
        let page = render_verse_page(index, &themes, key, interlinks, config, &digest);
        fs::write(output_dir.join(&rel), page.into_string())?;
        summary.verse_pages.push((key.clone(), rel));
    }

    for (theme, rel) in themes.iter() {
        let page = render_theme_page(index, theme, config, &digest);
        fs::write(output_dir.join(rel), page.into_string())?;
        summary.theme_pages.push((theme.to_string(), rel.to_string()));
    }

    let sitemap = render_sitemap(index, &themes, config);
    summary.sitemap_urls = sitemap.matches("<url>").count();
    fs::write(output_dir.join("sitemap.xml"), sitemap)?;

    info!(
        verses = summary.verse_pages.len(),
        themes = summary.theme_pages.len(),
        output = %output_dir.display(),
        "generated interlink site"
    );
    Ok(summary)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    description: Option<&str>,
    config: &SiteConfig,
    digest: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                meta name="interlinks-version" content=(digest);
                title { (title) " · " (config.site.title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                header.site-header {
                    a href="/" { (config.site.title) }
                }
                (content)
            }
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Renders the related-texts panel for one verse.
///
/// Related verses that have their own entry in `index` are linked to their
/// verse page; themes are linked only when `themes` gives them a page.
pub fn render_related_panel(
    index: &InterlinkIndex,
    themes: &ThemePages,
    key: &VerseKey,
    interlinks: &VerseInterlinks,
    panel: &PanelConfig,
) -> Markup {
    let limit = panel.max_related.unwrap_or(usize::MAX);

    html! {
        section.related-texts data-verse=(key.to_string()) {
            h2 { (panel.heading) }
            @for text in interlinks.related_texts.iter().take(limit) {
                @let related_key = text.key();
                article.related-card {
                    h3 {
                        @if index.lookup_key(&related_key).is_some() {
                            a href={ "/" (verse_page_path(&related_key)) } { (text.title) }
                        } @else {
                            (text.title)
                        }
                    }
                    p.citation {
                        (text.citation()) " "
                        span.relevance { (text.relevance.label()) }
                    }
                    div.description { (PreEscaped(markdown_to_html(&text.description))) }
                    @if panel.show_keywords && !text.keywords.is_empty() {
                        ul.keywords {
                            @for keyword in &text.keywords {
                                li { (keyword) }
                            }
                        }
                    }
                }
            }
            @if !interlinks.cross_references.is_empty() {
                h3 { "Cross-references" }
                ul.cross-references {
                    @for citation in &interlinks.cross_references {
                        li { (citation) }
                    }
                }
            }
            @if !interlinks.themes.is_empty() {
                ul.themes {
                    @for theme in &interlinks.themes {
                        li {
                            @if let Some(path) = themes.path(theme) {
                                a href={ "/" (path) } { (theme) }
                            } @else {
                                (theme)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The panel for a verse as it appears in content, or `None` when the verse
/// has no interlinks and the panel should be omitted.
///
/// Theme links follow the same [`ThemePages`] a full build would write.
pub fn panel_for(
    index: &InterlinkIndex,
    tradition: Tradition,
    reference: &str,
    panel: &PanelConfig,
) -> Option<Markup> {
    let key = VerseKey::new(tradition, reference);
    let interlinks = index.lookup_key(&key)?;
    let themes = ThemePages::new(index);
    Some(render_related_panel(index, &themes, &key, interlinks, panel))
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the standalone page for one verse
pub fn render_verse_page(
    index: &InterlinkIndex,
    themes: &ThemePages,
    key: &VerseKey,
    interlinks: &VerseInterlinks,
    config: &SiteConfig,
    digest: &str,
) -> Markup {
    let title = index.display_label(key);
    let content = html! {
        main.verse-page {
            h1 { (title) }
            @if !interlinks.seo_description.is_empty() {
                p.summary { (interlinks.seo_description) }
            }
            (render_related_panel(index, themes, key, interlinks, &config.panel))
        }
    };
    let description = Some(interlinks.seo_description.as_str()).filter(|d| !d.is_empty());
    base_document(&title, description, config, digest, content)
}

/// Renders the page listing every verse with a theme
pub fn render_theme_page(
    index: &InterlinkIndex,
    theme: &str,
    config: &SiteConfig,
    digest: &str,
) -> Markup {
    let keys = index.interlinks_by_theme(theme);
    let content = html! {
        main.theme-page {
            h1 { "Theme: " (theme) }
            ul.verses {
                @for key in &keys {
                    li {
                        a href={ "/" (verse_page_path(key)) } { (index.display_label(key)) }
                    }
                }
            }
        }
    };
    base_document(theme, None, config, digest, content)
}

/// Renders the home page: verses grouped by tradition, then themes
pub fn render_home_page(
    index: &InterlinkIndex,
    themes: &ThemePages,
    config: &SiteConfig,
    digest: &str,
) -> Markup {
    let keys = index.all_interlinked_verses();
    let mut groups: Vec<(Tradition, Vec<&VerseKey>)> = Vec::new();
    for tradition in Tradition::ALL {
        let in_tradition: Vec<&VerseKey> = keys
            .iter()
            .copied()
            .filter(|k| k.tradition() == tradition)
            .collect();
        if !in_tradition.is_empty() {
            groups.push((tradition, in_tradition));
        }
    }
    let content = html! {
        main.index-page {
            h1 { (config.site.title) }
            p.stats { (index.stats().to_string()) }
            @for (tradition, in_tradition) in &groups {
                section.tradition {
                    h2 { (tradition.display_name()) }
                    ul.verses {
                        @for key in in_tradition {
                            li {
                                a href={ "/" (verse_page_path(key)) } { (index.display_label(key)) }
                            }
                        }
                    }
                }
            }
            @if !themes.is_empty() {
                section.theme-list {
                    h2 { "Themes" }
                    ul.themes {
                        @for (theme, path) in themes.iter() {
                            li {
                                a href={ "/" (path) } { (theme) }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document("Home", None, config, digest, content)
}

/// XML sitemap: the home page, every verse page, every theme page.
pub fn render_sitemap(index: &InterlinkIndex, themes: &ThemePages, config: &SiteConfig) -> String {
    let base = &config.site.base_url;
    let markup = html! {
        (PreEscaped(r#"<?xml version="1.0" encoding="UTF-8"?>"#))
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            url { loc { (base) "/" } }
            @for key in index.all_interlinked_verses() {
                url { loc { (base) "/" (verse_page_path(key)) } }
            }
            @for (_, path) in themes.iter() {
                url { loc { (base) "/" (path) } }
            }
        }
    };
    markup.into_string()
}

// ============================================================================
// Tests
// ============================================================================
