use clap::{Parser, Subcommand};
use scripture_interlinks::index::InterlinkIndex;
use scripture_interlinks::key::{Tradition, VerseKey};
use scripture_interlinks::{config, fingerprint, load, output, render};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scripture-interlinks")]
#[command(about = "Cross-tradition interlinks between Quran, Bible and Torah verses")]
#[command(long_about = "\
Cross-tradition interlinks between Quran, Bible and Torah verses

The data asset maps a verse key to the related texts in other traditions,
their themes and keywords. Keys look like quran-1-1 or bible-matthew-6-9:
a tradition tag, then the reference lowercased with spaces, colons and
hyphens collapsed to single hyphens.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  └── data/                        # Interlink data, read in file-name order
      ├── 010-quran.json
      ├── 020-bible.json
      └── 030-torah.json

Run 'scripture-interlinks gen-config' to generate a documented config.toml.
Set RUST_LOG=info to see load diagnostics.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the interlinks for one verse
    Lookup {
        /// quran, bible or torah
        tradition: Tradition,
        /// Verse reference, e.g. "1:1" or "Matthew 6:9"
        reference: String,
    },
    /// List every interlinked verse in index order
    List,
    /// List verses tagged with a theme (exact match)
    Theme { theme: String },
    /// List verses whose keywords contain the given text (case-insensitive)
    Keyword { keyword: String },
    /// Show totals, the theme list and the data fingerprint
    Stats,
    /// Validate the data without generating anything
    Check,
    /// Render verse, theme and home pages plus a sitemap
    Generate,
    /// Print the canonical JSON document for the loaded index
    Export,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics go to stderr so stdout stays clean for command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (config, data) = load::load_site(&cli.source)?;
            output::print_check_output(&data, &cli.source.join(&config.data.dir));
            println!("==> Data is valid");
        }
        Command::Generate => {
            let (config, data) = load::load_site(&cli.source)?;
            println!("==> Generating HTML → {}", cli.output.display());
            let summary = render::generate(&data.index, &config, &cli.output)?;
            output::print_generate_output(&summary);
            println!(
                "==> Build complete: {} ({})",
                cli.output.display(),
                fingerprint::short_digest(&summary.digest)
            );
        }
        Command::Lookup {
            tradition,
            reference,
        } => {
            let index = load_index(&cli.source)?;
            let key = VerseKey::new(tradition, &reference);
            output::print_lookup(&key, index.lookup_key(&key));
        }
        Command::List => {
            let index = load_index(&cli.source)?;
            output::print_key_list("Verses", &index.all_interlinked_verses());
        }
        Command::Theme { theme } => {
            let index = load_index(&cli.source)?;
            let keys = index.interlinks_by_theme(&theme);
            output::print_key_list(&format!("Theme {theme}"), &keys);
        }
        Command::Keyword { keyword } => {
            let index = load_index(&cli.source)?;
            let keys = index.interlinks_by_keyword(&keyword);
            output::print_key_list(&format!("Keyword {keyword}"), &keys);
        }
        Command::Stats => {
            let index = load_index(&cli.source)?;
            let digest = fingerprint::index_digest(&index)?;
            output::print_stats(&index, &digest);
        }
        Command::Export => {
            let index = load_index(&cli.source)?;
            println!("{}", load::export_json(&index)?);
        }
    }

    Ok(())
}

/// Load the site and keep only the index; query commands ignore the rest.
fn load_index(source: &Path) -> Result<InterlinkIndex, load::LoadError> {
    let (_, data) = load::load_site(source)?;
    Ok(data.index)
}
