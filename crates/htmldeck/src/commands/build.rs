use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;
use crate::deck::Deck;
use crate::error::DeckError;
use crate::parser::Selectors;
use crate::render::html::render_document;

/// Result of restructuring one document.
#[derive(Debug)]
pub struct BuildOutput {
    pub html: String,
    /// `None` when the document had no container and was left as is
    pub slides: Option<usize>,
}

/// Rewrite `source` as a deck. A document without a content container is
/// returned unchanged.
pub fn restructure(source: &str, selectors: &Selectors) -> Result<BuildOutput> {
    match Deck::from_html(source, selectors) {
        Ok((doc, deck)) => Ok(BuildOutput {
            html: render_document(&doc, &deck),
            slides: Some(deck.len()),
        }),
        Err(DeckError::ContainerNotFound { selector }) => {
            tracing::warn!(%selector, "no content container found, nothing to build");
            Ok(BuildOutput {
                html: source.to_string(),
                slides: None,
            })
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run(file: &Path, output: Option<&Path>, quiet: bool) -> Result<()> {
    let selectors = Config::load_or_default().selectors()?;
    build_file(file, output, &selectors, quiet)
}

fn build_file(
    file: &Path,
    output: Option<&Path>,
    selectors: &Selectors,
    quiet: bool,
) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let built = restructure(&source, selectors)?;

    match output {
        Some(path) => {
            std::fs::write(path, &built.html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                match built.slides {
                    Some(n) => eprintln!(
                        "{} {} slide{} \u{2192} {}",
                        "Built".green().bold(),
                        n,
                        if n == 1 { "" } else { "s" },
                        path.display()
                    ),
                    None => eprintln!(
                        "{} copied {} unchanged",
                        "Skipped:".yellow().bold(),
                        file.display()
                    ),
                }
            }
        }
        None => print!("{}", built.html),
    }
    Ok(())
}
