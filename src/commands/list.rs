//! List site content

use anyhow::{bail, Result};

use crate::collection::Collection;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let repo = site.repository();

    match content_type {
        "update" | "updates" => {
            let updates = Collection::updates(&repo);
            println!("Updates ({}):", updates.len());
            for item in updates.items() {
                println!(
                    "  {}  {}  {} ({} min)",
                    item.date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "????-??-??".to_string()),
                    item.slug,
                    item.title(),
                    item.reading_time
                );
            }
        }
        "page" | "pages" => {
            let pages = Collection::pages(&repo);
            println!("Pages ({}):", pages.len());
            for item in pages.items() {
                println!("  {}  {} [{}]", item.slug, item.title(), item.source);
            }
        }
        other => bail!("unknown content type: {}", other),
    }

    Ok(())
}
