//! Print route paths for static generation

use anyhow::{bail, Result};

use crate::collection::Collection;
use crate::Site;

pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let repo = site.repository();

    let collection = match content_type {
        "update" | "updates" => Collection::updates(&repo),
        "page" | "pages" => Collection::pages(&repo),
        other => bail!("unknown content type: {}", other),
    };

    for path in collection.paths() {
        println!("{}", path);
    }
    Ok(())
}
