//! Search updates

use anyhow::Result;

use crate::collection::Collection;
use crate::Site;

pub fn run(site: &Site, query: &str) -> Result<()> {
    let repo = site.repository();
    let updates = Collection::updates(&repo);
    let hits = updates.search(query);

    println!("Matches for \"{}\" ({}):", query, hits.len());
    for item in hits {
        println!("  {}  {}", item.slug, item.title());
    }
    Ok(())
}
