//! Show a single update by slug

use anyhow::{bail, Result};

use crate::collection::Collection;
use crate::Site;

pub fn run(site: &Site, slug: &str) -> Result<()> {
    let repo = site.repository();
    let updates = Collection::updates(&repo);

    let Some(item) = updates.by_slug(slug) else {
        bail!("no update found for slug: {}", slug);
    };

    println!("slug:         {}", item.slug);
    println!("title:        {}", item.title());
    println!("date:         {}", item.formatted_date);
    println!("reading time: {} min", item.reading_time);
    println!("image base:   {}", item.image_base);
    if !item.excerpt.is_empty() {
        println!("excerpt:      {}", item.excerpt);
    }

    let (previous, next) = updates.adjacent(slug);
    if let Some(prev) = previous {
        println!("previous:     {}", prev.slug);
    }
    if let Some(next) = next {
        println!("next:         {}", next.slug);
    }

    println!("\n{}", item.content);
    Ok(())
}
