//! Scaffold a new update

use anyhow::{bail, Result};
use chrono::Local;
use std::fs;

use crate::Site;

/// Create `updates/YYYY/MM/<slug>/index.md` under the updates root
pub fn run(site: &Site, title: &str) -> Result<()> {
    let now = Local::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("title produces an empty slug: {:?}", title);
    }

    let dir = site
        .updates_root
        .join("updates")
        .join(now.format("%Y").to_string())
        .join(now.format("%m").to_string())
        .join(&slug);
    let path = dir.join("index.md");

    if path.exists() {
        bail!("{:?} already exists", path);
    }

    fs::create_dir_all(&dir)?;
    let front_matter = format!(
        "---\ntemplatekey: update-post\ntitle: {}\ndate: {}\ndescription: \"\"\nfeaturedpost: false\n---\n\n",
        title,
        now.format("%Y-%m-%d")
    );
    fs::write(&path, front_matter)?;

    println!("Created {:?}", path);
    println!("Route: /updates/{}/", slug);
    Ok(())
}
