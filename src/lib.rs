//! townpost: content pipeline for a local-events newsletter static site
//!
//! This crate discovers markdown content with front-matter, converts
//! bodies to HTML while preserving a fixed set of custom widget tags,
//! derives per-item metadata (slugs, reading time, dates, image base
//! paths), and serves ordered, filtered collections to page-rendering
//! consumers.

pub mod collection;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main townpost site handle
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Default content root (pages, home, settings)
    pub content_root: PathBuf,
    /// Content root for updates and events; same as `content_root`
    /// unless overridden in configuration
    pub updates_root: PathBuf,
}

impl Site {
    /// Create a new site instance from a directory, reading townpost.yml
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("townpost.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::from_config(base_dir, config))
    }

    /// Build a site from an already-loaded configuration
    pub fn from_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_root = base_dir.join(&config.content_dir);
        let updates_root = config
            .updates_dir
            .as_ref()
            .map(|d| base_dir.join(d))
            .unwrap_or_else(|| content_root.clone());

        Self {
            config,
            base_dir,
            content_root,
            updates_root,
        }
    }

    /// Point updates and events at an alternate content root. The other
    /// content types keep resolving under the default root.
    pub fn override_updates_root<P: AsRef<Path>>(&mut self, dir: P) {
        let dir = dir.as_ref();
        self.updates_root = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.base_dir.join(dir)
        };
    }

    /// Create a content repository for this site
    pub fn repository(&self) -> content::ContentRepository {
        content::ContentRepository::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roots_match() {
        let site = Site::from_config(PathBuf::from("/srv/site"), Default::default());
        assert_eq!(site.content_root, PathBuf::from("/srv/site/content"));
        assert_eq!(site.updates_root, site.content_root);
    }

    #[test]
    fn test_updates_root_override() {
        let mut site = Site::from_config(PathBuf::from("/srv/site"), Default::default());
        site.override_updates_root("tenants/riverton");
        assert_eq!(
            site.updates_root,
            PathBuf::from("/srv/site/tenants/riverton")
        );
        // The default root is untouched
        assert_eq!(site.content_root, PathBuf::from("/srv/site/content"));
    }
}
