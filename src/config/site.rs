//! Site configuration (townpost.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,

    // Directory
    /// Default content root, relative to the site base directory
    pub content_dir: String,
    /// Alternate content root for the updates and events content types.
    /// Pages, home and settings always resolve under `content_dir`; this
    /// override exists so one site build can serve several newsletter
    /// tenants from their own content checkouts.
    pub updates_dir: Option<String>,

    // Date / Time format
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Townpost".to_string(),
            description: String::new(),
            url: "http://example.com".to_string(),

            content_dir: "content".to_string(),
            updates_dir: None,

            date_format: "%B %-d, %Y".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {:?}", path))?;
        Ok(config)
    }
}
