//! Content item model

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

use super::FrontMatter;

/// A content type with its own root directory and slug rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Newsletter issues, date-bucketed directories, flat slugs
    Updates,
    /// Site pages, slugs mirror the directory tree
    Pages,
    /// Home page content (single index.md)
    Home,
    /// Events page content (single index.md)
    Events,
    /// Site settings (single index.md, front-matter only)
    Settings,
}

impl ContentKind {
    /// Directory name beneath the content root
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentKind::Updates => "updates",
            ContentKind::Pages => "pages",
            ContentKind::Home => "home",
            ContentKind::Events => "events",
            ContentKind::Settings => "settings",
        }
    }

    /// Updates and events resolve under the configurable updates root;
    /// everything else always lives under the default content root
    pub fn uses_updates_root(&self) -> bool {
        matches!(self, ContentKind::Updates | ContentKind::Events)
    }
}

/// Errors from loading a single content file
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid front-matter in {path:?}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A parsed and rendered content item
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    /// Parsed front-matter
    pub front: FrontMatter,

    /// Raw markdown body (front-matter stripped)
    pub raw: String,

    /// Rendered HTML content with custom tags preserved
    pub content: String,

    /// Canonical route path, with leading and trailing slash
    pub slug: String,

    /// Excerpt text: explicit marker, else front-matter description
    pub excerpt: String,

    /// Reading time in whole minutes (200 words per minute)
    pub reading_time: usize,

    /// Parsed publication date
    pub date: Option<DateTime<Local>>,

    /// Long-form date string, empty when no usable date
    pub formatted_date: String,

    /// Directory of the source file relative to the content-type root,
    /// used to resolve relative image references
    pub image_base: String,

    /// Source file path relative to the content-type root
    pub source: String,
}

impl ContentItem {
    pub fn title(&self) -> &str {
        self.front.title.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.front.description.as_deref().unwrap_or("")
    }
}
