//! Content repository - scans content roots and derives item metadata

use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, ContentItem, ContentKind, FrontMatter, MarkdownRenderer};
use crate::helpers::{full_date, parse_date_string};
use crate::Site;

/// Words per minute used for reading time
const READING_SPEED: usize = 200;

/// Loads content items from the content roots
pub struct ContentRepository {
    content_root: PathBuf,
    updates_root: PathBuf,
    date_format: String,
    renderer: MarkdownRenderer,
}

impl ContentRepository {
    /// Create a repository from a site's resolved configuration
    pub fn new(site: &Site) -> Self {
        Self {
            content_root: site.content_root.clone(),
            updates_root: site.updates_root.clone(),
            date_format: site.config.date_format.clone(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Root directory for a content kind
    pub fn root_for(&self, kind: ContentKind) -> PathBuf {
        let base = if kind.uses_updates_root() {
            &self.updates_root
        } else {
            &self.content_root
        };
        base.join(kind.dir_name())
    }

    /// Scan a content kind's tree and return all items in traversal order.
    ///
    /// A missing root yields an empty collection. A file that fails to
    /// load is skipped; it never aborts the rest of the scan.
    pub fn scan(&self, kind: ContentKind) -> Vec<ContentItem> {
        let root = self.root_for(kind);
        if !root.exists() {
            tracing::warn!("content root {:?} does not exist", root);
            return Vec::new();
        }

        let files = markdown_files(&root);

        // Each file's parse and render is independent, so fan out
        let mut items: Vec<ContentItem> = files
            .par_iter()
            .filter_map(|path| match self.load_item(path, &root, kind) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::error!("skipping {:?}: {:#}", path, anyhow::Error::from(e));
                    None
                }
            })
            .collect();

        dedup_slugs(&mut items);
        items
    }

    /// Load a single-file content kind (home, events, settings).
    ///
    /// Uses lenient front-matter parsing: a malformed metadata block
    /// yields empty metadata rather than a missing page.
    pub fn load_single(&self, kind: ContentKind) -> Option<ContentItem> {
        let root = self.root_for(kind);
        let path = root.join("index.md");
        if !path.exists() {
            tracing::warn!("{} content {:?} does not exist", kind.dir_name(), path);
            return None;
        }

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("failed to read {:?}: {}", path, e);
                return None;
            }
        };
        let (front, body) = FrontMatter::parse_lenient(&text);
        Some(self.build_item(&path, &root, kind, front, body))
    }

    /// Load one file with strict front-matter parsing
    fn load_item(
        &self,
        path: &Path,
        root: &Path,
        kind: ContentKind,
    ) -> Result<ContentItem, ContentError> {
        let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (front, body) =
            FrontMatter::parse(&text).map_err(|source| ContentError::Frontmatter {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.build_item(path, root, kind, front, body))
    }

    fn build_item(
        &self,
        path: &Path,
        root: &Path,
        kind: ContentKind,
        front: FrontMatter,
        body: &str,
    ) -> ContentItem {
        let rel = path.strip_prefix(root).unwrap_or(path);
        let rel_dir = rel.parent().unwrap_or_else(|| Path::new(""));

        let slug = slug_for(kind, rel_dir);
        let image_base = {
            let dir = rel_dir.to_string_lossy().replace('\\', "/");
            if dir.is_empty() {
                ".".to_string()
            } else {
                dir
            }
        };

        let date = front.date.as_deref().and_then(parse_date_string);
        let formatted_date = date
            .as_ref()
            .map(|d| full_date(d, &self.date_format))
            .unwrap_or_default();

        let excerpt = FrontMatter::split_excerpt(body)
            .map(|e| e.to_string())
            .or_else(|| front.description.clone())
            .unwrap_or_default();

        let content = self.renderer.render(body);

        ContentItem {
            front,
            raw: body.to_string(),
            content,
            slug,
            excerpt,
            reading_time: reading_time(body),
            date,
            formatted_date,
            image_base,
            source: rel.to_string_lossy().replace('\\', "/"),
        }
    }

    /// Validate a content kind's tree without building a collection.
    /// Returns human-readable findings: unparsable files, duplicate
    /// slugs, updates without a usable date.
    pub fn audit(&self, kind: ContentKind) -> Vec<String> {
        let root = self.root_for(kind);
        if !root.exists() {
            return Vec::new();
        }

        let mut findings = Vec::new();
        let mut slug_sources: HashMap<String, String> = HashMap::new();

        for path in markdown_files(&root) {
            match self.load_item(&path, &root, kind) {
                Ok(item) => {
                    match slug_sources.entry(item.slug.clone()) {
                        Entry::Vacant(v) => {
                            v.insert(item.source.clone());
                        }
                        Entry::Occupied(o) => {
                            findings.push(format!(
                                "duplicate slug {}: {} shadowed by {}",
                                item.slug,
                                item.source,
                                o.get()
                            ));
                        }
                    }
                    if kind == ContentKind::Updates && item.date.is_none() {
                        findings.push(format!("{}: missing or unparsable date", item.source));
                    }
                }
                Err(e) => findings.push(format!("{:#}", anyhow::Error::from(e))),
            }
        }

        findings
    }
}

/// Enumerate markdown files beneath a root, in deterministic traversal order
fn markdown_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// Derive the canonical route path for an item from the directory
/// containing its source file, relative to the content-type root
fn slug_for(kind: ContentKind, rel_dir: &Path) -> String {
    match kind {
        ContentKind::Updates => {
            // Date-bucketed trees (2024/03/spring-fest) flatten to the
            // final directory name
            let last = rel_dir
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            collapse_slashes(&format!("/updates/{}/", last))
        }
        ContentKind::Pages => {
            let dir = rel_dir.to_string_lossy().replace('\\', "/");
            if dir.is_empty() || dir == "." {
                "/".to_string()
            } else {
                collapse_slashes(&format!("/{}/", dir))
            }
        }
        ContentKind::Home | ContentKind::Events | ContentKind::Settings => "/".to_string(),
    }
}

fn collapse_slashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_slash = false;
    for c in s.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

/// Reading time in whole minutes; an empty body reads in zero
fn reading_time(body: &str) -> usize {
    body.split_whitespace().count().div_ceil(READING_SPEED)
}

/// Drop items whose slug is already taken: first file in traversal order
/// wins, later ones are reported and skipped
fn dedup_slugs(items: &mut Vec<ContentItem>) {
    let mut seen: HashMap<String, String> = HashMap::new();
    items.retain(|item| match seen.entry(item.slug.clone()) {
        Entry::Vacant(v) => {
            v.insert(item.source.clone());
            true
        }
        Entry::Occupied(o) => {
            tracing::warn!(
                "duplicate slug {} from {}, keeping {}",
                item.slug,
                item.source,
                o.get()
            );
            false
        }
    });
}
