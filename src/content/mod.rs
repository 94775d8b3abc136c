//! Content module - front-matter, markdown conversion, and the repository

mod frontmatter;
mod item;
mod markdown;
pub mod repository;

pub use frontmatter::{FrontMatter, EXCERPT_SEPARATOR};
pub use item::{ContentError, ContentItem, ContentKind};
pub use markdown::{MarkdownRenderer, CUSTOM_TAGS};
pub use repository::ContentRepository;
