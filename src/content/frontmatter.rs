//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Marker separating the excerpt from the rest of the body
pub const EXCERPT_SEPARATOR: &str = "<!-- more -->";

/// Custom deserializer for `featuredpost`: only a real YAML boolean `true`
/// marks an item as featured. Strings like `"true"` (which CMS exports
/// sometimes produce) are not featured and must not fail the parse.
fn strict_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(matches!(value, serde_yaml::Value::Bool(true)))
}

/// Front-matter data from an update or page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub templatekey: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub featuredimage: Option<String>,
    #[serde(deserialize_with = "strict_bool", default)]
    pub featuredpost: bool,

    /// Additional custom fields (navigation blocks, embed settings, ...)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            templatekey: None,
            title: None,
            date: None,
            description: None,
            featuredimage: None,
            featuredpost: false,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content).
    ///
    /// Strict variant: a delimited metadata block that is not valid YAML is
    /// an error. Collection scans use this and skip the offending file.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start();

        if !content.starts_with("---") {
            return Ok((FrontMatter::default(), content));
        }

        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading --- may also be a markdown thematic break. Only treat the
        // block as metadata when it has at least one "key: value" line.
        if !has_yaml_structure(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    /// Lenient variant: an unparsable metadata block yields empty
    /// front-matter with the whole text as body. Single-item lookups
    /// (home, events, settings) use this so one bad edit in the CMS does
    /// not blank the page.
    pub fn parse_lenient(content: &str) -> (Self, &str) {
        match Self::parse(content) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("invalid front-matter, treating as content: {}", e);
                (FrontMatter::default(), content.trim_start())
            }
        }
    }

    /// Extract the excerpt: the text before the first `<!-- more -->`
    /// marker, or None when the marker is absent.
    pub fn split_excerpt(body: &str) -> Option<&str> {
        body.find(EXCERPT_SEPARATOR)
            .map(|pos| body[..pos].trim())
    }
}

/// Check whether a candidate metadata block looks like YAML key/value pairs
fn has_yaml_structure(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        if let Some(colon_pos) = trimmed.find(':') {
            let before_colon = &trimmed[..colon_pos];
            let is_valid_key = !before_colon.is_empty()
                && before_colon
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                && before_colon != "http"
                && before_colon != "https"
                && before_colon != "ftp";
            if is_valid_key {
                let after_colon = &trimmed[colon_pos + 1..];
                return after_colon.is_empty() || after_colon.starts_with(' ');
            }
        }
        false
    })
}
