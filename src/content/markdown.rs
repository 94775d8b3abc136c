//! Markdown rendering with custom widget tags preserved
//!
//! Newsletter bodies embed a handful of custom inline elements (rendered
//! client-side by the site theme). The markdown engine does not know these
//! element names and would fold them into paragraph reflow, so each
//! occurrence is swapped for an opaque placeholder word before conversion
//! and restored byte-identical afterwards.

use pulldown_cmark::{html, Options, Parser};

/// Custom widget tags that must survive conversion unaltered
pub const CUSTOM_TAGS: [&str; 5] = [
    "vertical-tiles-grid",
    "post-grid",
    "newsletter-signup",
    "featured-products",
    "calendly-button",
];

/// Image title directives recognized by the `#`-title convention,
/// mapped to wrapper classes. `=` and `:` notation are interchangeable.
const IMAGE_DIRECTIVES: [(&str, &str, &str); 4] = [
    ("position", "relative", "relative"),
    ("float", "right", "float-right"),
    ("width", "50%", "w-1/2"),
    ("margin", "0 0 20px 20px", "mb-5 ml-5"),
];

/// Markdown renderer for newsletter content
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render markdown to HTML, preserving custom widget tags
    pub fn render(&self, markdown: &str) -> String {
        let (masked, saved) = mask_custom_tags(markdown);

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(&masked, options);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        // All post-processing happens while the widgets are still masked,
        // so markup inside a widget stays byte-identical
        let html_output = rewrite_directive_images(&html_output);
        let html_output = strip_empty_paragraphs(&html_output);
        let html_output = insert_clear_float(&html_output, &saved);
        restore_custom_tags(html_output, &saved)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder(n: usize) -> String {
    // Trailing X keeps token 1 from matching as a prefix of token 10
    format!("CUSTOMTAGTOKEN{}X", n)
}

/// Replace each well-formed custom tag occurrence with a placeholder word.
/// Returns the masked text and the captured originals in placeholder order.
fn mask_custom_tags(src: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(src.len());
    let mut saved: Vec<String> = Vec::new();
    let mut rest = src;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(len) = match_custom_tag(tail) {
            out.push_str(&placeholder(saved.len()));
            saved.push(tail[..len].to_string());
            rest = &tail[len..];
        } else {
            // Not a well-formed custom tag, leave the literal text to the
            // standard markdown path
            out.push('<');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);

    (out, saved)
}

/// Try to match a custom tag at the start of `tail` (which begins with '<').
/// Returns the byte length of the whole capture: either a self-closing tag
/// or an open tag through the first close tag of the same name. Nesting of
/// same-named tags is deliberately not honored.
fn match_custom_tag(tail: &str) -> Option<usize> {
    let after_bracket = &tail[1..];
    let name = CUSTOM_TAGS
        .iter()
        .copied()
        .find(|name| starts_with_tag_name(after_bracket, name))?;

    // The attribute span runs to the first '>'
    let after_name = &after_bracket[name.len()..];
    let gt = after_name.find('>')?;
    let open_len = 1 + name.len() + gt + 1;

    if after_name[..gt].ends_with('/') {
        return Some(open_len);
    }

    let close = format!("</{}>", name);
    let close_pos = find_ci(&tail[open_len..], &close)?;
    Some(open_len + close_pos + close.len())
}

fn starts_with_tag_name(s: &str, name: &str) -> bool {
    if s.len() < name.len() || !s.as_bytes()[..name.len()].eq_ignore_ascii_case(name.as_bytes()) {
        return false;
    }
    // Tag name must end at a boundary, not be a prefix of a longer name
    matches!(
        s.as_bytes().get(name.len()),
        Some(b'>') | Some(b'/') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')
    )
}

/// Case-insensitive substring search (ASCII)
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    h.windows(n.len()).position(|w| w.eq_ignore_ascii_case(n))
}

/// Substitute placeholders back with their captured text, in order
fn restore_custom_tags(mut html: String, saved: &[String]) -> String {
    for (i, original) in saved.iter().enumerate() {
        html = html.replacen(&placeholder(i), original, 1);
    }
    html
}

/// Wrap `<img>` elements whose title carries `#`-prefixed CSS directives
fn rewrite_directive_images(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = find_ci(rest, "<img") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let Some(gt) = tail.find('>') else {
            out.push_str(tail);
            return out;
        };
        out.push_str(&rewrite_img_tag(&tail[..gt + 1]));
        rest = &tail[gt + 1..];
    }
    out.push_str(rest);
    out
}

fn rewrite_img_tag(tag: &str) -> String {
    let (Some(src), Some(title)) = (attr_value(tag, "src"), attr_value(tag, "title")) else {
        return tag.to_string();
    };
    let Some(directives) = title.strip_prefix('#') else {
        return tag.to_string();
    };
    if directives.is_empty() {
        return tag.to_string();
    }

    let mut classes: Vec<&str> = Vec::new();
    for (key, value, class) in IMAGE_DIRECTIVES {
        let colon = format!("{}:{}", key, value);
        let equals = format!("{}={}", key, value);
        if directives.contains(&colon) || directives.contains(&equals) {
            classes.push(class);
        }
    }

    // Unrecognized directives are ignored; the title attribute is dropped
    format!(
        r#"<div class="{}"><img src="{}" alt="" class="w-full h-auto"></div>"#,
        classes.join(" "),
        src
    )
}

/// Extract a double-quoted attribute value from a single tag's text
fn attr_value(tag: &str, name: &str) -> Option<String> {
    let needle = format!("{}=\"", name);
    let start = find_ci(tag, &needle)? + needle.len();
    let end = tag[start..].find('"')?;
    Some(tag[start..start + end].to_string())
}

/// Insert a clear-float marker before the first vertical tiles grid, which
/// otherwise sits beside any floated image above it. Runs on the masked
/// HTML and anchors on the placeholder, so a grid tag nested inside some
/// other widget's inner markup is never touched.
fn insert_clear_float(html: &str, saved: &[String]) -> String {
    let Some(idx) = saved
        .iter()
        .position(|tag| starts_with_tag_name(&tag[1..], "vertical-tiles-grid"))
    else {
        return html.to_string();
    };
    let Some(pos) = html.find(&placeholder(idx)) else {
        return html.to_string();
    };
    let insert_at = if html[..pos].ends_with("<p>") {
        pos - 3
    } else {
        pos
    };

    let mut out = String::with_capacity(html.len() + 32);
    out.push_str(&html[..insert_at]);
    out.push_str(r#"<div class="clear-both"></div>"#);
    out.push_str(&html[insert_at..]);
    out
}

/// Remove paragraph elements containing only whitespace
fn strip_empty_paragraphs(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find("<p>") {
        let after = &rest[pos + 3..];
        let ws = after.len() - after.trim_start().len();
        if after[ws..].starts_with("</p>") {
            out.push_str(&rest[..pos]);
            rest = &after[ws + 4..];
        } else {
            out.push_str(&rest[..pos + 3]);
            rest = after;
        }
    }
    out.push_str(rest);
    out
}
