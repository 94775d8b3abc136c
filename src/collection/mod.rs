//! Collection query layer - ordered, filtered views over scanned content

use crate::content::{ContentItem, ContentKind, ContentRepository};

/// An ordered collection of content items of one kind
pub struct Collection {
    kind: ContentKind,
    items: Vec<ContentItem>,
}

impl Collection {
    /// All updates, sorted by date descending. Items without a usable
    /// date sort last; the sort is stable, so equal dates keep their
    /// traversal order.
    pub fn updates(repo: &ContentRepository) -> Self {
        let mut items = repo.scan(ContentKind::Updates);
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Self {
            kind: ContentKind::Updates,
            items,
        }
    }

    /// All pages, in directory-traversal order
    pub fn pages(repo: &ContentRepository) -> Self {
        Self {
            kind: ContentKind::Pages,
            items: repo.scan(ContentKind::Pages),
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact slug lookup, case-sensitive. The argument is normalized so
    /// `spring-fest`, `/updates/spring-fest` and `/updates/spring-fest/`
    /// all find the same update.
    pub fn by_slug(&self, slug: &str) -> Option<&ContentItem> {
        let slug = self.canonical_slug(slug);
        self.items.iter().find(|item| item.slug == slug)
    }

    /// Featured items in collection order, truncated to `limit`.
    /// Only items whose front-matter `featuredpost` is a real boolean
    /// true count as featured.
    pub fn featured(&self, limit: usize) -> Vec<&ContentItem> {
        self.items
            .iter()
            .filter(|item| item.front.featuredpost)
            .take(limit)
            .collect()
    }

    /// The items immediately before and after the given slug in this
    /// collection's order. An unknown slug yields (None, None).
    pub fn adjacent(&self, slug: &str) -> (Option<&ContentItem>, Option<&ContentItem>) {
        let slug = self.canonical_slug(slug);
        let Some(pos) = self.items.iter().position(|item| item.slug == slug) else {
            return (None, None);
        };
        let previous = pos.checked_sub(1).map(|i| &self.items[i]);
        let next = self.items.get(pos + 1);
        (previous, next)
    }

    /// Case-insensitive substring search over title, description and raw
    /// body, in collection order
    pub fn search(&self, query: &str) -> Vec<&ContentItem> {
        let query = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                let haystack = format!(
                    "{} {} {}",
                    item.title(),
                    item.description(),
                    item.raw
                )
                .to_lowercase();
                haystack.contains(&query)
            })
            .collect()
    }

    /// Grid selection: optionally featured-only, optionally excluding one
    /// slug, truncated to `limit`
    pub fn selection(
        &self,
        featured_only: bool,
        exclude_slug: Option<&str>,
        limit: usize,
    ) -> Vec<&ContentItem> {
        let exclude = exclude_slug.map(|s| self.canonical_slug(s));
        self.items
            .iter()
            .filter(|item| !featured_only || item.front.featuredpost)
            .filter(|item| exclude.as_deref() != Some(item.slug.as_str()))
            .take(limit)
            .collect()
    }

    /// Route path segments for static generation: updates yield the bare
    /// slug name, pages the slash-joined directory path ("" for the root)
    pub fn paths(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| match self.kind {
                ContentKind::Updates => item
                    .slug
                    .trim_start_matches("/updates")
                    .trim_matches('/')
                    .to_string(),
                _ => item.slug.trim_matches('/').to_string(),
            })
            .collect()
    }

    /// Normalize a slug argument to the stored form: leading and trailing
    /// slash, and the collection prefix for updates
    fn canonical_slug(&self, slug: &str) -> String {
        let trimmed = slug.trim_matches('/');
        if trimmed.is_empty() {
            return match self.kind {
                ContentKind::Updates => "/updates/".to_string(),
                _ => "/".to_string(),
            };
        }
        match self.kind {
            ContentKind::Updates if !trimmed.starts_with("updates/") && trimmed != "updates" => {
                format!("/updates/{}/", trimmed)
            }
            _ => format!("/{}/", trimmed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentItem, FrontMatter};
    use crate::helpers::parse_date_string;

    fn item(slug: &str, date: Option<&str>, title: &str, featured: bool) -> ContentItem {
        let front = FrontMatter {
            title: Some(title.to_string()),
            date: date.map(|d| d.to_string()),
            featuredpost: featured,
            ..Default::default()
        };
        ContentItem {
            front,
            raw: String::new(),
            content: String::new(),
            slug: slug.to_string(),
            excerpt: String::new(),
            reading_time: 0,
            date: date.and_then(parse_date_string),
            formatted_date: String::new(),
            image_base: ".".to_string(),
            source: format!("{}/index.md", slug.trim_matches('/')),
        }
    }

    fn sorted(mut items: Vec<ContentItem>) -> Collection {
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Collection {
            kind: ContentKind::Updates,
            items,
        }
    }

    fn sample() -> Collection {
        sorted(vec![
            item("/updates/oldest/", Some("2023-01-10"), "Oldest", true),
            item("/updates/middle/", Some("2024-02-20"), "Middle", false),
            item("/updates/newest/", Some("2024-06-01"), "Newest", true),
            item("/updates/undated/", None, "Undated", false),
        ])
    }

    #[test]
    fn test_sorted_newest_first() {
        let coll = sample();
        let slugs: Vec<_> = coll.items().iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec![
                "/updates/newest/",
                "/updates/middle/",
                "/updates/oldest/",
                "/updates/undated/"
            ]
        );
    }

    #[test]
    fn test_by_slug_normalizes() {
        let coll = sample();
        assert!(coll.by_slug("/updates/middle/").is_some());
        assert!(coll.by_slug("middle").is_some());
        assert!(coll.by_slug("/updates/middle").is_some());
        assert!(coll.by_slug("missing").is_none());
        // Case-sensitive match
        assert!(coll.by_slug("Middle").is_none());
    }

    #[test]
    fn test_featured_limit_and_strictness() {
        let coll = sample();
        let featured = coll.featured(3);
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|i| i.front.featuredpost));

        assert_eq!(coll.featured(1).len(), 1);
        assert_eq!(coll.featured(1)[0].title(), "Newest");
    }

    #[test]
    fn test_adjacent_edges() {
        let coll = sample();

        let (prev, next) = coll.adjacent("newest");
        assert!(prev.is_none());
        assert_eq!(next.map(|i| i.title()), Some("Middle"));

        let (prev, next) = coll.adjacent("undated");
        assert_eq!(prev.map(|i| i.title()), Some("Oldest"));
        assert!(next.is_none());

        let (prev, next) = coll.adjacent("nope");
        assert!(prev.is_none() && next.is_none());
    }

    #[test]
    fn test_search() {
        let mut coll = sample();
        coll.items[1].raw = "The brass band plays at the Bandstand.".to_string();
        let hits = coll.search("bandstand");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title(), "Middle");

        assert!(coll.search("zeppelin").is_empty());
    }

    #[test]
    fn test_selection_excludes_slug() {
        let coll = sample();
        let picked = coll.selection(true, Some("newest"), 3);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].title(), "Oldest");

        let picked = coll.selection(false, None, 2);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_paths() {
        let coll = sample();
        assert_eq!(coll.paths()[0], "newest");

        let pages = Collection {
            kind: ContentKind::Pages,
            items: vec![item("/about/team/", None, "Team", false), item("/", None, "Root", false)],
        };
        assert_eq!(pages.paths(), vec!["about/team".to_string(), String::new()]);
    }
}
