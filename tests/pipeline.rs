//! End-to-end content pipeline tests over a temporary content tree

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use townpost::collection::Collection;
use townpost::config::SiteConfig;
use townpost::content::ContentKind;
use townpost::Site;

fn write(base: &Path, rel: &str, content: &str) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const WIDGET: &str =
    r#"<vertical-tiles-grid columns="3" source="updates">tiles</vertical-tiles-grid>"#;

fn sample_site() -> (TempDir, Site) {
    let dir = TempDir::new().unwrap();
    let base = dir.path();

    write(
        base,
        "content/updates/2024/03/spring-fest/index.md",
        &format!(
            r#"---
templatekey: update-post
title: Spring Festival
date: 2024-03-05
description: The river park opens for the season
featuredimage: festival.jpg
featuredpost: true
---

Opening weekend at the river park.

<!-- more -->

![](poster.jpg '#float:right width:50%')

{}
"#,
            WIDGET
        ),
    );

    let four_hundred_words = vec!["word"; 400].join(" ");
    write(
        base,
        "content/updates/2024/06/summer-fair/index.md",
        &format!(
            "---\ntitle: Summer Fair\ndate: 2024-06-20\ndescription: Rides and stalls\nfeaturedpost: \"true\"\n---\n\n{}\n",
            four_hundred_words
        ),
    );

    write(
        base,
        "content/updates/2022/12/winter-market/index.md",
        "---\ntitle: Winter Market\ndate: 2022-12-01\nfeaturedpost: true\n---\n\nMulled cider on the square.\n",
    );

    // Broken front-matter: skipped by collection scans
    write(
        base,
        "content/updates/2023/05/broken/index.md",
        "---\ntitle: [unclosed\n---\nBody.\n",
    );

    write(base, "content/pages/index.md", "---\ntitle: Welcome\n---\n\nHello.\n");
    write(
        base,
        "content/pages/about/team/index.md",
        "---\ntitle: The Team\n---\n\nWho we are.\n",
    );

    write(
        base,
        "content/home/index.md",
        "---\ntitle: Home\nherotext: This week in town\n---\n\nIntro.\n",
    );
    write(
        base,
        "content/settings/index.md",
        "---\nsitename: Riverton Weekly\nbrandcolor: \"#aa3355\"\n---\n",
    );

    let site = Site::from_config(base.to_path_buf(), SiteConfig::default());
    (dir, site)
}

#[test]
fn updates_sorted_newest_first_and_bad_file_skipped() {
    let (_dir, site) = sample_site();
    let updates = Collection::updates(&site.repository());

    let slugs: Vec<_> = updates.items().iter().map(|i| i.slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec![
            "/updates/summer-fair/",
            "/updates/spring-fest/",
            "/updates/winter-market/"
        ]
    );
}

#[test]
fn slugs_flatten_date_buckets_and_pages_mirror_tree() {
    let (_dir, site) = sample_site();
    let repo = site.repository();

    let updates = Collection::updates(&repo);
    assert!(updates.by_slug("/updates/spring-fest/").is_some());

    let pages = Collection::pages(&repo);
    let slugs: Vec<_> = pages.items().iter().map(|i| i.slug.as_str()).collect();
    assert!(slugs.contains(&"/"));
    assert!(slugs.contains(&"/about/team/"));
}

#[test]
fn featured_filter_is_strict() {
    let (_dir, site) = sample_site();
    let updates = Collection::updates(&site.repository());

    let featured = updates.featured(3);
    let titles: Vec<_> = featured.iter().map(|i| i.title()).collect();
    // Summer Fair has featuredpost: "true" (a string) and must not count
    assert_eq!(titles, vec!["Spring Festival", "Winter Market"]);

    assert!(updates.featured(1).len() <= 1);
}

#[test]
fn adjacent_edges() {
    let (_dir, site) = sample_site();
    let updates = Collection::updates(&site.repository());

    let (prev, next) = updates.adjacent("summer-fair");
    assert!(prev.is_none());
    assert_eq!(next.map(|i| i.title()), Some("Spring Festival"));

    let (prev, next) = updates.adjacent("winter-market");
    assert_eq!(prev.map(|i| i.title()), Some("Spring Festival"));
    assert!(next.is_none());

    let (prev, next) = updates.adjacent("not-a-slug");
    assert!(prev.is_none() && next.is_none());
}

#[test]
fn custom_tag_survives_and_directive_image_is_wrapped() {
    let (_dir, site) = sample_site();
    let updates = Collection::updates(&site.repository());
    let item = updates.by_slug("spring-fest").unwrap();

    assert!(item.content.contains(WIDGET), "widget must be byte-identical");
    assert!(item
        .content
        .contains(r#"<div class="float-right w-1/2"><img src="poster.jpg" alt="" class="w-full h-auto"></div>"#));
    assert!(item.content.contains(r#"<div class="clear-both"></div>"#));
}

#[test]
fn derived_metadata() {
    let (_dir, site) = sample_site();
    let updates = Collection::updates(&site.repository());

    let spring = updates.by_slug("spring-fest").unwrap();
    assert_eq!(spring.formatted_date, "March 5, 2024");
    assert_eq!(spring.image_base, "2024/03/spring-fest");
    assert_eq!(spring.excerpt, "Opening weekend at the river park.");

    let summer = updates.by_slug("summer-fair").unwrap();
    // No excerpt marker: falls back to the front-matter description
    assert_eq!(summer.excerpt, "Rides and stalls");
    assert_eq!(summer.reading_time, 2);
}

#[test]
fn missing_root_yields_empty_collection() {
    let dir = TempDir::new().unwrap();
    let site = Site::from_config(dir.path().to_path_buf(), SiteConfig::default());
    let updates = Collection::updates(&site.repository());
    assert!(updates.is_empty());
}

#[test]
fn single_file_kinds() {
    let (_dir, site) = sample_site();
    let repo = site.repository();

    let home = repo.load_single(ContentKind::Home).unwrap();
    assert_eq!(home.slug, "/");
    assert!(home.front.extra.contains_key("herotext"));

    let settings = repo.load_single(ContentKind::Settings).unwrap();
    assert!(settings.front.extra.contains_key("sitename"));
    assert!(settings.raw.is_empty());

    // Events content is absent in this tree
    assert!(repo.load_single(ContentKind::Events).is_none());
}

#[test]
fn single_file_lookup_is_lenient_about_frontmatter() {
    let (dir, site) = sample_site();
    write(
        dir.path(),
        "content/events/index.md",
        "---\ntitle: [unclosed\n---\nEmbed code here.\n",
    );

    let repo = site.repository();
    let events = repo.load_single(ContentKind::Events).unwrap();
    assert_eq!(events.front.title, None);
    assert!(events.raw.contains("Embed code here."));
}

#[test]
fn updates_root_override_only_moves_updates() {
    let (dir, mut site) = sample_site();
    write(
        dir.path(),
        "tenants/harborview/updates/2024/05/regatta/index.md",
        "---\ntitle: Regatta\ndate: 2024-05-12\n---\n\nBoats.\n",
    );

    site.override_updates_root("tenants/harborview");
    let repo = site.repository();

    let updates = Collection::updates(&repo);
    let slugs: Vec<_> = updates.items().iter().map(|i| i.slug.as_str()).collect();
    assert_eq!(slugs, vec!["/updates/regatta/"]);

    // Pages still come from the default content root
    let pages = Collection::pages(&repo);
    assert!(pages.by_slug("/about/team/").is_some());
}

#[test]
fn duplicate_slugs_first_in_traversal_order_wins() {
    let (dir, site) = sample_site();
    write(
        dir.path(),
        "content/updates/2021/08/spring-fest/index.md",
        "---\ntitle: The Older Spring Fest\ndate: 2021-08-01\n---\n\nOld one.\n",
    );

    let updates = Collection::updates(&site.repository());
    let matches: Vec<_> = updates
        .items()
        .iter()
        .filter(|i| i.slug == "/updates/spring-fest/")
        .collect();
    assert_eq!(matches.len(), 1);
    // 2021/... sorts before 2024/... in the walk, so the older file wins
    assert_eq!(matches[0].title(), "The Older Spring Fest");
}

#[test]
fn search_matches_title_description_and_body() {
    let (_dir, site) = sample_site();
    let updates = Collection::updates(&site.repository());

    assert_eq!(updates.search("MULLED CIDER").len(), 1);
    assert_eq!(updates.search("river park")[0].title(), "Spring Festival");
    assert!(updates.search("nothing-like-this").is_empty());
}

#[test]
fn paths_for_static_generation() {
    let (_dir, site) = sample_site();
    let repo = site.repository();

    let update_paths = Collection::updates(&repo).paths();
    assert_eq!(
        update_paths,
        vec!["summer-fair", "spring-fest", "winter-market"]
    );

    let page_paths = Collection::pages(&repo).paths();
    assert!(page_paths.contains(&String::new()));
    assert!(page_paths.contains(&"about/team".to_string()));
}

#[test]
fn audit_reports_problems() {
    let (_dir, site) = sample_site();
    let repo = site.repository();

    let findings = repo.audit(ContentKind::Updates);
    // The broken file is reported; everything else parses
    assert_eq!(findings.len(), 1);
    assert!(findings[0].contains("broken"));

    assert!(repo.audit(ContentKind::Pages).is_empty());
}
