#![cfg(test)]

use std::fs;
use std::path::Path;

use crate::base_path::BasePath;
use crate::config::SiteConfig;
use crate::detail::DetailOutcome;
use crate::error::BuildError;
use crate::filter::{FilterState, PublicationsController};
use crate::loader::{FileSource, Resource};
use crate::page::Page;
use crate::pipeline::{open_listing, render_detail_page, render_home};
use crate::prerender::build_site;
use crate::sections::publications::{NOT_FOUND, NO_ID, NO_RESULTS};
use crate::sections::{
    RenderContext, ABOUT, CONTACT, EDUCATION, EXPERIENCE, FEATURED_PUBS, FILTER_QUERY, FILTER_TYPE,
    FILTER_YEAR, INTERESTS, LISTING_PAGE, PUB_DETAIL, PUB_LIST, SITE_FOOTER, SITE_HEADER, SOFTWARE,
};
use crate::theme::{MemoryStorage, Storage, Theme, ThemePreference, DEFAULT_ICON, OVERRIDE_ICON, THEME_KEY};

const PUBLICATIONS: &str = r#"[
    {"id":"a","title":"Graph X","authors":["Jane Doe"],"venue":"J","year":2021,"type":"journal",
     "abstract":"About graphs.","links":{"paper":"https://p/a"}},
    {"id":"b","title":"Graph Y","authors":["John Roe"],"venue":"C","year":2023,"type":"conference"}
]"#;

const PROFILE: &str = r#"{"name":"Jane Doe","role":"Researcher","org":"Lab","bio":"Works on graphs.",
    "location":"Boulder","links":[{"href":"https://gh.example/jane","label":"GitHub","icon":"bi bi-github"}]}"#;

const PROJECTS: &str = r#"[{"name":"vitae","href":"https://gh.example/vitae","desc":"Site renderer","stack":"Rust"}]"#;

const EXPERIENCE_DATA: &str = r#"[{"role":"Scientist","company":"Lab","location":"Boulder",
    "period":"2022 - Present","details":["Built things"]}]"#;

const EDUCATION_DATA: &str = r#"[{"degree":"PhD","school":"CU Boulder","year":2022}]"#;

const INTERESTS_DATA: &str = r#"[{"category":"Research","items":["Graphs","Genomics"]}]"#;

fn write_data(dir: &Path, publications: &str) {
    fs::create_dir_all(dir).unwrap();
    let files = [
        (Resource::Profile, PROFILE),
        (Resource::Publications, publications),
        (Resource::Projects, PROJECTS),
        (Resource::Experience, EXPERIENCE_DATA),
        (Resource::Education, EDUCATION_DATA),
        (Resource::Interests, INTERESTS_DATA),
    ];
    for (resource, body) in files {
        fs::write(dir.join(resource.file_name()), body).unwrap();
    }
}

fn ctx(depth: usize) -> RenderContext {
    let config = SiteConfig {
        owner: "Jane Doe".into(),
        ..SiteConfig::default()
    };
    RenderContext::new(BasePath::for_depth(depth), config)
}

fn listing_page(query: &str) -> Page {
    Page::new(&format!("/{}", LISTING_PAGE))
        .with_query(query)
        .with_mount(FILTER_QUERY)
        .with_mount(FILTER_YEAR)
        .with_mount(FILTER_TYPE)
        .with_mount(PUB_LIST)
}

fn visible_ids(controller: &PublicationsController) -> Vec<String> {
    controller.visible().iter().map(|p| p.id.clone()).collect()
}

// ═══════════════════════════════════════════════════════════
// Publications listing
// ═══════════════════════════════════════════════════════════

#[tokio::test]
async fn listing_filter_scenario() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), PUBLICATIONS);
    let source = FileSource::new(dir.path());
    let ctx = ctx(1);
    let mut page = listing_page("");

    let mut controller = open_listing(&mut page, &ctx, &source).await.unwrap();
    assert_eq!(visible_ids(&controller), vec!["b", "a"]);

    controller.set_query(&mut page, &ctx, "graph");
    assert_eq!(visible_ids(&controller), vec!["b", "a"]);
    let html = page.content(PUB_LIST).unwrap();
    assert!(html.find("Graph Y").unwrap() < html.find("Graph X").unwrap());

    controller.set_query(&mut page, &ctx, "jane");
    assert_eq!(visible_ids(&controller), vec!["a"]);
    assert!(!page.content(PUB_LIST).unwrap().contains("Graph Y"));

    controller.set_query(&mut page, &ctx, "");
    controller.set_year(&mut page, &ctx, "2021");
    assert_eq!(visible_ids(&controller), vec!["a"]);

    controller.set_year(&mut page, &ctx, "");
    controller.set_query(&mut page, &ctx, "zzz");
    assert!(controller.visible().is_empty());
    assert!(page.content(PUB_LIST).unwrap().contains(NO_RESULTS));
}

#[tokio::test]
async fn listing_state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), PUBLICATIONS);
    let source = FileSource::new(dir.path());
    let ctx = ctx(1);
    let mut page = listing_page("");

    let mut controller = open_listing(&mut page, &ctx, &source).await.unwrap();
    controller.set_query(&mut page, &ctx, "graph");
    controller.set_year(&mut page, &ctx, "2021");
    controller.set_type(&mut page, &ctx, "journal");
    assert_eq!(
        page.url(),
        "/publications/index.html?q=graph&year=2021&type=journal"
    );

    let mut reloaded = listing_page(page.query());
    let again = open_listing(&mut reloaded, &ctx, &source).await.unwrap();
    assert_eq!(again.state(), controller.state());
    assert_eq!(visible_ids(&again), vec!["a"]);
    assert!(reloaded
        .content(FILTER_YEAR)
        .unwrap()
        .contains("<option value=\"2021\" selected=\"selected\">"));
    assert!(reloaded.content(FILTER_QUERY).unwrap().contains("value=\"graph\""));

    // clearing every filter drops the query string entirely
    controller.set_state(&mut page, &ctx, FilterState::default());
    assert_eq!(page.url(), "/publications/index.html");
}

#[tokio::test]
async fn controls_follow_filter_changes() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), PUBLICATIONS);
    let source = FileSource::new(dir.path());
    let ctx = ctx(1);
    let mut page = listing_page("year=2021");

    let mut controller = open_listing(&mut page, &ctx, &source).await.unwrap();
    assert!(page.content(FILTER_QUERY).unwrap().contains("value=\"\""));

    controller.set_year(&mut page, &ctx, "2023");
    assert_eq!(page.url(), "/publications/index.html?year=2023");
    let years = page.content(FILTER_YEAR).unwrap();
    assert!(years.contains("<option value=\"2023\" selected=\"selected\">"));
    assert!(years.contains("<option value=\"2021\">2021</option>"));

    controller.set_type(&mut page, &ctx, "conference");
    assert!(page
        .content(FILTER_TYPE)
        .unwrap()
        .contains("<option value=\"conference\" selected=\"selected\">"));

    controller.set_query(&mut page, &ctx, "roe");
    assert!(page.content(FILTER_QUERY).unwrap().contains("value=\"roe\""));
    assert_eq!(visible_ids(&controller), vec!["b"]);
}

// ═══════════════════════════════════════════════════════════
// Publication detail
// ═══════════════════════════════════════════════════════════

#[tokio::test]
async fn detail_lookup_found_absent_and_missing() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), PUBLICATIONS);
    let source = FileSource::new(dir.path());
    let ctx = ctx(0);

    let mut page = Page::new("/publication.html").with_query("id=a").with_mount(PUB_DETAIL);
    let outcome = render_detail_page(&mut page, &ctx, &source).await.unwrap();
    assert_eq!(outcome, DetailOutcome::Rendered);
    let html = page.content(PUB_DETAIL).unwrap();
    assert!(html.contains("<h1>Graph X</h1>"));
    assert!(html.contains("About graphs."));
    assert!(!html.contains("Graph Y"));

    let mut page = Page::new("/publication.html").with_query("id=zzz").with_mount(PUB_DETAIL);
    let outcome = render_detail_page(&mut page, &ctx, &source).await.unwrap();
    assert_eq!(outcome, DetailOutcome::NotFound);
    let html = page.content(PUB_DETAIL).unwrap();
    assert!(html.contains(NOT_FOUND));
    assert!(!html.contains("Graph"));

    let mut page = Page::new("/publication.html").with_mount(PUB_DETAIL);
    let outcome = render_detail_page(&mut page, &ctx, &source).await.unwrap();
    assert_eq!(outcome, DetailOutcome::MissingId);
    assert!(page.content(PUB_DETAIL).unwrap().contains(NO_ID));
}

// ═══════════════════════════════════════════════════════════
// Home page
// ═══════════════════════════════════════════════════════════

const HOME_TEMPLATE: &str = "<html><head><title>Jane Doe</title></head><body>\n\
    <!-- BUILD:site-header -->\n<!-- /BUILD:site-header -->\n\
    <!-- BUILD:about -->\n<p>Loading...</p>\n<!-- /BUILD:about -->\n\
    <!-- BUILD:education -->\n<!-- /BUILD:education -->\n\
    <!-- BUILD:interests -->\n<!-- /BUILD:interests -->\n\
    <!-- BUILD:experience -->\n<p>Loading...</p>\n<!-- /BUILD:experience -->\n\
    <!-- BUILD:featured-pubs -->\n<!-- /BUILD:featured-pubs -->\n\
    <!-- BUILD:software -->\n<!-- /BUILD:software -->\n\
    <!-- BUILD:contact -->\n<!-- /BUILD:contact -->\n\
    <!-- BUILD:site-footer -->\n<!-- /BUILD:site-footer -->\n\
    </body></html>";

#[tokio::test]
async fn home_renders_every_section() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), PUBLICATIONS);
    let source = FileSource::new(dir.path());
    let mut page = Page::from_template("/index.html", HOME_TEMPLATE);

    render_home(&mut page, &ctx(0), &source).await.unwrap();

    assert!(page.content(ABOUT).unwrap().contains("Works on graphs."));
    assert!(page.content(EDUCATION).unwrap().contains("CU Boulder"));
    assert!(page.content(INTERESTS).unwrap().contains("Genomics"));
    assert!(page.content(EXPERIENCE).unwrap().contains("current"));
    assert!(page.content(SOFTWARE).unwrap().contains("Site renderer"));
    assert!(page.content(CONTACT).unwrap().contains("https://gh.example/jane"));
    // neither sample publication is featured
    assert!(!page.content(FEATURED_PUBS).unwrap().contains("pub-item"));
    assert!(page.content(SITE_FOOTER).unwrap().contains("Jane Doe."));

    let html = page.into_html();
    assert!(html.contains("<title>Jane Doe</title>"));
    assert!(!html.contains("Loading..."));
}

#[tokio::test]
async fn failed_aggregate_leaves_sections_untouched() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), PUBLICATIONS);
    fs::remove_file(dir.path().join(Resource::Interests.file_name())).unwrap();
    let source = FileSource::new(dir.path());
    let mut page = Page::from_template("/index.html", HOME_TEMPLATE);

    let err = render_home(&mut page, &ctx(0), &source).await.unwrap_err();
    assert_eq!(err.resource, Resource::Interests);

    assert_eq!(page.content(ABOUT), Some("<p>Loading...</p>"));
    assert_eq!(page.content(EXPERIENCE), Some("<p>Loading...</p>"));
    assert_eq!(page.content(SOFTWARE), Some(""));
    assert_eq!(page.content(CONTACT), Some(""));
    // chrome does not depend on data
    assert!(page.content(SITE_HEADER).unwrap().contains("Publications"));
}

#[tokio::test]
async fn featured_section_caps_at_five() {
    let pubs: Vec<String> = (0..7)
        .map(|i| {
            format!(
                r#"{{"id":"f{0}","title":"Featured {0}","authors":["Jane Doe"],"venue":"V","year":{1},"featured":true}}"#,
                i,
                2010 + i
            )
        })
        .collect();
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), &format!("[{}]", pubs.join(",")));
    let source = FileSource::new(dir.path());
    let mut page = Page::new("/index.html").with_mount(FEATURED_PUBS);

    render_home(&mut page, &ctx(0), &source).await.unwrap();

    let html = page.content(FEATURED_PUBS).unwrap();
    assert_eq!(html.matches("class=\"pub-item\"").count(), 5);
    assert!(html.find("Featured 0").unwrap() < html.find("Featured 4").unwrap());
    assert!(!html.contains("Featured 5"));
    assert!(!html.contains("Featured 6"));
}

#[tokio::test]
async fn home_without_sections_skips_loading() {
    // no data directory at all: only chrome is rendered, nothing is fetched
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(dir.path().join("missing"));
    let mut page = Page::new("/about.html").with_mount(SITE_HEADER);
    assert!(render_home(&mut page, &ctx(0), &source).await.is_ok());
    assert!(page.content(SITE_HEADER).unwrap().contains("logo"));
}

// ═══════════════════════════════════════════════════════════
// Theme preference
// ═══════════════════════════════════════════════════════════

#[test]
fn theme_toggle_scenario() {
    let mut pref = ThemePreference::load(MemoryStorage::new());
    assert_eq!(pref.theme(), Theme::Default);
    assert_eq!(pref.icon(), DEFAULT_ICON);

    pref.toggle();
    assert_eq!(pref.icon(), OVERRIDE_ICON);
    assert_eq!(pref.storage().get(THEME_KEY).unwrap().as_deref(), Some("dark"));

    pref.toggle();
    assert_eq!(pref.icon(), DEFAULT_ICON);
    assert_eq!(pref.storage().get(THEME_KEY).unwrap(), None);
}

// ═══════════════════════════════════════════════════════════
// Static build
// ═══════════════════════════════════════════════════════════

const LISTING_TEMPLATE: &str = "<html><head><title>Publications</title></head><body>\n\
    <!-- BUILD:site-header -->\n<!-- /BUILD:site-header -->\n\
    <select id=\"year\">\n<!-- BUILD:year -->\n<!-- /BUILD:year -->\n</select>\n\
    <div id=\"pub-list\">\n<!-- BUILD:pub-list -->\n<!-- /BUILD:pub-list -->\n</div>\n\
    </body></html>";

fn scaffold_site(root: &Path, publications: &str) {
    write_data(&root.join("data"), publications);
    fs::write(
        root.join("index.html"),
        HOME_TEMPLATE.replace("<body>", "<body>\n<!-- BUILD:jsonld -->\n<!-- /BUILD:jsonld -->"),
    )
    .unwrap();
    fs::create_dir_all(root.join("publications")).unwrap();
    fs::write(root.join(LISTING_PAGE), LISTING_TEMPLATE).unwrap();
}

#[tokio::test]
async fn build_writes_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    scaffold_site(root, PUBLICATIONS);

    let config = SiteConfig {
        owner: "Jane Doe".into(),
        site_url: "https://jane.example".into(),
        publish_resume: true,
        ..SiteConfig::default()
    };
    let report = build_site(root, &config).await.unwrap();
    assert_eq!(report.publication_pages, 2);

    let detail = fs::read_to_string(root.join("publications/b/index.html")).unwrap();
    assert!(detail.contains("<title>Graph Y - Publications</title>"));
    assert!(detail.contains("ScholarlyArticle"));

    let index = fs::read_to_string(root.join("index.html")).unwrap();
    assert!(index.contains("\"@type\": \"Person\""));
    assert!(index.contains("Works on graphs."));
    assert!(index.contains("assets/pdf/cv.pdf"));
    assert!(!index.contains("Loading..."));

    let listing = fs::read_to_string(root.join(LISTING_PAGE)).unwrap();
    assert!(listing.find("Graph Y").unwrap() < listing.find("Graph X").unwrap());
    assert!(listing.contains("href=\"../publications/a/\""));
    assert!(listing.contains("<option value=\"2023\">2023</option>"));

    let sitemap = fs::read_to_string(root.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://jane.example/publications/b/</loc>"));
}

#[tokio::test]
async fn build_aborts_without_templates() {
    let dir = tempfile::tempdir().unwrap();
    write_data(&dir.path().join("data"), PUBLICATIONS);
    assert!(build_site(dir.path(), &SiteConfig::default()).await.is_err());
    assert!(!dir.path().join("sitemap.xml").exists());
}

#[tokio::test]
async fn build_rejects_empty_id_without_touching_listing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    scaffold_site(
        root,
        r#"[{"id":"","title":"Blank","year":2020},{"id":"ok","title":"Fine","year":2021}]"#,
    );

    match build_site(root, &SiteConfig::default()).await {
        Err(BuildError::InvalidPublicationId(id)) => assert_eq!(id, ""),
        other => panic!("expected an invalid id error, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(root.join(LISTING_PAGE)).unwrap(), LISTING_TEMPLATE);
    assert!(!root.join("publications/ok/index.html").exists());
    assert!(!root.join("sitemap.xml").exists());
}

#[tokio::test]
async fn build_rejects_traversal_id() {
    let outer = tempfile::tempdir().unwrap();
    let root = outer.path().join("site");
    fs::create_dir_all(&root).unwrap();
    scaffold_site(
        &root,
        r#"[{"id":"../../escaped","title":"Escape","year":2020}]"#,
    );

    assert!(matches!(
        build_site(&root, &SiteConfig::default()).await,
        Err(BuildError::InvalidPublicationId(_))
    ));
    assert!(!outer.path().join("escaped").exists());
    assert!(!root.join("escaped").exists());
}
