//! Static build: pre-render every page into its build markers so the site
//! is complete without client-side loading.

use std::path::{Path, PathBuf};

use log::{error, info};
use tokio::fs;
use url::form_urlencoded;

use crate::base_path::{BasePath, RENDER_SCRIPT};
use crate::boot;
use crate::config::SiteConfig;
use crate::detail::{show_detail, PARAM_ID};
use crate::error::BuildError;
use crate::filter::FilterState;
use crate::loader::{load_home, source_for};
use crate::markup::html_escape;
use crate::models::Publication;
use crate::page::Page;
use crate::pipeline::{render_chrome, render_home_sections};
use crate::sections::publications::{render_filter_options, render_list, render_query_input};
use crate::sections::{RenderContext, JSONLD, LISTING_PAGE};
use crate::seo::{generate_sitemap, person_jsonld, scholarly_article_jsonld};

pub const HOME_PAGE: &str = "index.html";
pub const SITEMAP: &str = "sitemap.xml";

#[derive(Debug, Default)]
pub struct BuildReport {
    pub publication_pages: usize,
    pub written: Vec<PathBuf>,
}

/// Explicit config prefix when set, else a relative prefix for the page's
/// directory depth.
fn base_for(config: &SiteConfig, depth: usize) -> BasePath {
    match config.base_path.as_deref() {
        Some(prefix) => BasePath::explicit(prefix),
        None => BasePath::for_depth(depth),
    }
}

async fn read_file(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).await.map_err(|source| BuildError::Io {
        path: path.display().to_string(),
        source,
    })
}

async fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    let io_err = |source| BuildError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await.map_err(io_err)?;
    }
    fs::write(path, content).await.map_err(io_err)
}

/// Ids become both a URL segment and a directory name, so only
/// `[A-Za-z0-9._-]` is allowed and dot-only ids are rejected.
pub fn is_route_safe_id(id: &str) -> bool {
    !id.is_empty()
        && !id.chars().all(|c| c == '.')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Shell for one generated publication page. The detail block, chrome and
/// structured data are filled through build markers afterwards.
pub fn detail_template(p: &Publication, config: &SiteConfig) -> String {
    let description = html_escape(p.abstract_text().unwrap_or(""));
    let title = html_escape(&p.title);
    let site = config.site_root();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Publications</title>
    <meta name="description" content="{description}">
    <meta property="og:type" content="article">
    <meta property="og:url" content="{site}/publications/{id}/">
    <meta property="og:title" content="{title} - {owner}">
    <meta property="og:description" content="{description}">
    <link rel="stylesheet" href="../../assets/css/style.css">
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.8.0/font/bootstrap-icons.css">
    <!-- BUILD:jsonld -->
    <!-- /BUILD:jsonld -->
</head>
<body>
    <header id="site-header">
<!-- BUILD:site-header -->
<!-- /BUILD:site-header -->
    </header>

    <main class="container">
        <div id="pub-detail" data-pub-id="{id}">
<!-- BUILD:pub-detail -->
<!-- /BUILD:pub-detail -->
        </div>
    </main>

    <footer id="site-footer">
<!-- BUILD:site-footer -->
<!-- /BUILD:site-footer -->
    </footer>

    <script src="../../{script}"></script>
</body>
</html>
"#,
        title = title,
        description = description,
        site = html_escape(site),
        id = html_escape(&p.id),
        owner = html_escape(&config.owner),
        script = RENDER_SCRIPT,
    )
}

/// Render one publication page from its template.
pub fn render_publication_page(p: &Publication, publications: &[Publication], config: &SiteConfig) -> String {
    let ctx = RenderContext::new(base_for(config, 2), config.clone());
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(PARAM_ID, &p.id)
        .finish();
    let mut page = Page::from_template(
        &format!("publications/{}/index.html", p.id),
        &detail_template(p, config),
    )
    .with_query(&query);
    page.set_content(JSONLD, scholarly_article_jsonld(p, config.site_root()));
    render_chrome(&mut page, &ctx);
    show_detail(&mut page, &ctx, publications);
    page.into_html()
}

/// Build the whole site under `root`.
pub async fn build_site(root: &Path, config: &SiteConfig) -> Result<BuildReport, BuildError> {
    boot::check(root, config)?;

    info!("Loading data...");
    let source = source_for(config, root)?;
    let data = load_home(source.as_ref()).await?;
    // every id is validated before the first write
    if let Some(bad) = data.publications.iter().find(|p| !is_route_safe_id(&p.id)) {
        error!("Refusing to build: publication id {:?} is not route-safe", bad.id);
        return Err(BuildError::InvalidPublicationId(bad.id.clone()));
    }
    info!(
        "Resume publishing: {}",
        if config.publish_resume { "ON" } else { "OFF" }
    );

    let mut report = BuildReport::default();

    // ── 1. Publication pages ───────────────────────────
    info!("Generating {} publication pages...", data.publications.len());
    for p in &data.publications {
        let path = root.join("publications").join(&p.id).join("index.html");
        write_file(&path, &render_publication_page(p, &data.publications, config)).await?;
        info!("  -> {}", path.display());
        report.publication_pages += 1;
        report.written.push(path);
    }

    // ── 2. Home page ───────────────────────────────────
    info!("Updating {}...", HOME_PAGE);
    let path = root.join(HOME_PAGE);
    let mut page = Page::from_template(HOME_PAGE, &read_file(&path).await?);
    let ctx = RenderContext::new(base_for(config, 0), config.clone());
    page.set_content(
        JSONLD,
        person_jsonld(&data.profile, &data.education, config.site_root()),
    );
    render_chrome(&mut page, &ctx);
    render_home_sections(&mut page, &ctx, &data);
    write_file(&path, &page.into_html()).await?;
    info!("  -> {}", path.display());
    report.written.push(path);

    // ── 3. Listing page ────────────────────────────────
    info!("Updating {}...", LISTING_PAGE);
    let path = root.join(LISTING_PAGE);
    let mut page = Page::from_template(LISTING_PAGE, &read_file(&path).await?);
    let ctx = RenderContext::new(base_for(config, 1), config.clone());
    let all = FilterState::default();
    render_chrome(&mut page, &ctx);
    render_query_input(&mut page, &all.query);
    render_filter_options(&mut page, &data.publications, &all.year, &all.kind);
    render_list(&mut page, &ctx, &all.apply(&data.publications));
    write_file(&path, &page.into_html()).await?;
    info!("  -> {}", path.display());
    report.written.push(path);

    // ── 4. Sitemap ─────────────────────────────────────
    info!("Regenerating {}...", SITEMAP);
    let path = root.join(SITEMAP);
    let today = chrono::Local::now().date_naive();
    write_file(&path, &generate_sitemap(&config.site_url, &data.publications, today)).await?;
    info!("  -> {}", path.display());
    report.written.push(path);

    info!("Done!");
    Ok(report)
}
