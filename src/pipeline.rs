//! Per-page render pipelines: load what the page needs, then fan out to
//! the section renderers.

use log::info;

use crate::detail::{show_detail, DetailOutcome};
use crate::error::LoadError;
use crate::filter::PublicationsController;
use crate::loader::{load, load_home, DataSource, HomeData, Resource};
use crate::models::Publication;
use crate::page::Page;
use crate::sections::about::{render_about, render_education, render_interests};
use crate::sections::chrome::{render_footer, render_header};
use crate::sections::contact::render_contact;
use crate::sections::experience::render_experience;
use crate::sections::projects::render_projects;
use crate::sections::publications::render_featured;
use crate::sections::{RenderContext, HOME_SECTIONS};

async fn load_publications(source: &dyn DataSource) -> Result<Vec<Publication>, LoadError> {
    let data = load(source, &[Resource::Publications]).await?;
    Ok(data.publications.unwrap_or_default())
}

/// Shared chrome. Does not depend on any data.
pub fn render_chrome(page: &mut Page, ctx: &RenderContext) {
    render_header(page, ctx);
    render_footer(page, ctx);
}

/// Fill every home section from an already-loaded aggregate.
pub fn render_home_sections(page: &mut Page, ctx: &RenderContext, data: &HomeData) {
    render_about(page, ctx, &data.profile, &data.education, &data.interests);
    render_education(page, &data.education);
    render_interests(page, &data.interests);
    render_experience(page, &data.experience);
    render_featured(page, ctx, &data.publications);
    render_projects(page, ctx, &data.projects);
    render_contact(page, ctx, &data.profile);
}

/// Home page. Chrome renders first; the aggregate load only runs when the
/// page declares a home section, and a failed load leaves every section
/// exactly as it was.
pub async fn render_home(
    page: &mut Page,
    ctx: &RenderContext,
    source: &dyn DataSource,
) -> Result<(), LoadError> {
    render_chrome(page, ctx);
    if !HOME_SECTIONS.iter().any(|m| page.has_mount(m)) {
        return Ok(());
    }
    let data = load_home(source).await?;
    render_home_sections(page, ctx, &data);
    Ok(())
}

/// Listing page: fetch publications, restore the filter state from the
/// URL and render. The returned controller handles later filter changes.
pub async fn open_listing(
    page: &mut Page,
    ctx: &RenderContext,
    source: &dyn DataSource,
) -> Result<PublicationsController, LoadError> {
    render_chrome(page, ctx);
    let publications = load_publications(source).await?;
    info!("Loaded {} publications", publications.len());
    let mut controller = PublicationsController::new(publications);
    controller.init(page, ctx);
    Ok(controller)
}

/// Detail page: fetch publications and show the one the URL names.
pub async fn render_detail_page(
    page: &mut Page,
    ctx: &RenderContext,
    source: &dyn DataSource,
) -> Result<DetailOutcome, LoadError> {
    render_chrome(page, ctx);
    let publications = load_publications(source).await?;
    Ok(show_detail(page, ctx, &publications))
}
