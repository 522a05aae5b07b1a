//! Single-publication lookup for the detail page.

use crate::models::Publication;
use crate::page::Page;
use crate::sections::publications::{render_detail, render_detail_missing, NOT_FOUND, NO_ID};
use crate::sections::RenderContext;

pub const PARAM_ID: &str = "id";

/// Publication id for this page: the `id` query parameter, else the
/// segment after `publications/` in a path route.
pub fn detail_id(page: &Page) -> Option<String> {
    if let Some(id) = page.query_param(PARAM_ID).filter(|id| !id.is_empty()) {
        return Some(id);
    }
    let rest = page.path().split("publications/").nth(1)?;
    let segment = rest.split('/').next()?;
    if segment.is_empty() || segment == "index.html" {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Exact id match.
pub fn find_publication<'a>(publications: &'a [Publication], id: &str) -> Option<&'a Publication> {
    publications.iter().find(|p| p.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    Rendered,
    NotFound,
    MissingId,
}

/// Render the detail view or one of the explicit not-found states.
pub fn show_detail(page: &mut Page, ctx: &RenderContext, publications: &[Publication]) -> DetailOutcome {
    let Some(id) = detail_id(page) else {
        render_detail_missing(page, NO_ID);
        return DetailOutcome::MissingId;
    };
    match find_publication(publications, &id) {
        Some(p) => {
            render_detail(page, ctx, p);
            DetailOutcome::Rendered
        }
        None => {
            render_detail_missing(page, NOT_FOUND);
            DetailOutcome::NotFound
        }
    }
}
