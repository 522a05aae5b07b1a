use crate::markup::{render_all, Element};
use crate::models::{Links, Publication};
use crate::page::Page;

use super::{
    RenderContext, FEATURED_PUBS, FILTER_QUERY, FILTER_TYPE, FILTER_YEAR, LISTING_PAGE, PUB_DETAIL,
    PUB_LIST,
};

pub const NO_RESULTS: &str = "No publications found.";
pub const NOT_FOUND: &str = "Publication not found.";
pub const NO_ID: &str = "Publication ID not specified.";
pub const NO_ABSTRACT: &str = "No abstract available.";

/// One control per links entry: label = key, target = value, in order.
pub fn links_block(links: &Links, class: &str) -> Element {
    Element::new("div").class("pub-links").children(
        links
            .iter()
            .map(|(label, url)| Element::new("a").href(url).class(class).text(label)),
    )
}

/// Links block, or nothing when the publication has no links.
fn optional_links(p: &Publication, class: &str) -> Option<Element> {
    (!p.links.is_empty()).then(|| links_block(&p.links, class))
}

fn venue_year(p: &Publication) -> String {
    format!("{} {}", p.venue, p.year)
}

// ── Featured (home page) ────────────────────────────

/// Featured publications in source order, capped at `limit`. No re-sort.
pub fn featured(publications: &[Publication], limit: usize) -> Vec<&Publication> {
    publications.iter().filter(|p| p.featured).take(limit).collect()
}

pub fn render_featured(page: &mut Page, ctx: &RenderContext, publications: &[Publication]) {
    if !page.has_mount(FEATURED_PUBS) {
        return;
    }
    let items: Vec<Element> = featured(publications, ctx.config.featured_limit)
        .into_iter()
        .map(|p| {
            Element::new("div")
                .class("pub-item")
                .child(
                    Element::new("a")
                        .href(ctx.publication_link(&p.id))
                        .class("pub-title")
                        .text(p.title.as_str()),
                )
                .child(Element::new("div").class("pub-authors").text(p.authors_line()))
                .child(
                    Element::new("div")
                        .class("pub-meta")
                        .text(format!("{} ", venue_year(p)))
                        .child(Element::new("span").class("badge badge-primary").text(p.kind.as_str())),
                )
                .child_opt(optional_links(p, "badge"))
        })
        .collect();
    let header = Element::new("div")
        .class("section-header")
        .child(Element::new("h2").text("Featured Publications"))
        .child(
            Element::new("a")
                .href(ctx.link(LISTING_PAGE))
                .class("btn btn-sm btn-outline")
                .text("View All"),
        );
    let html = format!("{}\n{}", header.render(), render_all(&items));
    page.set_content(FEATURED_PUBS, html);
}

// ── Listing ─────────────────────────────────────────

fn list_item(ctx: &RenderContext, p: &Publication) -> Element {
    Element::new("div")
        .class("pub-item")
        .child(
            Element::new("a")
                .href(ctx.publication_link(&p.id))
                .class("pub-title")
                .text(p.title.as_str()),
        )
        .child(Element::new("div").class("pub-authors").text(p.authors_line()))
        .child(Element::new("div").class("pub-meta").text(venue_year(p)))
        .child_opt(
            p.abstract_text()
                .map(|a| Element::new("div").class("pub-abstract").text(a)),
        )
        .child_opt(optional_links(p, "btn btn-sm btn-outline"))
}

/// Render an already-derived list. An empty list renders the explicit
/// no-results state.
pub fn render_list(page: &mut Page, ctx: &RenderContext, visible: &[&Publication]) {
    if !page.has_mount(PUB_LIST) {
        return;
    }
    let html = if visible.is_empty() {
        Element::new("p").class("no-results").text(NO_RESULTS).render()
    } else {
        let items: Vec<Element> = visible.iter().map(|p| list_item(ctx, p)).collect();
        render_all(&items)
    };
    page.set_content(PUB_LIST, html);
}

/// Distinct years, newest first.
pub fn year_options(publications: &[Publication]) -> Vec<i32> {
    let mut years: Vec<i32> = publications.iter().map(|p| p.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Distinct type tags in first-seen order.
pub fn type_options(publications: &[Publication]) -> Vec<&str> {
    let mut kinds: Vec<&str> = Vec::new();
    for p in publications {
        if !p.kind.is_empty() && !kinds.contains(&p.kind.as_str()) {
            kinds.push(p.kind.as_str());
        }
    }
    kinds
}

fn select_options(
    all_label: &str,
    values: impl IntoIterator<Item = String>,
    selected: &str,
) -> String {
    let mut options = vec![Element::new("option").attr("value", "").text(all_label)];
    options.extend(values.into_iter().map(|v| {
        Element::new("option")
            .attr("value", v.as_str())
            .attr_if(v == selected, "selected", "selected")
            .text(v)
    }));
    render_all(&options)
}

/// Fill the year/type selectors, marking the current values selected.
pub fn render_filter_options(page: &mut Page, publications: &[Publication], year: &str, kind: &str) {
    if page.has_mount(FILTER_YEAR) {
        let years = year_options(publications).into_iter().map(|y| y.to_string());
        page.set_content(FILTER_YEAR, select_options("All years", years, year));
    }
    if page.has_mount(FILTER_TYPE) {
        let kinds: Vec<String> = type_options(publications).into_iter().map(String::from).collect();
        page.set_content(FILTER_TYPE, select_options("All types", kinds, kind));
    }
}

/// Search box carrying the current free-text query.
pub fn render_query_input(page: &mut Page, query: &str) {
    if !page.has_mount(FILTER_QUERY) {
        return;
    }
    let input = Element::new("input")
        .attr("type", "search")
        .attr("name", FILTER_QUERY)
        .attr("placeholder", "Search by title or author...")
        .attr("value", query);
    page.set_content(FILTER_QUERY, input.render());
}

// ── Detail ──────────────────────────────────────────

/// Full detail view; also sets the page title.
pub fn render_detail(page: &mut Page, ctx: &RenderContext, p: &Publication) {
    if !page.has_mount(PUB_DETAIL) {
        return;
    }
    page.set_title(&format!("{} - Publications", p.title));

    let authors = p.authors.iter().map(|a| {
        Element::new("a")
            .href(ctx.listing_query_link(a))
            .text(a.as_str())
    });
    let tags = (!p.tags().is_empty()).then(|| {
        Element::new("div")
            .class("pub-tags")
            .child(Element::new("strong").text("Tags:"))
            .text(" ")
            .joined(
                p.tags().iter().map(|t| {
                    Element::new("a")
                        .href(ctx.listing_query_link(t))
                        .class("badge")
                        .text(t.as_str())
                }),
                " ",
            )
    });

    let mut blocks = vec![
        Element::new("h1").text(p.title.as_str()),
        Element::new("div")
            .class("pub-meta")
            .text(format!("{} ", venue_year(p)))
            .child(Element::new("span").class("badge badge-primary").text(p.kind.as_str())),
        Element::new("div")
            .class("pub-authors")
            .child(Element::new("strong").text("Authors:"))
            .text(" ")
            .joined(authors, ", "),
    ];
    blocks.extend(optional_links(p, "btn btn-sm btn-outline"));
    blocks.push(
        Element::new("div")
            .class("pub-abstract card")
            .child(Element::new("h3").text("Abstract"))
            .child(Element::new("p").text(p.abstract_text().unwrap_or(NO_ABSTRACT))),
    );
    let html = render_all(&blocks);
    let tail = Element::new("div")
        .class("pub-back")
        .child(
            Element::new("a")
                .href(ctx.link(LISTING_PAGE))
                .raw("&larr; ")
                .text("Back to Publications"),
        );
    let html = match tags {
        Some(tags) => format!("{}\n{}\n{}", html, tags.render(), tail.render()),
        None => format!("{}\n{}", html, tail.render()),
    };
    page.set_content(PUB_DETAIL, html);
}

/// Explicit not-found state for the detail mount.
pub fn render_detail_missing(page: &mut Page, message: &str) {
    if page.has_mount(PUB_DETAIL) {
        page.set_content(PUB_DETAIL, Element::new("p").class("not-found").text(message).render());
    }
}
