//! Shared header and footer. Independent of data loading.

use chrono::Datelike;

use crate::markup::Element;
use crate::page::Page;

use super::{RenderContext, LISTING_PAGE, SITE_FOOTER, SITE_HEADER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavSection {
    Home,
    Publications,
    Other,
}

fn active_section(path: &str) -> NavSection {
    if path.contains("/publications/") || path.starts_with("publications/") {
        NavSection::Publications
    } else if path.is_empty() || path.ends_with('/') || path.ends_with("index.html") {
        NavSection::Home
    } else {
        NavSection::Other
    }
}

pub fn render_header(page: &mut Page, ctx: &RenderContext) {
    if !page.has_mount(SITE_HEADER) {
        return;
    }
    let active = active_section(page.path());
    let item = |href: &str, label: &str, section: NavSection| {
        Element::new("li").child(
            Element::new("a")
                .href(ctx.link(href))
                .class_if(active == section, "active")
                .text(label),
        )
    };
    let html = Element::new("div")
        .class("container nav")
        .child(
            Element::new("a")
                .href(ctx.link("index.html"))
                .class("logo")
                .text(ctx.config.logo.as_str()),
        )
        .child(
            Element::new("ul")
                .child(item("index.html", "Home", NavSection::Home))
                .child(item(LISTING_PAGE, "Publications", NavSection::Publications))
                .child(item("index.html#contact", "Contact", NavSection::Other)),
        )
        .render();
    page.set_content(SITE_HEADER, html);
}

pub fn render_footer(page: &mut Page, ctx: &RenderContext) {
    render_footer_for_year(page, ctx, chrono::Local::now().year());
}

pub fn render_footer_for_year(page: &mut Page, ctx: &RenderContext, year: i32) {
    if !page.has_mount(SITE_FOOTER) {
        return;
    }
    let html = Element::new("div")
        .class("container")
        .child(
            Element::new("p")
                .raw("&copy; ")
                .text(format!("{} {}.", year, ctx.config.owner)),
        )
        .render();
    page.set_content(SITE_FOOTER, html);
}
