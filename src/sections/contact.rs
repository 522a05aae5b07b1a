use crate::markup::Element;
use crate::models::Profile;
use crate::page::Page;

use super::{RenderContext, CONTACT};

pub fn render_contact(page: &mut Page, ctx: &RenderContext, profile: &Profile) {
    if !page.has_mount(CONTACT) {
        return;
    }
    let buttons = profile.links.iter().map(|l| {
        Element::new("a")
            .href(ctx.link(&l.href))
            .class("btn btn-outline")
            .new_tab()
            .child_opt(l.icon().map(|icon| Element::new("i").class(icon)))
            .text(format!(" {}", l.label))
    });
    let html = Element::new("div")
        .class("contact")
        .child(Element::new("h2").text("Contact"))
        .child(Element::new("p").text("Feel free to reach out for collaborations or questions."))
        .child(Element::new("div").class("filters").joined(buttons, " "))
        .render();
    page.set_content(CONTACT, html);
}
