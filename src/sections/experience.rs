use crate::expand::{CardStates, ExpandState};
use crate::markup::{render_all, Element};
use crate::models::ExperienceEntry;
use crate::page::Page;

use super::EXPERIENCE;

/// Work experience cards, all collapsed.
pub fn render_experience(page: &mut Page, experience: &[ExperienceEntry]) {
    render_experience_states(page, experience, &CardStates::new(experience.len()));
}

/// Work experience cards with an explicit expand state per card.
pub fn render_experience_states(page: &mut Page, experience: &[ExperienceEntry], states: &CardStates) {
    if !page.has_mount(EXPERIENCE) {
        return;
    }
    let items: Vec<Element> = experience
        .iter()
        .enumerate()
        .map(|(i, exp)| experience_item(exp, states.get(i)))
        .collect();
    let html = format!(
        "<h2>Work Experience</h2>\n<div class=\"experience-list\">\n{}\n</div>",
        render_all(&items)
    );
    page.set_content(EXPERIENCE, html);
}

fn experience_item(exp: &ExperienceEntry, state: ExpandState) -> Element {
    let mut meta = Element::new("div")
        .class("experience-meta")
        .text(exp.company.as_str())
        .raw(" &middot; ")
        .text(exp.location.as_str());
    if let Some(level) = exp.level() {
        meta = meta.raw(" &middot; ").text(level);
    }

    let card = Element::new("div")
        .class("experience-card")
        .child(
            Element::new("div")
                .class("experience-header")
                .child(Element::new("h3").text(exp.role.as_str()))
                .child(Element::new("span").class("experience-period").text(exp.period.as_str())),
        )
        .child(meta)
        .child(
            Element::new("ul")
                .class("experience-details")
                .class_if(state.is_expanded(), "expanded")
                .children(exp.details.iter().map(|d| Element::new("li").text(d.as_str()))),
        )
        .child(
            Element::new("button")
                .class("experience-toggle")
                .attr("aria-expanded", state.is_expanded().to_string())
                .text(state.label()),
        );

    Element::new("div")
        .class("experience-item")
        .class_if(exp.is_current(), "current")
        .child(card)
}
