use crate::markup::{render_all, Element};
use crate::models::{EducationEntry, InterestCategory, Profile};
use crate::page::Page;

use super::{RenderContext, ABOUT, EDUCATION, INTERESTS};

/// Home-page about block: photo, name, links, optional resume/CV, bio,
/// location, and compact education + interests columns.
pub fn render_about(
    page: &mut Page,
    ctx: &RenderContext,
    profile: &Profile,
    education: &[EducationEntry],
    interests: &[InterestCategory],
) {
    if !page.has_mount(ABOUT) {
        return;
    }

    let links = Element::new("div").class("about-links").children(
        profile.links.iter().map(|l| {
            Element::new("a")
                .href(ctx.link(&l.href))
                .new_tab()
                .attr("title", l.label.as_str())
                .class("about-link")
                .child_opt(l.icon().map(|icon| Element::new("i").class(icon)))
        }),
    );

    let resume = ctx.config.publish_resume.then(|| {
        Element::new("div")
            .class("resume-links")
            .child(
                Element::new("a")
                    .href(ctx.link(&ctx.config.resume_pdf))
                    .new_tab()
                    .class("resume-link")
                    .child(Element::new("i").class("bi bi-file-earmark-text"))
                    .text(" resume.pdf"),
            )
            .child(Element::new("span").class("resume-sep").text("/"))
            .child(
                Element::new("a")
                    .href(ctx.link(&ctx.config.cv_pdf))
                    .new_tab()
                    .class("resume-link")
                    .text("cv.pdf"),
            )
    });

    let photo = Element::new("div")
        .class("about-photo")
        .child(
            Element::new("img")
                .attr("src", ctx.link(&ctx.config.photo))
                .attr("alt", profile.name.as_str()),
        )
        .child(Element::new("h1").text(profile.name.as_str()))
        .child(
            Element::new("p")
                .class("about-role")
                .text(profile.role.as_str())
                .raw("<br>")
                .text(format!("at {}", profile.org)),
        )
        .child(links)
        .child_opt(resume);

    let edu_column = Element::new("div")
        .child(Element::new("div").class("info-label").text("education"))
        .children(education.iter().map(compact_education_item));

    let interests_column = Element::new("div")
        .child(Element::new("div").class("info-label").text("interests"))
        .children(interests.iter().map(|cat| {
            Element::new("div")
                .class("interest-group")
                .child(badges(&cat.items))
        }));

    let details = Element::new("div")
        .class("about-details")
        .child(Element::new("h2").text("About Me"))
        .child(Element::new("p").class("lead").text(profile.bio.as_str()))
        .child(
            Element::new("p")
                .child(Element::new("i").class("bi bi-geo-alt"))
                .text(format!(" {}", profile.location)),
        )
        .child(
            Element::new("div")
                .class("info-grid")
                .child(edu_column)
                .child(interests_column),
        );

    let html = Element::new("div")
        .class("about-content")
        .child(photo)
        .child(details)
        .render();
    page.set_content(ABOUT, html);
}

fn compact_education_item(edu: &EducationEntry) -> Element {
    let school = Element::new("div")
        .class("edu-school")
        .text(edu.school.as_str())
        .child_opt(edu.details().map(|d| {
            Element::new("span")
                .class("edu-details")
                .raw(" &middot; ")
                .text(d)
        }));
    Element::new("div")
        .class("edu-item")
        .child(Element::new("div").class("edu-degree").text(edu.degree.as_str()))
        .child(school)
        .child(Element::new("div").class("edu-year").text(edu.year.to_string()))
}

fn badges(items: &[String]) -> Element {
    Element::new("div")
        .class("interests-container")
        .children(items.iter().map(|item| Element::new("span").class("badge").text(item.as_str())))
}

/// Standalone education section.
pub fn render_education(page: &mut Page, education: &[EducationEntry]) {
    if !page.has_mount(EDUCATION) {
        return;
    }
    let items: Vec<Element> = education
        .iter()
        .map(|edu| {
            let mut line = Element::new("div")
                .class("edu-year")
                .text(edu.year.to_string());
            if let Some(d) = edu.details() {
                line = line.raw(" &middot; ").text(d);
            }
            Element::new("div")
                .class("edu-item")
                .child(Element::new("h4").text(edu.degree.as_str()))
                .child(Element::new("div").class("edu-school").text(edu.school.as_str()))
                .child(line)
        })
        .collect();
    let html = format!(
        "<h3>Education</h3>\n<div>\n{}\n</div>",
        render_all(&items)
    );
    page.set_content(EDUCATION, html);
}

/// Standalone interests section, one heading per category.
pub fn render_interests(page: &mut Page, interests: &[InterestCategory]) {
    if !page.has_mount(INTERESTS) {
        return;
    }
    let groups: Vec<Element> = interests
        .iter()
        .map(|cat| {
            Element::new("div")
                .class("interest-group")
                .child(Element::new("h4").text(cat.category.as_str()))
                .child(badges(&cat.items))
        })
        .collect();
    let html = format!(
        "<h3>Interests &amp; Skills</h3>\n<div>\n{}\n</div>",
        render_all(&groups)
    );
    page.set_content(INTERESTS, html);
}
