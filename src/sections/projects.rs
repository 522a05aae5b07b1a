use crate::markup::{render_all, Element};
use crate::models::Project;
use crate::page::Page;

use super::{RenderContext, SOFTWARE};

pub fn render_projects(page: &mut Page, ctx: &RenderContext, projects: &[Project]) {
    if !page.has_mount(SOFTWARE) {
        return;
    }
    let cards: Vec<Element> = projects
        .iter()
        .map(|p| {
            let image = p.image().map(|src| {
                Element::new("img")
                    .attr("src", ctx.link(src))
                    .attr("alt", p.name.as_str())
                    .attr("loading", "lazy")
            });
            Element::new("div")
                .class("card")
                .child_opt(image)
                .child(
                    Element::new("div")
                        .class("card-body")
                        .child(
                            Element::new("h3").child(
                                Element::new("a")
                                    .href(ctx.link(&p.href))
                                    .new_tab()
                                    .text(p.name.as_str()),
                            ),
                        )
                        .child(Element::new("p").text(p.description.as_str()))
                        .child(Element::new("small").class("text-muted").text(p.stack.as_str())),
                )
        })
        .collect();
    let html = format!(
        "<h2>Software / Projects</h2>\n<div class=\"grid\">\n{}\n</div>",
        render_all(&cards)
    );
    page.set_content(SOFTWARE, html);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_path::BasePath;
    use crate::config::SiteConfig;

    #[test]
    fn image_only_when_present() {
        let projects = vec![
            Project {
                name: "vitae".into(),
                href: "https://github.com/x/vitae".into(),
                description: "Renderer".into(),
                stack: "Rust".into(),
                image: Some("assets/img/vitae.png".into()),
            },
            Project {
                name: "other".into(),
                href: "https://github.com/x/other".into(),
                description: "Other".into(),
                stack: "Go".into(),
                image: None,
            },
        ];
        let mut page = Page::new("/").with_mount(SOFTWARE);
        let ctx = RenderContext::new(BasePath::for_depth(1), SiteConfig::default());
        render_projects(&mut page, &ctx, &projects);
        let html = page.content(SOFTWARE).unwrap();
        assert_eq!(html.matches("<img").count(), 1);
        assert!(html.contains("src=\"../assets/img/vitae.png\""));
        assert!(html.contains("href=\"https://github.com/x/other\""));
    }
}
