//! In-memory page: location, title and named mount points.
//!
//! A page is either assembled programmatically or parsed from an HTML
//! template whose mount points are declared with build markers:
//!
//! ```html
//! <!-- BUILD:about -->
//! ...current content...
//! <!-- /BUILD:about -->
//! ```
//!
//! Renderers own exactly one mount each and never touch siblings.

use log::warn;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use url::form_urlencoded;

static OPEN_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!-- BUILD:([A-Za-z0-9_-]+) -->").expect("valid marker regex"));

/// Non-reloading URL updates (the `history.replaceState` seam).
pub trait History {
    fn replace_state(&mut self, path_and_query: &str);
}

#[derive(Debug, Clone)]
struct Mount {
    name: String,
    content: String,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    path: String,
    query: String,
    title: Option<String>,
    retitled: bool,
    mounts: Vec<Mount>,
    template: Option<String>,
}

impl Page {
    pub fn new(path: &str) -> Self {
        Page {
            path: path.to_string(),
            ..Default::default()
        }
    }

    /// Set the query string (with or without the leading `?`).
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.trim_start_matches('?').to_string();
        self
    }

    pub fn with_mount(mut self, name: &str) -> Self {
        if !self.has_mount(name) {
            self.mounts.push(Mount {
                name: name.to_string(),
                content: String::new(),
            });
        }
        self
    }

    /// Parse an HTML template. Every `BUILD:name` block with a matching
    /// close marker becomes a mount, seeded with its current content.
    pub fn from_template(path: &str, html: &str) -> Self {
        let mut page = Page::new(path);
        for caps in OPEN_MARKER.captures_iter(html) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let close = format!("<!-- /BUILD:{} -->", name.as_str());
            if let Some(end) = html[whole.end()..].find(&close) {
                let inner = &html[whole.end()..whole.end() + end];
                page.mounts.push(Mount {
                    name: name.as_str().to_string(),
                    content: inner.trim_matches('\n').to_string(),
                });
            } else {
                warn!("BUILD:{} has no closing marker in {}", name.as_str(), path);
            }
        }
        page.title = extract_title(html);
        page.template = Some(html.to_string());
        page
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// First value of a query-string parameter, URL-decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        form_urlencoded::parse(self.query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// `path?query`, or just `path` when the query is empty.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
        self.retitled = true;
    }

    pub fn has_mount(&self, name: &str) -> bool {
        self.mounts.iter().any(|m| m.name == name)
    }

    pub fn mount_names(&self) -> impl Iterator<Item = &str> {
        self.mounts.iter().map(|m| m.name.as_str())
    }

    pub fn content(&self, name: &str) -> Option<&str> {
        self.mounts
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.content.as_str())
    }

    /// Fully replace a mount's content. Returns false (and does nothing)
    /// when the page has no such mount.
    pub fn set_content(&mut self, name: &str, html: String) -> bool {
        match self.mounts.iter_mut().find(|m| m.name == name) {
            Some(m) => {
                m.content = html;
                true
            }
            None => false,
        }
    }

    /// Serialize the page. Template pages get every mount written back
    /// between its markers; plain pages emit one `<div id>` per mount.
    pub fn into_html(self) -> String {
        match self.template {
            Some(mut html) => {
                for m in &self.mounts {
                    html = inject_build_block(&html, &m.name, &m.content);
                }
                if let (true, Some(title)) = (self.retitled, &self.title) {
                    html = replace_title(&html, title);
                }
                html
            }
            None => self
                .mounts
                .iter()
                .map(|m| format!("<div id=\"{}\">\n{}\n</div>", m.name, m.content))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl History for Page {
    fn replace_state(&mut self, path_and_query: &str) {
        match path_and_query.split_once('?') {
            Some((path, query)) => {
                self.path = path.to_string();
                self.query = query.to_string();
            }
            None => {
                self.path = path_and_query.to_string();
                self.query.clear();
            }
        }
    }
}

/// Replace `<!-- BUILD:name --> ... <!-- /BUILD:name -->` with new content.
/// A missing marker logs a warning and returns the input unchanged.
pub fn inject_build_block(html: &str, name: &str, replacement: &str) -> String {
    let pattern = format!(
        r"(?s)<!-- BUILD:{0} -->.*?<!-- /BUILD:{0} -->",
        regex::escape(name)
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("BUILD:{} unusable marker name: {}", name, e);
            return html.to_string();
        }
    };
    if !re.is_match(html) {
        warn!("BUILD:{} marker not found", name);
        return html.to_string();
    }
    let block = format!(
        "<!-- BUILD:{0} -->\n{1}\n<!-- /BUILD:{0} -->",
        name, replacement
    );
    re.replace_all(html, NoExpand(&block)).into_owned()
}

fn extract_title(html: &str) -> Option<String> {
    let start = html.find("<title>")? + "<title>".len();
    let end = html[start..].find("</title>")?;
    Some(html[start..start + end].to_string())
}

fn replace_title(html: &str, title: &str) -> String {
    match (html.find("<title>"), html.find("</title>")) {
        (Some(start), Some(end)) if start < end => format!(
            "{}<title>{}</title>{}",
            &html[..start],
            crate::markup::html_escape(title),
            &html[end + "</title>".len()..]
        ),
        _ => html.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "<html><head><title>Home</title></head><body>\n\
        <!-- BUILD:about -->\nold about\n<!-- /BUILD:about -->\n\
        <!-- BUILD:contact -->\n<!-- /BUILD:contact -->\n\
        <!-- BUILD:broken -->\n</body></html>";

    #[test]
    fn template_mounts_are_discovered() {
        let page = Page::from_template("index.html", TEMPLATE);
        let names: Vec<&str> = page.mount_names().collect();
        assert_eq!(names, vec!["about", "contact"]);
        assert_eq!(page.content("about"), Some("old about"));
        assert_eq!(page.title(), Some("Home"));
    }

    #[test]
    fn set_content_is_noop_for_absent_mount() {
        let mut page = Page::new("/").with_mount("about");
        assert!(page.set_content("about", "x".into()));
        assert!(!page.set_content("software", "y".into()));
        assert_eq!(page.content("about"), Some("x"));
        assert_eq!(page.content("software"), None);
    }

    #[test]
    fn into_html_writes_back_between_markers() {
        let mut page = Page::from_template("index.html", TEMPLATE);
        page.set_content("about", "<p>new</p>".into());
        page.set_title("A & B");
        let html = page.into_html();
        assert!(html.contains("<!-- BUILD:about -->\n<p>new</p>\n<!-- /BUILD:about -->"));
        assert!(!html.contains("old about"));
        assert!(html.contains("<title>A &amp; B</title>"));
    }

    #[test]
    fn inject_leaves_html_alone_without_marker() {
        assert_eq!(inject_build_block("<p>hi</p>", "about", "x"), "<p>hi</p>");
    }

    #[test]
    fn replacement_is_literal() {
        let html = inject_build_block("<!-- BUILD:a -->\n<!-- /BUILD:a -->", "a", "cost $1");
        assert!(html.contains("cost $1"));
    }

    #[test]
    fn query_params_and_replace_state() {
        let mut page = Page::new("/publications/index.html").with_query("?q=graph%20x&year=2021");
        assert_eq!(page.query_param("q").as_deref(), Some("graph x"));
        assert_eq!(page.query_param("type"), None);
        page.replace_state("/publications/index.html?year=2020");
        assert_eq!(page.query(), "year=2020");
        page.replace_state("/publications/index.html");
        assert_eq!(page.url(), "/publications/index.html");
    }
}
