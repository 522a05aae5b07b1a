//! Section renderers.
//!
//! Each renderer owns one mount point: it fully replaces that mount's
//! content and is a no-op when the page does not declare it. Records are
//! rendered in source order; optional fields that are absent produce no
//! markup at all.

pub mod about;
pub mod chrome;
pub mod contact;
pub mod experience;
pub mod projects;
pub mod publications;

use crate::base_path::BasePath;
use crate::config::SiteConfig;

// ── Mount point names ───────────────────────────────
pub const ABOUT: &str = "about";
pub const EDUCATION: &str = "education";
pub const INTERESTS: &str = "interests";
pub const EXPERIENCE: &str = "experience";
pub const FEATURED_PUBS: &str = "featured-pubs";
pub const SOFTWARE: &str = "software";
pub const CONTACT: &str = "contact";
pub const PUB_LIST: &str = "pub-list";
pub const PUB_DETAIL: &str = "pub-detail";
pub const SITE_HEADER: &str = "site-header";
pub const SITE_FOOTER: &str = "site-footer";
pub const JSONLD: &str = "jsonld";
pub const FILTER_QUERY: &str = "q";
pub const FILTER_YEAR: &str = "year";
pub const FILTER_TYPE: &str = "type";

/// Mounts filled by the home-page aggregate load.
pub const HOME_SECTIONS: &[&str] = &[
    ABOUT,
    EDUCATION,
    INTERESTS,
    EXPERIENCE,
    FEATURED_PUBS,
    SOFTWARE,
    CONTACT,
];

pub const LISTING_PAGE: &str = "publications/index.html";

/// Inputs shared by every renderer on one page.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub base: BasePath,
    pub config: SiteConfig,
}

impl RenderContext {
    pub fn new(base: BasePath, config: SiteConfig) -> Self {
        RenderContext { base, config }
    }

    /// Context whose base path is the explicit config value, or the
    /// script-derived fallback when the config has none.
    pub fn resolve<'a>(config: SiteConfig, script_sources: impl IntoIterator<Item = &'a str>) -> Self {
        let base = BasePath::resolve(config.base_path.as_deref(), script_sources);
        RenderContext { base, config }
    }

    pub fn link(&self, href: &str) -> String {
        self.base.link(href)
    }

    /// Listing-page URL scoped to a free-text query.
    pub fn listing_query_link(&self, query: &str) -> String {
        let qs = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .finish();
        format!("{}?{}", self.link(LISTING_PAGE), qs)
    }

    /// Path-route link to one publication's detail page.
    pub fn publication_link(&self, id: &str) -> String {
        self.link(&format!("publications/{}/", id))
    }
}
