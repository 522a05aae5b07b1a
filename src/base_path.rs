//! Root-relative prefix for generated links and assets.
//!
//! The prefix is normally injected explicitly (site config, or the page
//! depth known to the static build). Inference from the loading script's URL
//! is kept as a best-effort fallback; when the script cannot be located the
//! prefix is empty, which is only correct for root-level pages.

use url::Url;

/// Path of the shared rendering script relative to the site root.
pub const RENDER_SCRIPT: &str = "assets/js/render.js";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Site-root-relative (empty) prefix.
    pub fn root() -> Self {
        BasePath(String::new())
    }

    /// An explicit prefix. A trailing slash is added when missing so that
    /// `prefix + "index.html"` is always a path join.
    pub fn explicit(prefix: &str) -> Self {
        let prefix = prefix.trim();
        if prefix.is_empty() || prefix == "." || prefix == "./" {
            return BasePath::root();
        }
        if prefix.ends_with('/') {
            BasePath(prefix.to_string())
        } else {
            BasePath(format!("{}/", prefix))
        }
    }

    /// Prefix for a page `depth` directories below the root.
    pub fn for_depth(depth: usize) -> Self {
        BasePath("../".repeat(depth))
    }

    /// Strip the script's own site-relative path from its resolved URL.
    /// Returns `None` when the URL does not end with `script_path`.
    pub fn from_script_url(script_url: &str, script_path: &str) -> Option<Self> {
        let clean = script_url
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        clean
            .strip_suffix(script_path)
            .map(|prefix| BasePath(prefix.to_string()))
    }

    /// Explicit prefix wins; otherwise scan the page's script sources for
    /// the render script; otherwise fall back to the root prefix.
    pub fn resolve<'a>(
        explicit: Option<&str>,
        script_sources: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        if let Some(prefix) = explicit {
            return BasePath::explicit(prefix);
        }
        script_sources
            .into_iter()
            .find_map(|src| BasePath::from_script_url(src, RENDER_SCRIPT))
            .unwrap_or_else(|| {
                log::debug!("render script not found, using root-relative links");
                BasePath::root()
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix an internal link. External URLs (any scheme) and paths that
    /// already start at the root pass through unchanged.
    pub fn link(&self, href: &str) -> String {
        if href.starts_with('/') || is_external(href) {
            href.to_string()
        } else {
            format!("{}{}", self.0, href)
        }
    }
}

/// True when `href` carries a URL scheme (`https:`, `mailto:`, ...).
pub fn is_external(href: &str) -> bool {
    Url::parse(href).is_ok()
}
