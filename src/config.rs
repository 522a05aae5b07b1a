use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "vitae.toml";

/// Site-wide settings. Every field has a default so an absent or partial
/// `vitae.toml` still yields a usable config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding `profile.json`, `publications.json`, ...
    pub data_dir: String,
    /// When set, resources are fetched over HTTP from this base instead.
    pub data_url: Option<String>,
    /// Explicit root-relative prefix for generated links.
    pub base_path: Option<String>,
    /// Canonical absolute URL, used for sitemap and structured data.
    pub site_url: String,
    pub owner: String,
    pub logo: String,
    pub photo: String,
    pub publish_resume: bool,
    pub resume_pdf: String,
    pub cv_pdf: String,
    pub featured_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            data_dir: "data".to_string(),
            data_url: None,
            base_path: None,
            site_url: "https://example.github.io".to_string(),
            owner: String::new(),
            logo: "Home".to_string(),
            photo: "assets/img/me.jpg".to_string(),
            publish_resume: false,
            resume_pdf: "assets/pdf/resume.pdf".to_string(),
            cv_pdf: "assets/pdf/cv.pdf".to_string(),
            featured_limit: 5,
        }
    }
}

impl SiteConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(SiteConfig::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Canonical URL without a trailing slash.
    pub fn site_root(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}
