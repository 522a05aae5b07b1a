//! Concurrent fetch-and-aggregate of the site's JSON resources.
//!
//! Every requested resource is fetched at once; the aggregate succeeds only
//! if all of them are retrieved and decoded. The first failure wins and the
//! caller gets no partial data. There is no retry and no timeout beyond the
//! transport's own.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::future::try_join_all;
use log::{debug, error};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::SiteConfig;
use crate::error::{ConfigError, LoadError, LoadErrorKind};
use crate::models::{
    EducationEntry, ExperienceEntry, InterestCategory, Profile, Project, Publication,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Profile,
    Publications,
    Projects,
    Experience,
    Education,
    Interests,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Profile,
        Resource::Publications,
        Resource::Projects,
        Resource::Experience,
        Resource::Education,
        Resource::Interests,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Publications => "publications",
            Resource::Projects => "projects",
            Resource::Experience => "experience",
            Resource::Education => "education",
            Resource::Interests => "interests",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where resource bytes come from.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, LoadErrorKind>;
}

/// Reads `<dir>/<resource>.json`.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSource { dir: dir.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, LoadErrorKind> {
        let path = self.dir.join(resource.file_name());
        debug!("reading {}", path.display());
        Ok(tokio::fs::read(&path).await?)
    }
}

/// GETs `<base>/<resource>.json`. Any non-2xx status is a failure.
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{}/", base))?
        };
        Ok(HttpSource {
            client: reqwest::Client::new(),
            base,
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, LoadErrorKind> {
        let url = self
            .base
            .join(&resource.file_name())
            .map_err(|e| LoadErrorKind::Fetch(e.to_string()))?;
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadErrorKind::Fetch(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(LoadErrorKind::Status(resp.status().as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| LoadErrorKind::Fetch(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Pick the source the config asks for: HTTP when `data_url` is set,
/// otherwise the data directory under `root`.
pub fn source_for(config: &SiteConfig, root: &Path) -> Result<Box<dyn DataSource>, ConfigError> {
    match &config.data_url {
        Some(url) => {
            let source = HttpSource::new(url).map_err(|source| ConfigError::DataUrl {
                url: url.clone(),
                source,
            })?;
            Ok(Box::new(source))
        }
        None => Ok(Box::new(FileSource::new(root.join(&config.data_dir)))),
    }
}

/// Fetch and decode one resource.
pub async fn fetch_json<T: DeserializeOwned>(
    source: &dyn DataSource,
    resource: Resource,
) -> Result<T, LoadError> {
    let bytes = source
        .fetch(resource)
        .await
        .map_err(|kind| LoadError::new(resource, kind))?;
    serde_json::from_slice(&bytes).map_err(|e| LoadError::new(resource, e))
}

/// Decoded collections, keyed by resource. Only requested resources are set.
#[derive(Debug, Default)]
pub struct SiteData {
    pub profile: Option<Profile>,
    pub publications: Option<Vec<Publication>>,
    pub projects: Option<Vec<Project>>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub interests: Option<Vec<InterestCategory>>,
}

enum Decoded {
    Profile(Profile),
    Publications(Vec<Publication>),
    Projects(Vec<Project>),
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    Interests(Vec<InterestCategory>),
}

async fn fetch_decoded(source: &dyn DataSource, resource: Resource) -> Result<Decoded, LoadError> {
    Ok(match resource {
        Resource::Profile => Decoded::Profile(fetch_json(source, resource).await?),
        Resource::Publications => Decoded::Publications(fetch_json(source, resource).await?),
        Resource::Projects => Decoded::Projects(fetch_json(source, resource).await?),
        Resource::Experience => Decoded::Experience(fetch_json(source, resource).await?),
        Resource::Education => Decoded::Education(fetch_json(source, resource).await?),
        Resource::Interests => Decoded::Interests(fetch_json(source, resource).await?),
    })
}

/// Fetch every resource in `resources` concurrently. Fails as a whole on
/// the first error, after logging it.
pub async fn load(source: &dyn DataSource, resources: &[Resource]) -> Result<SiteData, LoadError> {
    let fetches = resources.iter().map(|&r| fetch_decoded(source, r));
    let decoded = try_join_all(fetches).await.map_err(|e| {
        error!("Error loading data: {}", e);
        e
    })?;

    let mut data = SiteData::default();
    for d in decoded {
        match d {
            Decoded::Profile(v) => data.profile = Some(v),
            Decoded::Publications(v) => data.publications = Some(v),
            Decoded::Projects(v) => data.projects = Some(v),
            Decoded::Experience(v) => data.experience = Some(v),
            Decoded::Education(v) => data.education = Some(v),
            Decoded::Interests(v) => data.interests = Some(v),
        }
    }
    Ok(data)
}

/// Everything the home page needs, all present.
#[derive(Debug)]
pub struct HomeData {
    pub profile: Profile,
    pub publications: Vec<Publication>,
    pub projects: Vec<Project>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub interests: Vec<InterestCategory>,
}

/// Fixed-shape home-page aggregate: six concurrent fetches, fail-fast.
pub async fn load_home(source: &dyn DataSource) -> Result<HomeData, LoadError> {
    let joined = tokio::try_join!(
        fetch_json::<Profile>(source, Resource::Profile),
        fetch_json::<Vec<Publication>>(source, Resource::Publications),
        fetch_json::<Vec<Project>>(source, Resource::Projects),
        fetch_json::<Vec<ExperienceEntry>>(source, Resource::Experience),
        fetch_json::<Vec<EducationEntry>>(source, Resource::Education),
        fetch_json::<Vec<InterestCategory>>(source, Resource::Interests),
    );
    match joined {
        Ok((profile, publications, projects, experience, education, interests)) => Ok(HomeData {
            profile,
            publications,
            projects,
            experience,
            education,
            interests,
        }),
        Err(e) => {
            error!("Error loading data: {}", e);
            Err(e)
        }
    }
}
