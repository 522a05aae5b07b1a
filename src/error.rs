use thiserror::Error;

use crate::loader::Resource;

/// Why a single resource could not be obtained.
#[derive(Error, Debug)]
pub enum LoadErrorKind {
    #[error("request failed: {0}")]
    Fetch(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Aggregate load failure. Names the first resource that failed.
#[derive(Error, Debug)]
#[error("failed to load {resource}: {kind}")]
pub struct LoadError {
    pub resource: Resource,
    #[source]
    pub kind: LoadErrorKind,
}

impl LoadError {
    pub fn new(resource: Resource, kind: impl Into<LoadErrorKind>) -> Self {
        LoadError {
            resource,
            kind: kind.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid data_url {url}: {source}")]
    DataUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("storage file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("boot check failed with {0} error(s)")]
    Boot(u32),

    #[error("publication id {0:?} is not a usable route segment")]
    InvalidPublicationId(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
