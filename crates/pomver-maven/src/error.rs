//! Errors specific to pom.xml handling and repository metadata.

use pomver_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MavenError {
    #[error("Failed to parse XML: {message}")]
    ParseError { message: String },

    #[error("Invalid pom.xml at '{path}': {message}")]
    InvalidPom { path: String, message: String },

    #[error("No <version> element found to update")]
    VersionNotFound,

    #[error("Property '{key}' not found in <properties>")]
    PropertyNotFound { key: String },

    #[error("Dependency '{group_id}:{artifact_id}' not found")]
    DependencyNotFound {
        group_id: String,
        artifact_id: String,
    },

    #[error("Repository request failed for '{url}': {source}")]
    RegistryError {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MavenError>;

impl From<CoreError> for MavenError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Http { url, source } => Self::RegistryError {
                url,
                source: Box::new(source),
            },
            CoreError::Status { url, status } => Self::RegistryError {
                url,
                source: Box::new(std::io::Error::other(format!("HTTP status {status}"))),
            },
            CoreError::CacheError(msg) => Self::CacheError(msg),
            CoreError::Io(e) => Self::Io(e),
        }
    }
}

impl From<MavenError> for CoreError {
    fn from(err: MavenError) -> Self {
        match err {
            MavenError::Io(e) => Self::Io(e),
            other => Self::CacheError(other.to_string()),
        }
    }
}
