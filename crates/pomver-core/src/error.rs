//! Shared error type for the pomver crates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP request failed for '{url}': {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status {status} for '{url}'")]
    Status { url: String, status: u16 },

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Status {
            url: "https://repo.example.com/maven-metadata.xml".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected HTTP status 404 for 'https://repo.example.com/maven-metadata.xml'"
        );

        let err = CoreError::CacheError("poisoned entry".into());
        assert!(err.to_string().contains("poisoned entry"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err: CoreError = io_err.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
