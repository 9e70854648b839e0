//! maven-metadata.xml parsing.

use crate::error::{MavenError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Parsed view of a repository's `maven-metadata.xml` for one artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    /// `<versioning><latest>` value.
    pub latest: Option<String>,
    /// `<versioning><release>` value.
    pub release: Option<String>,
    /// `<versioning><versions><version>` entries in document order.
    ///
    /// Repositories append newly deployed versions at the end, so document
    /// order doubles as deployment order.
    pub versions: Vec<String>,
    /// `<versioning><lastUpdated>` timestamp, kept as the raw string.
    pub last_updated: Option<String>,
}

/// Parses a `maven-metadata.xml` document.
pub fn parse_metadata(content: &str) -> Result<RepositoryMetadata> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut metadata = RepositoryMetadata::default();
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event().map_err(|e| MavenError::ParseError {
            message: e.to_string(),
        })? {
            Event::Start(ref e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
            }
            Event::Text(ref e) => {
                let Ok(text) = e.decode() else { continue };
                let text = text.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                let text = quick_xml::escape::unescape(&text)
                    .map(|c| c.into_owned())
                    .unwrap_or(text);

                let at: Vec<&str> = path.iter().map(String::as_str).collect();
                match at.as_slice() {
                    ["metadata", "groupId"] => metadata.group_id = Some(text),
                    ["metadata", "artifactId"] => metadata.artifact_id = Some(text),
                    ["metadata", "versioning", "latest"] => metadata.latest = Some(text),
                    ["metadata", "versioning", "release"] => metadata.release = Some(text),
                    ["metadata", "versioning", "versions", "version"] => {
                        metadata.versions.push(text);
                    }
                    ["metadata", "versioning", "lastUpdated"] => {
                        metadata.last_updated = Some(text);
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}
