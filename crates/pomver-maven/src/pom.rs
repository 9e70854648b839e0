//! pom.xml model and event-based parsing.
//!
//! The parser walks the document once, tracking the open-element path to
//! tell project-level fields apart from the identically named tags inside
//! `<parent>`, `<dependency>`, or `<plugin>` blocks. Dependencies under
//! `<build>` and `<profiles>` are not collected.

use crate::error::{MavenError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Dependency scope as declared in a pom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyScope {
    #[default]
    Compile,
    Test,
    Runtime,
    Provided,
    System,
    Import,
}

impl std::str::FromStr for DependencyScope {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "test" => Self::Test,
            "runtime" => Self::Runtime,
            "provided" => Self::Provided,
            "system" => Self::System,
            "import" => Self::Import,
            _ => Self::Compile,
        })
    }
}

impl DependencyScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Test => "test",
            Self::Runtime => "runtime",
            Self::Provided => "provided",
            Self::System => "system",
            Self::Import => "import",
        }
    }
}

/// `<parent>` coordinates of a pom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRef {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

/// One `<dependency>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    /// Declared version, possibly a `${property}` placeholder.
    pub version: Option<String>,
    pub scope: DependencyScope,
    /// Declared under `<dependencyManagement>` rather than `<dependencies>`.
    pub managed: bool,
}

impl PomDependency {
    /// Canonical `groupId:artifactId` form.
    pub fn coordinate(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// Parsed view of one pom.xml.
#[derive(Debug, Clone, Default)]
pub struct PomFile {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub parent: Option<ParentRef>,
    /// `<properties>` entries in document order.
    pub properties: Vec<(String, String)>,
    /// Entries from `<dependencies>` and `<dependencyManagement>`, flagged
    /// via [`PomDependency::managed`].
    pub dependencies: Vec<PomDependency>,
    /// `<modules><module>` entries.
    pub modules: Vec<String>,
}

impl PomFile {
    /// Project group id, falling back to the parent's.
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or_else(|| self.parent.as_ref().and_then(|p| p.group_id.as_deref()))
    }

    /// Project version, falling back to the parent's.
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or_else(|| self.parent.as_ref().and_then(|p| p.version.as_deref()))
    }

    /// Looks up a `<properties>` entry by key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this pom aggregates modules (`<packaging>pom</packaging>`).
    pub fn is_aggregator(&self) -> bool {
        self.packaging.as_deref() == Some("pom")
    }
}

#[derive(Default)]
struct DepAccum {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
    managed: bool,
}

impl DepAccum {
    fn finish(self) -> Option<PomDependency> {
        Some(PomDependency {
            group_id: self.group_id?,
            artifact_id: self.artifact_id?,
            version: self.version,
            scope: self
                .scope
                .map(|s| s.parse::<DependencyScope>().unwrap_or_default())
                .unwrap_or_default(),
            managed: self.managed,
        })
    }
}

/// Parses a pom.xml document.
pub fn parse_pom(content: &str) -> Result<PomFile> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut pom = PomFile::default();
    let mut parent = ParentRef::default();
    let mut has_parent = false;
    let mut current_dep: Option<DepAccum> = None;
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event().map_err(|e| MavenError::ParseError {
            message: e.to_string(),
        })? {
            Event::Start(ref e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                let at: Vec<&str> = path.iter().map(String::as_str).collect();
                match at.as_slice() {
                    ["project", "parent"] => has_parent = true,
                    ["project", "dependencies", "dependency"] => {
                        current_dep = Some(DepAccum::default());
                    }
                    ["project", "dependencyManagement", "dependencies", "dependency"] => {
                        current_dep = Some(DepAccum {
                            managed: true,
                            ..DepAccum::default()
                        });
                    }
                    _ => {}
                }
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
                    ["project", "groupId"] => pom.group_id = Some(text),
                    ["project", "artifactId"] => pom.artifact_id = Some(text),
                    ["project", "version"] => pom.version = Some(text),
                    ["project", "packaging"] => pom.packaging = Some(text),
                    ["project", "parent", "groupId"] => parent.group_id = Some(text),
                    ["project", "parent", "artifactId"] => parent.artifact_id = Some(text),
                    ["project", "parent", "version"] => parent.version = Some(text),
                    ["project", "properties", key] => {
                        pom.properties.push(((*key).to_string(), text));
                    }
                    ["project", "modules", "module"] => pom.modules.push(text),
                    ["project", "dependencies", "dependency", field]
                    | ["project", "dependencyManagement", "dependencies", "dependency", field] => {
                        if let Some(dep) = current_dep.as_mut() {
                            match *field {
                                "groupId" => dep.group_id = Some(text),
                                "artifactId" => dep.artifact_id = Some(text),
                                "version" => dep.version = Some(text),
                                "scope" => dep.scope = Some(text),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                let at: Vec<&str> = path.iter().map(String::as_str).collect();
                if matches!(
                    at.as_slice(),
                    ["project", "dependencies", "dependency"]
                        | ["project", "dependencyManagement", "dependencies", "dependency"]
                ) && let Some(dep) = current_dep.take().and_then(DepAccum::finish)
                {
                    pom.dependencies.push(dep);
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if has_parent {
        pom.parent = Some(parent);
    }

    Ok(pom)
}
