//! pom.xml and Maven repository support for pomver.
//!
//! This crate parses pom.xml files and repository `maven-metadata.xml`
//! documents, resolves where dependency versions are defined, performs
//! minimal textual pom edits, and discovers the pom tree of a workspace.

pub mod edit;
pub mod error;
pub mod metadata;
pub mod pom;
pub mod registry;
pub mod resolve;
pub mod selection;
pub mod workspace;

pub use edit::{replace_dependency_version, replace_project_version, replace_property};
pub use error::{MavenError, Result};
pub use metadata::{RepositoryMetadata, parse_metadata};
pub use pom::{DependencyScope, ParentRef, PomDependency, PomFile, parse_pom};
pub use registry::{MAVEN_CENTRAL, MavenRepoClient, metadata_url};
pub use resolve::{PomHandle, ResolvedVersion, VersionOrigin, resolve_dependency_version};
pub use selection::select_versions;
pub use workspace::{WorkspacePom, find_pom_files, load_workspace, root_pom};
