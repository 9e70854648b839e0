//! Where a dependency's effective version comes from.

use crate::pom::{PomDependency, PomFile};

/// Built-in placeholder resolving to the current pom's own version.
const PROJECT_VERSION_KEY: &str = "project.version";

/// Which pom supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomHandle {
    Current,
    Parent,
}

/// Definition site of a dependency version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOrigin {
    /// Literal version on the `<dependency>` element itself.
    Direct,
    /// Version written as `${key}` and defined in `<properties>`.
    Property { key: String, owner: PomHandle },
    /// Version supplied by a `<dependencyManagement>` table.
    Managed { owner: PomHandle },
    /// No version could be determined.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub value: Option<String>,
    pub origin: VersionOrigin,
}

impl ResolvedVersion {
    const fn unresolved() -> Self {
        Self {
            value: None,
            origin: VersionOrigin::Unresolved,
        }
    }
}

/// Determines the effective version of a dependency and where it is
/// defined, using the current pom and optionally its parent.
///
/// Properties declared in the current pom shadow the parent's, and so do
/// `<dependencyManagement>` entries. Managed values get one further round
/// of `${...}` resolution. Nothing here errors; what cannot be resolved
/// comes back as [`VersionOrigin::Unresolved`].
pub fn resolve_dependency_version(
    dep: &PomDependency,
    current: &PomFile,
    parent: Option<&PomFile>,
) -> ResolvedVersion {
    if let Some(declared) = dep.version.as_deref() {
        return match property_key(declared) {
            Some(key) => match lookup_property(key, current, parent) {
                Some((value, owner)) => ResolvedVersion {
                    value: Some(value),
                    origin: VersionOrigin::Property {
                        key: key.to_string(),
                        owner,
                    },
                },
                None => ResolvedVersion::unresolved(),
            },
            None => ResolvedVersion {
                value: Some(declared.to_string()),
                origin: VersionOrigin::Direct,
            },
        };
    }

    let Some((managed, owner)) = lookup_managed(dep, current, parent) else {
        return ResolvedVersion::unresolved();
    };
    let value = match property_key(&managed) {
        Some(key) => lookup_property(key, current, parent).map(|(value, _)| value),
        None => Some(managed),
    };
    match value {
        Some(value) => ResolvedVersion {
            value: Some(value),
            origin: VersionOrigin::Managed { owner },
        },
        None => ResolvedVersion::unresolved(),
    }
}

/// Extracts `key` from a `${key}` placeholder.
fn property_key(value: &str) -> Option<&str> {
    value.strip_prefix("${").and_then(|rest| rest.strip_suffix('}'))
}

fn lookup_property(
    key: &str,
    current: &PomFile,
    parent: Option<&PomFile>,
) -> Option<(String, PomHandle)> {
    if key == PROJECT_VERSION_KEY {
        return current
            .effective_version()
            .map(|v| (v.to_string(), PomHandle::Current));
    }
    if let Some(value) = current.property(key) {
        return Some((value.to_string(), PomHandle::Current));
    }
    parent
        .and_then(|p| p.property(key))
        .map(|v| (v.to_string(), PomHandle::Parent))
}

fn lookup_managed(
    dep: &PomDependency,
    current: &PomFile,
    parent: Option<&PomFile>,
) -> Option<(String, PomHandle)> {
    let managed_in = |pom: &PomFile| {
        pom.dependencies
            .iter()
            .find(|d| {
                d.managed && d.group_id == dep.group_id && d.artifact_id == dep.artifact_id
            })
            .and_then(|d| d.version.clone())
    };
    if let Some(version) = managed_in(current) {
        return Some((version, PomHandle::Current));
    }
    parent
        .and_then(managed_in)
        .map(|version| (version, PomHandle::Parent))
}
