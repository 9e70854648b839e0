//! CLI subcommands.

pub mod deps;
pub mod recommend;
pub mod set;
pub mod status;

use crate::config::Config;
use anyhow::{Context, Result};
use pomver_core::{BranchKind, HttpCache, RemoteVersions, VersionLookup};
use pomver_maven::{MavenRepoClient, WorkspacePom, load_workspace};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Everything a subcommand needs that main resolved up front.
pub struct CliContext {
    pub root: PathBuf,
    pub config: Config,
    /// Branch name from the flag or environment, if any.
    pub branch: Option<String>,
    pub kind: BranchKind,
    pub json: bool,
}

impl CliContext {
    /// Version lookup service over the configured repositories.
    pub fn lookup(&self) -> VersionLookup {
        let cache = Arc::new(HttpCache::with_ttl(Duration::from_secs(
            self.config.lookup.cache_ttl_secs,
        )));
        let client = MavenRepoClient::new(cache, self.config.repositories.urls.clone());
        VersionLookup::with_timeout(
            Arc::new(client),
            Duration::from_secs(self.config.lookup.timeout_secs),
        )
    }

    /// Scans and parses the workspace pom tree.
    pub fn load_workspace(&self) -> Result<Vec<WorkspacePom>> {
        load_workspace(&self.root, &self.config.scan.excluded_paths)
            .with_context(|| format!("scanning workspace under {}", self.root.display()))
    }
}

/// Baseline for recommendations: the released version known remotely,
/// else whatever the workspace pom says.
pub fn baseline_release<'a>(
    remote: &'a RemoteVersions,
    pom_version: Option<&'a str>,
) -> Option<&'a str> {
    remote.release.as_deref().or(pom_version)
}

/// Remote versions for the workspace's own coordinates.
pub async fn workspace_remote(
    ctx: &CliContext,
    lookup: &VersionLookup,
    pom: &pomver_maven::PomFile,
) -> RemoteVersions {
    match (pom.effective_group_id(), pom.artifact_id.as_deref()) {
        (Some(group_id), Some(artifact_id)) => {
            lookup.lookup(group_id, artifact_id, Some(ctx.kind)).await
        }
        _ => RemoteVersions::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_prefers_remote_release() {
        let remote = RemoteVersions {
            release: Some("2.0.0.RELEASE".to_string()),
            snapshot: None,
        };
        assert_eq!(
            baseline_release(&remote, Some("1.0.0.RELEASE")),
            Some("2.0.0.RELEASE")
        );
    }

    #[test]
    fn test_baseline_falls_back_to_pom_version() {
        let remote = RemoteVersions::default();
        assert_eq!(
            baseline_release(&remote, Some("1.0.0.RELEASE")),
            Some("1.0.0.RELEASE")
        );
        assert_eq!(baseline_release(&remote, None), None);
    }
}
