//! Port for remote version discovery.

use crate::branch::BranchKind;
use async_trait::async_trait;

/// Latest known versions for one artifact coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteVersions {
    pub release: Option<String>,
    pub snapshot: Option<String>,
}

impl RemoteVersions {
    pub fn is_empty(&self) -> bool {
        self.release.is_none() && self.snapshot.is_none()
    }
}

/// Supplies remote version information for Maven coordinates.
///
/// Lookups are infallible by contract: a source logs transport or parse
/// trouble and answers with an empty [`RemoteVersions`], so one
/// unreachable repository never fails a whole report.
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn lookup(
        &self,
        group_id: &str,
        artifact_id: &str,
        kind: Option<BranchKind>,
    ) -> RemoteVersions;
}
