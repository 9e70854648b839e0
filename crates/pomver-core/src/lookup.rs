//! Concurrent remote lookups with memoization and a deadline.

use crate::branch::BranchKind;
use crate::source::{RemoteVersions, VersionSource};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Memo key for one artifact, `"{group_id}:{artifact_id}"`.
pub fn coordinate_key(group_id: &str, artifact_id: &str) -> String {
    format!("{group_id}:{artifact_id}")
}

/// Fan-out lookup service over a [`VersionSource`].
///
/// Results are memoized per coordinate for the lifetime of the service,
/// so a multi-module scan asks the network once per artifact. Batch
/// lookups run concurrently under a single deadline; coordinates that do
/// not resolve in time come back empty rather than failing the batch.
pub struct VersionLookup {
    source: Arc<dyn VersionSource>,
    cache: DashMap<String, RemoteVersions>,
    timeout: Duration,
}

impl VersionLookup {
    pub fn new(source: Arc<dyn VersionSource>) -> Self {
        Self::with_timeout(source, DEFAULT_LOOKUP_TIMEOUT)
    }

    pub fn with_timeout(source: Arc<dyn VersionSource>, timeout: Duration) -> Self {
        Self {
            source,
            cache: DashMap::new(),
            timeout,
        }
    }

    /// Memoized single lookup.
    pub async fn lookup(
        &self,
        group_id: &str,
        artifact_id: &str,
        kind: Option<BranchKind>,
    ) -> RemoteVersions {
        let key = coordinate_key(group_id, artifact_id);
        if let Some(hit) = self.cache.get(&key) {
            return hit.value().clone();
        }

        let versions = self.source.lookup(group_id, artifact_id, kind).await;
        self.cache.insert(key, versions.clone());
        versions
    }

    /// Resolves every coordinate concurrently under one deadline.
    ///
    /// The returned map is keyed by [`coordinate_key`]. On expiry the
    /// coordinates resolved so far keep their results and the rest map to
    /// empty [`RemoteVersions`].
    pub async fn lookup_all(
        &self,
        coordinates: &[(String, String)],
        kind: Option<BranchKind>,
    ) -> HashMap<String, RemoteVersions> {
        let pending: Vec<&(String, String)> = coordinates
            .iter()
            .filter(|(g, a)| !self.cache.contains_key(&coordinate_key(g, a)))
            .collect();

        if !pending.is_empty() {
            tracing::debug!("looking up {} artifacts", pending.len());
            let lookups = pending.iter().map(|(g, a)| self.lookup(g, a, kind));
            let all = futures::future::join_all(lookups);
            if tokio::time::timeout(self.timeout, all).await.is_err() {
                tracing::warn!("remote version lookup timed out after {:?}", self.timeout);
            }
        }

        coordinates
            .iter()
            .map(|(g, a)| {
                let key = coordinate_key(g, a);
                let versions = self
                    .cache
                    .get(&key)
                    .map(|hit| hit.value().clone())
                    .unwrap_or_default();
                (key, versions)
            })
            .collect()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
