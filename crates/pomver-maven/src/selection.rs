//! Branch-aware choice among published versions.

use crate::metadata::RepositoryMetadata;
use pomver_core::{BranchKind, RemoteVersions, is_snapshot, max_version, strip_snapshot_suffix};

/// Picks the release and snapshot versions relevant for a branch category.
///
/// The release is whatever `<release>` names. The snapshot depends on the
/// branch: QA and UAT branches want the highest snapshot tagged for their
/// environment, task branches want the most recently deployed task
/// snapshot, and everything else gets the highest snapshot overall.
pub fn select_versions(metadata: &RepositoryMetadata, kind: Option<BranchKind>) -> RemoteVersions {
    let snapshots: Vec<&str> = metadata
        .versions
        .iter()
        .map(String::as_str)
        .filter(|v| is_snapshot(v))
        .collect();

    let snapshot = match kind {
        Some(BranchKind::Qa) => max_tagged(&snapshots, "qa"),
        Some(BranchKind::Uat) => max_tagged(&snapshots, "uat"),
        // Task numbers are unrelated to each other, so ordering them with
        // the comparator would be meaningless. Deployment order is what
        // counts here, and that is document order.
        Some(BranchKind::Task) => snapshots.iter().rev().find(|v| is_task_snapshot(v)).copied(),
        _ => max_version(snapshots.iter().copied()),
    };

    RemoteVersions {
        release: metadata.release.clone(),
        snapshot: snapshot.map(str::to_string),
    }
}

/// Highest snapshot whose name mentions the given environment tag.
fn max_tagged<'a>(snapshots: &[&'a str], tag: &str) -> Option<&'a str> {
    max_version(
        snapshots
            .iter()
            .copied()
            .filter(|v| v.to_ascii_lowercase().contains(tag)),
    )
}

/// A snapshot cut for one task: ends in `-<digits>-SNAPSHOT` and carries no
/// environment tag.
fn is_task_snapshot(version: &str) -> bool {
    let lower = version.to_ascii_lowercase();
    if lower.contains("qa") || lower.contains("uat") {
        return false;
    }
    match strip_snapshot_suffix(version).rsplit_once('-') {
        Some((_, digits)) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
