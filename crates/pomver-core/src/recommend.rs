//! Next-version recommendation from a release baseline.
//!
//! The baseline is the latest known RELEASE version. Its last numeric
//! segment is incremented, rolling over above 100 into the segment to the
//! left, and the branch category appends its suffix convention.

use crate::branch::{BranchKind, task_number};

/// Derives the recommended next version for a branch category.
///
/// Returns `None` only when no release baseline is known; every other
/// input degrades to a best-effort string.
pub fn recommend_version(
    kind: BranchKind,
    branch: Option<&str>,
    baseline_release: Option<&str>,
) -> Option<String> {
    let release = baseline_release?;
    let next = next_base_version(release);

    let recommended = match kind {
        BranchKind::Master | BranchKind::Hotfix | BranchKind::Release => format!("{next}.RELEASE"),
        BranchKind::Qa => format!("{next}-qa-SNAPSHOT"),
        BranchKind::Uat => format!("{next}-uat-SNAPSHOT"),
        BranchKind::Task => match branch.and_then(task_number) {
            Some(task) => format!("{next}-{task}-SNAPSHOT"),
            None => format!("{next}-SNAPSHOT"),
        },
        BranchKind::Other => format!("{next}-SNAPSHOT"),
    };

    Some(recommended)
}

/// Strips the `.RELEASE` / `-SNAPSHOT` suffix and increments the last
/// numeric segment.
///
/// A segment that would exceed 100 resets to 1 and carries into the
/// previous numeric segment; a carry past the first segment prepends a new
/// leading 1 and sets the former first segment to 1. Non-numeric segments
/// pass through untouched and never absorb a carry. A baseline without any
/// numeric segment comes back unchanged.
pub fn next_base_version(version: &str) -> String {
    let base = strip_version_suffix(version);
    let mut parts: Vec<String> = base.split('.').map(str::to_string).collect();

    let Some(start) = parts.iter().rposition(|p| p.parse::<u64>().is_ok()) else {
        return version.to_string();
    };

    let mut index = start;
    loop {
        let Ok(current) = parts[index].parse::<u64>() else {
            break;
        };

        let bumped = current.saturating_add(1);
        if bumped <= 100 {
            parts[index] = bumped.to_string();
            break;
        }

        parts[index] = "1".to_string();
        if index == 0 {
            parts.insert(0, "1".to_string());
            parts[1] = "1".to_string();
            break;
        }

        index -= 1;
        while index > 0 && parts[index].parse::<u64>().is_err() {
            index -= 1;
        }
        if parts[index].parse::<u64>().is_err() {
            break;
        }
    }

    parts.join(".")
}

// Truncate at the leftmost ".RELEASE" or "-SNAPSHOT" marker
// (case-sensitive), whichever comes first.
fn strip_version_suffix(version: &str) -> &str {
    let cut = match (version.find(".RELEASE"), version.find("-SNAPSHOT")) {
        (Some(r), Some(s)) => Some(r.min(s)),
        (Some(r), None) => Some(r),
        (None, Some(s)) => Some(s),
        (None, None) => None,
    };

    match cut {
        Some(i) => &version[..i],
        None => version,
    }
}
