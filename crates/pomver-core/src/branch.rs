//! Branch name classification.
//!
//! Branch names follow in-house conventions: plain environment branches
//! (`master`, `qa`, `uat`, `hotfix`, `release`), deployment-tool branches
//! under `walle/fix-walle/` and `walle/Conflict_`, and task branches
//! carrying a `Task_<number>` marker. The category picks the version
//! suffix convention for a build.

use std::fmt;

const FIX_WALLE_PREFIX: &str = "walle/fix-walle/";
const CONFLICT_PREFIX: &str = "walle/Conflict_";
const TASK_MARKER: &str = "Task_";

/// Category derived from a branch name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    Master,
    Qa,
    Uat,
    Hotfix,
    Release,
    Task,
    Other,
}

impl BranchKind {
    /// Classifies a branch name. Total over all inputs, first match wins.
    pub fn classify(branch: Option<&str>) -> Self {
        let Some(name) = branch else {
            return Self::Other;
        };

        if name.eq_ignore_ascii_case("master") {
            return Self::Master;
        }
        if name.eq_ignore_ascii_case("qa") {
            return Self::Qa;
        }
        if name.eq_ignore_ascii_case("uat") {
            return Self::Uat;
        }
        if name.eq_ignore_ascii_case("hotfix") {
            return Self::Hotfix;
        }
        if name.eq_ignore_ascii_case("release") {
            return Self::Release;
        }

        if let Some(rest) = name.strip_prefix(FIX_WALLE_PREFIX) {
            return Self::from_fix_walle(rest);
        }
        if let Some(rest) = name.strip_prefix(CONFLICT_PREFIX) {
            return Self::from_conflict(rest);
        }
        if name.contains(TASK_MARKER) {
            return Self::Task;
        }

        Self::Other
    }

    // Environment markers embedded in the branch the deployment tool cut
    // the fix from, e.g. walle/fix-walle/app-uat-SNAPSHOT.
    fn from_fix_walle(rest: &str) -> Self {
        let lower = rest.to_ascii_lowercase();
        if lower.contains("-qa-") {
            Self::Qa
        } else if lower.contains("-uat-") {
            Self::Uat
        } else if lower.contains("-hotfix-") {
            Self::Hotfix
        } else if lower.contains("-release-") {
            Self::Release
        } else {
            Self::Other
        }
    }

    // Environment name between Conflict_ and the next underscore, e.g.
    // walle/Conflict_qa_20240101.
    fn from_conflict(rest: &str) -> Self {
        let marker = rest.split('_').next().unwrap_or("");
        match marker.to_ascii_lowercase().as_str() {
            "qa" => Self::Qa,
            "uat" => Self::Uat,
            "hotfix" => Self::Hotfix,
            "release" => Self::Release,
            "master" => Self::Master,
            _ => Self::Other,
        }
    }

    /// Canonical upper-case category name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Master => "MASTER",
            Self::Qa => "QA",
            Self::Uat => "UAT",
            Self::Hotfix => "HOTFIX",
            Self::Release => "RELEASE",
            Self::Task => "TASK",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digits immediately following the `Task_` marker, e.g. `98765` in
/// `feature/Task_98765_login`. `None` when the marker is absent or not
/// followed by a digit.
pub fn task_number(branch: &str) -> Option<&str> {
    let start = branch.find(TASK_MARKER)? + TASK_MARKER.len();
    let rest = &branch[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 { None } else { Some(&rest[..end]) }
}
