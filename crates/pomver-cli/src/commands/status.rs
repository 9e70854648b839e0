//! The `status` subcommand.

use super::{CliContext, baseline_release, workspace_remote};
use crate::report;
use anyhow::{Result, bail};
use pomver_core::{RemoteVersions, recommend_version, task_number};
use pomver_maven::{WorkspacePom, root_pom};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub branch: Option<String>,
    pub category: String,
    pub task_number: Option<String>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub remote_release: Option<String>,
    pub remote_snapshot: Option<String>,
    pub recommended: Option<String>,
    pub modules: Vec<ModuleEntry>,
}

#[derive(Debug, Serialize)]
pub struct ModuleEntry {
    pub path: String,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let poms = ctx.load_workspace()?;
    let Some(root) = root_pom(&poms) else {
        bail!("no pom.xml found under {}", ctx.root.display());
    };

    let lookup = ctx.lookup();
    let remote = workspace_remote(ctx, &lookup, &root.pom).await;

    let status = build_report(ctx, &poms, root, &remote);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_human(&status);
    }
    Ok(())
}

fn build_report(
    ctx: &CliContext,
    poms: &[WorkspacePom],
    root: &WorkspacePom,
    remote: &RemoteVersions,
) -> StatusReport {
    let baseline = baseline_release(remote, root.pom.effective_version());
    let recommended = recommend_version(ctx.kind, ctx.branch.as_deref(), baseline);

    let modules = poms
        .iter()
        .filter(|p| !std::ptr::eq(*p, root))
        .map(|p| ModuleEntry {
            path: p
                .path
                .strip_prefix(&ctx.root)
                .unwrap_or(&p.path)
                .display()
                .to_string(),
            artifact_id: p.pom.artifact_id.clone(),
            version: p.pom.effective_version().map(str::to_string),
        })
        .collect();

    StatusReport {
        branch: ctx.branch.clone(),
        category: ctx.kind.to_string(),
        task_number: ctx
            .branch
            .as_deref()
            .and_then(task_number)
            .map(str::to_string),
        group_id: root.pom.effective_group_id().map(str::to_string),
        artifact_id: root.pom.artifact_id.clone(),
        version: root.pom.effective_version().map(str::to_string),
        remote_release: remote.release.clone(),
        remote_snapshot: remote.snapshot.clone(),
        recommended,
        modules,
    }
}

fn print_human(status: &StatusReport) {
    let branch = match (&status.branch, &status.task_number) {
        (Some(branch), Some(task)) => format!("{} ({}, task {})", branch, status.category, task),
        (Some(branch), None) => format!("{} ({})", branch, status.category),
        _ => format!("<none> ({})", status.category),
    };
    report::field("Branch", &branch);

    let coords = match (&status.group_id, &status.artifact_id) {
        (Some(group_id), Some(artifact_id)) => format!("{group_id}:{artifact_id}"),
        _ => "<unknown>".to_string(),
    };
    report::field("Workspace", &coords);
    report::field("Version", status.version.as_deref().unwrap_or("<none>"));

    let remote = match (&status.remote_release, &status.remote_snapshot) {
        (None, None) => report::dim("nothing published"),
        (release, snapshot) => format!(
            "release {}, snapshot {}",
            release.as_deref().unwrap_or("-"),
            snapshot.as_deref().unwrap_or("-")
        ),
    };
    report::field("Remote", &remote);

    match &status.recommended {
        Some(version) => report::field("Recommended", &report::green(version)),
        None => report::field("Recommended", &report::dim("nothing to recommend")),
    }

    if !status.modules.is_empty() {
        println!("{}", report::bold("Modules:"));
        for module in &status.modules {
            println!(
                "  {} {}",
                module.artifact_id.as_deref().unwrap_or("<unnamed>"),
                report::dim(module.version.as_deref().unwrap_or("<none>"))
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pomver_core::BranchKind;
    use pomver_maven::PomFile;
    use std::path::PathBuf;

    fn ctx_for(branch: Option<&str>) -> CliContext {
        CliContext {
            root: PathBuf::from("/workspace"),
            config: Config::default(),
            branch: branch.map(str::to_string),
            kind: BranchKind::classify(branch),
            json: false,
        }
    }

    fn workspace_pom(path: &str, depth: usize, pom: PomFile) -> WorkspacePom {
        WorkspacePom {
            path: PathBuf::from(path),
            depth,
            pom,
        }
    }

    #[test]
    fn test_build_report_recommends_from_remote_release() {
        let ctx = ctx_for(Some("qa"));
        let root = workspace_pom(
            "/workspace/pom.xml",
            1,
            PomFile {
                group_id: Some("com.acme.platform".to_string()),
                artifact_id: Some("platform-parent".to_string()),
                version: Some("1.9.2.RELEASE".to_string()),
                packaging: Some("pom".to_string()),
                ..PomFile::default()
            },
        );
        let poms = vec![root.clone()];
        let remote = RemoteVersions {
            release: Some("1.9.3.RELEASE".to_string()),
            snapshot: Some("1.9.4-qa-SNAPSHOT".to_string()),
        };

        let status = build_report(&ctx, &poms, &poms[0], &remote);
        assert_eq!(status.category, "QA");
        assert_eq!(status.recommended.as_deref(), Some("1.9.4-qa-SNAPSHOT"));
        assert!(status.modules.is_empty());
    }

    #[test]
    fn test_build_report_falls_back_to_pom_version() {
        let ctx = ctx_for(Some("master"));
        let root = workspace_pom(
            "/workspace/pom.xml",
            1,
            PomFile {
                artifact_id: Some("platform-parent".to_string()),
                version: Some("2.3.99.RELEASE".to_string()),
                ..PomFile::default()
            },
        );
        let poms = vec![root];
        let status = build_report(&ctx, &poms, &poms[0], &RemoteVersions::default());
        assert_eq!(status.recommended.as_deref(), Some("2.3.100.RELEASE"));
    }

    #[test]
    fn test_build_report_lists_modules_with_relative_paths() {
        let ctx = ctx_for(Some("feature/Task_4521_login"));
        let root = workspace_pom(
            "/workspace/pom.xml",
            1,
            PomFile {
                artifact_id: Some("platform-parent".to_string()),
                version: Some("1.0.0.RELEASE".to_string()),
                packaging: Some("pom".to_string()),
                ..PomFile::default()
            },
        );
        let module = workspace_pom(
            "/workspace/platform-api/pom.xml",
            2,
            PomFile {
                artifact_id: Some("platform-api".to_string()),
                ..PomFile::default()
            },
        );
        let poms = vec![root, module];

        let status = build_report(&ctx, &poms, &poms[0], &RemoteVersions::default());
        assert_eq!(status.task_number.as_deref(), Some("4521"));
        assert_eq!(status.recommended.as_deref(), Some("1.0.1-4521-SNAPSHOT"));
        assert_eq!(status.modules.len(), 1);
        assert_eq!(status.modules[0].path, "platform-api/pom.xml");
    }
}
