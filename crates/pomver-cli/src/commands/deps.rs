//! The `deps` subcommand.

use super::CliContext;
use crate::report;
use anyhow::{Result, bail};
use pomver_core::{BranchKind, RemoteVersions, VersionLookup, compare_versions, coordinate_key};
use pomver_maven::{
    PomHandle, VersionOrigin, WorkspacePom, resolve_dependency_version, root_pom,
};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Serialize)]
pub struct DepsReport {
    pub entries: Vec<DepEntry>,
}

#[derive(Debug, Serialize)]
pub struct DepEntry {
    /// Artifact id of the pom declaring this dependency.
    pub module: String,
    pub group_id: String,
    pub artifact_id: String,
    /// Version as written in the pom, placeholders included.
    pub declared: Option<String>,
    pub resolved: Option<String>,
    pub origin: String,
    pub scope: String,
    pub remote_release: Option<String>,
    pub remote_snapshot: Option<String>,
    pub outdated: bool,
}

pub async fn execute(ctx: &CliContext, prefixes: Vec<String>, offline: bool) -> Result<()> {
    let poms = ctx.load_workspace()?;
    let Some(root) = root_pom(&poms) else {
        bail!("no pom.xml found under {}", ctx.root.display());
    };

    let prefixes = if prefixes.is_empty() {
        ctx.config.dependencies.group_id_prefixes.clone()
    } else {
        prefixes
    };

    let mut entries = collect_entries(&poms, root, &prefixes);

    if !offline {
        let lookup = ctx.lookup();
        check_remote(&mut entries, &lookup, ctx.kind).await;
    }

    let deps = DepsReport {
        entries: entries.into_iter().map(|e| e.entry).collect(),
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&deps)?);
    } else {
        print_human(&deps);
    }
    Ok(())
}

struct CollectedEntry {
    entry: DepEntry,
    /// Whether the coordinate matches the configured prefixes and gets a
    /// remote check.
    checked: bool,
}

fn collect_entries(
    poms: &[WorkspacePom],
    root: &WorkspacePom,
    prefixes: &[String],
) -> Vec<CollectedEntry> {
    let mut entries = Vec::new();
    for pom in poms {
        let parent = if std::ptr::eq(pom, root) {
            None
        } else {
            Some(&root.pom)
        };
        let module = pom
            .pom
            .artifact_id
            .clone()
            .unwrap_or_else(|| pom.path.display().to_string());
        for dep in pom.pom.dependencies.iter().filter(|d| !d.managed) {
            let resolved = resolve_dependency_version(dep, &pom.pom, parent);
            let checked = prefixes.is_empty()
                || prefixes.iter().any(|p| dep.group_id.starts_with(p.as_str()));
            entries.push(CollectedEntry {
                entry: DepEntry {
                    module: module.clone(),
                    group_id: dep.group_id.clone(),
                    artifact_id: dep.artifact_id.clone(),
                    declared: dep.version.clone(),
                    resolved: resolved.value,
                    origin: describe_origin(&resolved.origin),
                    scope: dep.scope.as_str().to_string(),
                    remote_release: None,
                    remote_snapshot: None,
                    outdated: false,
                },
                checked,
            });
        }
    }
    entries
}

/// Fetches remote versions for every checked entry and marks the outdated
/// ones.
async fn check_remote(entries: &mut [CollectedEntry], lookup: &VersionLookup, kind: BranchKind) {
    let coordinates: Vec<(String, String)> = entries
        .iter()
        .filter(|e| e.checked)
        .map(|e| (e.entry.group_id.clone(), e.entry.artifact_id.clone()))
        .collect();
    let remote = lookup.lookup_all(&coordinates, Some(kind)).await;
    for entry in entries {
        if entry.checked {
            let key = coordinate_key(&entry.entry.group_id, &entry.entry.artifact_id);
            if let Some(versions) = remote.get(&key) {
                apply_remote(&mut entry.entry, versions);
            }
        }
    }
}

fn describe_origin(origin: &VersionOrigin) -> String {
    match origin {
        VersionOrigin::Direct => "direct".to_string(),
        VersionOrigin::Property { key, owner } => {
            format!("property {} ({})", key, describe_owner(*owner))
        }
        VersionOrigin::Managed { owner } => format!("managed ({})", describe_owner(*owner)),
        VersionOrigin::Unresolved => "unresolved".to_string(),
    }
}

const fn describe_owner(owner: PomHandle) -> &'static str {
    match owner {
        PomHandle::Current => "this pom",
        PomHandle::Parent => "parent",
    }
}

fn apply_remote(entry: &mut DepEntry, remote: &RemoteVersions) {
    entry.remote_release = remote.release.clone();
    entry.remote_snapshot = remote.snapshot.clone();
    entry.outdated = match (entry.resolved.as_deref(), remote.release.as_deref()) {
        (Some(resolved), Some(release)) => {
            compare_versions(release, resolved) == Ordering::Greater
        }
        _ => false,
    };
}

fn print_human(deps: &DepsReport) {
    if deps.entries.is_empty() {
        println!("no dependencies found");
        return;
    }

    let mut by_module: Vec<(&str, Vec<&DepEntry>)> = Vec::new();
    for entry in &deps.entries {
        match by_module.iter_mut().find(|(module, _)| *module == entry.module) {
            Some((_, list)) => list.push(entry),
            None => by_module.push((&entry.module, vec![entry])),
        }
    }

    for (module, list) in by_module {
        println!("{}", report::bold(module));
        for entry in list {
            let version = entry.resolved.as_deref().unwrap_or("?");
            let mut line = format!(
                "  {}:{} {} {}",
                entry.group_id,
                entry.artifact_id,
                version,
                report::dim(&format!("({})", entry.origin))
            );
            if entry.outdated {
                if let Some(release) = &entry.remote_release {
                    line.push_str(&format!(" {}", report::yellow(&format!("→ {release}"))));
                }
            } else if entry.remote_release.is_some() {
                line.push_str(&format!(" {}", report::green("✓")));
            }
            println!("{line}");
        }
    }

    let outdated = deps.entries.iter().filter(|e| e.outdated).count();
    if outdated > 0 {
        println!();
        println!("{}", report::yellow(&format!("{outdated} outdated")));
    }
}
