//! The `set` subcommand.

use super::{CliContext, baseline_release, workspace_remote};
use crate::report;
use anyhow::{Context, Result, bail};
use pomver_core::recommend_version;
use pomver_maven::{MavenError, replace_project_version, root_pom};
use std::fs;

pub async fn execute(
    ctx: &CliContext,
    version: Option<String>,
    recommend: bool,
    dry_run: bool,
) -> Result<()> {
    let poms = ctx.load_workspace()?;
    let Some(root) = root_pom(&poms) else {
        bail!("no pom.xml found under {}", ctx.root.display());
    };

    let target = match version {
        Some(version) => version,
        None => {
            debug_assert!(recommend);
            let lookup = ctx.lookup();
            let remote = workspace_remote(ctx, &lookup, &root.pom).await;
            let baseline = baseline_release(&remote, root.pom.effective_version());
            match recommend_version(ctx.kind, ctx.branch.as_deref(), baseline) {
                Some(recommended) => recommended,
                None => {
                    report::error(&format!(
                        "no recommendation for branch category {}",
                        ctx.kind
                    ));
                    std::process::exit(1);
                }
            }
        }
    };

    let mut changed = 0usize;
    for pom in &poms {
        let content = fs::read_to_string(&pom.path)
            .with_context(|| format!("reading {}", pom.path.display()))?;
        let updated = match replace_project_version(&content, &target) {
            Ok(updated) => updated,
            Err(MavenError::VersionNotFound) => {
                report::warning(&format!(
                    "{} has no <version> element, skipping",
                    pom.path.display()
                ));
                continue;
            }
            Err(e) => return Err(e).context(format!("updating {}", pom.path.display())),
        };
        if updated == content {
            continue;
        }
        if dry_run {
            println!("would update {} to {}", pom.path.display(), target);
        } else {
            fs::write(&pom.path, &updated)
                .with_context(|| format!("writing {}", pom.path.display()))?;
            report::success(&format!("updated {} to {}", pom.path.display(), target));
        }
        changed += 1;
    }

    if changed == 0 {
        println!("nothing to update, all poms already at {target}");
    }
    Ok(())
}
