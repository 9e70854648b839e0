//! The `recommend` subcommand.

use super::{CliContext, baseline_release, workspace_remote};
use crate::report;
use anyhow::{Result, bail};
use pomver_core::recommend_version;
use pomver_maven::root_pom;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let poms = ctx.load_workspace()?;
    let Some(root) = root_pom(&poms) else {
        bail!("no pom.xml found under {}", ctx.root.display());
    };

    let lookup = ctx.lookup();
    let remote = workspace_remote(ctx, &lookup, &root.pom).await;
    let baseline = baseline_release(&remote, root.pom.effective_version());

    let Some(recommended) = recommend_version(ctx.kind, ctx.branch.as_deref(), baseline) else {
        report::error(&format!(
            "no recommendation for branch category {}",
            ctx.kind
        ));
        std::process::exit(1);
    };

    if ctx.json {
        println!(
            "{}",
            serde_json::json!({
                "branch": ctx.branch,
                "category": ctx.kind.to_string(),
                "baseline": baseline,
                "recommended": recommended,
            })
        );
    } else {
        println!("{recommended}");
    }
    Ok(())
}
