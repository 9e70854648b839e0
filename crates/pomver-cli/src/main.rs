use anyhow::Result;
use clap::{Parser, Subcommand};
use pomver_core::BranchKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod report;

/// Environment fallback for the branch name, used when `--branch` is absent.
const BRANCH_ENV: &str = "POMVER_BRANCH";

/// Version tooling for Maven workspaces
#[derive(Parser)]
#[command(name = "pomver")]
#[command(about = "Inspect and bump versions across a Maven pom tree")]
#[command(version)]
struct Cli {
    /// Path to the workspace root (defaults to current directory)
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Path to the config file (defaults to pomver.toml in the root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Branch name to classify (defaults to $POMVER_BRANCH)
    #[arg(long, global = true)]
    branch: Option<String>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show workspace coordinates, branch category, and the recommended version
    Status,
    /// Print the recommended next version for the current branch
    Recommend,
    /// Write a version into every pom in the workspace
    Set {
        /// Version to write, for example 1.2.3-qa-SNAPSHOT
        #[arg(required_unless_present = "recommend")]
        version: Option<String>,

        /// Use the recommended version instead of an explicit one
        #[arg(long, conflicts_with = "version")]
        recommend: bool,

        /// Show what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// List dependencies with their resolved versions and remote releases
    Deps {
        /// Only check remote versions for group ids with this prefix (repeatable)
        #[arg(long = "prefix")]
        prefixes: Vec<String>,

        /// Skip remote lookups entirely
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config(&cli.root, cli.config.as_deref())?;
    let branch = cli.branch.or_else(|| std::env::var(BRANCH_ENV).ok());
    let kind = BranchKind::classify(branch.as_deref());
    tracing::debug!("branch {:?} classified as {}", branch, kind);

    let ctx = commands::CliContext {
        root: cli.root,
        config,
        branch,
        kind,
        json: cli.json,
    };

    match cli.command {
        Commands::Status => commands::status::execute(&ctx).await,
        Commands::Recommend => commands::recommend::execute(&ctx).await,
        Commands::Set {
            version,
            recommend,
            dry_run,
        } => commands::set::execute(&ctx, version, recommend, dry_run).await,
        Commands::Deps { prefixes, offline } => {
            commands::deps::execute(&ctx, prefixes, offline).await
        }
    }
}
