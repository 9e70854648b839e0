//! pomver.toml configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "pomver.toml";

/// Complete configuration, with every section optional in the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub repositories: RepositoriesConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub dependencies: DependenciesConfig,

    #[serde(default)]
    pub lookup: LookupConfig,
}

/// Maven repositories queried for version metadata, in order.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoriesConfig {
    #[serde(default = "default_repository_urls")]
    pub urls: Vec<String>,
}

fn default_repository_urls() -> Vec<String> {
    vec![pomver_maven::MAVEN_CENTRAL.to_string()]
}

impl Default for RepositoriesConfig {
    fn default() -> Self {
        Self {
            urls: default_repository_urls(),
        }
    }
}

/// Workspace scanning behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Root-relative path substrings whose pom.xml files are ignored.
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
}

fn default_excluded_paths() -> Vec<String> {
    vec!["/dalgen".to_string()]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_paths: default_excluded_paths(),
        }
    }
}

/// Which dependencies get checked against the repositories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependenciesConfig {
    /// Group id prefixes to check remotely; empty checks everything.
    #[serde(default)]
    pub group_id_prefixes: Vec<String>,
}

/// Remote lookup tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Loads configuration from an explicit path, or from `pomver.toml` under
/// the workspace root. A missing default file means default settings.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = root.join(CONFIG_FILE);
            if !candidate.exists() {
                return Ok(Config::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(config)
}
