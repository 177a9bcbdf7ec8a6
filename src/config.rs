use anyhow::{Context, Result};
use clap::ValueEnum;
use graph::{BranchSort, TierAnchors, DEFAULT_WINDOW};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the repository root when no `--config` is given
pub const CONFIG_FILE_NAME: &str = ".git-tiers.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Date,
}

impl From<SortKey> for BranchSort {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => BranchSort::Name,
            SortKey::Date => BranchSort::Date,
        }
    }
}

/// Names of the anchor branches, without the remote prefix
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorNames {
    pub production: String,
    pub staging: String,
    pub master: String,
}

impl Default for AnchorNames {
    fn default() -> Self {
        let anchors = TierAnchors::default();
        Self {
            production: anchors.production,
            staging: anchors.staging,
            master: anchors.master,
        }
    }
}

/// Settings read from `.git-tiers.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_commits: usize,
    pub per_branch_limit: Option<usize>,
    pub no_merges: bool,
    pub sort: SortKey,
    pub remote: String,
    pub fetch: bool,
    pub tags: bool,
    pub git: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub anchors: AnchorNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_commits: DEFAULT_WINDOW,
            per_branch_limit: None,
            no_merges: false,
            sort: SortKey::Name,
            remote: TierAnchors::default().remote,
            fetch: true,
            tags: true,
            git: PathBuf::from("git"),
            output: PathBuf::from("git-tiers.html"),
            format: OutputFormat::Html,
            anchors: AnchorNames::default(),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `explicit` if given, otherwise the repository's config file if it
    /// exists, otherwise the defaults
    pub fn load(explicit: Option<&Path>, repo_root: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = repo_root.join(CONFIG_FILE_NAME);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn tier_anchors(&self) -> TierAnchors {
        TierAnchors {
            remote: self.remote.clone(),
            production: self.anchors.production.clone(),
            staging: self.anchors.staging.clone(),
            master: self.anchors.master.clone(),
        }
    }
}
