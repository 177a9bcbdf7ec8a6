//! Command line of `git-tiers`.

use crate::config::{Config, OutputFormat, SortKey};
use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use git2::Repository;
use graph::{render_html, render_text, GitCli, Report, ReportBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

const ABOUT: &str = "Show which branches hold which recent commits, colored by deployment tier.";

/// Width of the branch label column in text output
const TEXT_LABEL_WIDTH: usize = 32;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "git-tiers", about = ABOUT, version)]
pub struct Cli {
    /// Path inside the repository
    #[arg(default_value = ".")]
    pub path: PathBuf,
    /// Number of most recent commits to show
    #[arg(short = 'n', long)]
    pub max_commits: Option<usize>,
    /// Commits read per branch log; defaults to --max-commits
    #[arg(long)]
    pub per_branch_limit: Option<usize>,
    /// Leave merge commits out
    #[arg(long)]
    pub no_merges: bool,
    /// Order branches by their latest commit, stalest first
    #[arg(long)]
    pub sort_by_date: bool,
    /// Do not run `git fetch -p` first
    #[arg(long)]
    pub no_fetch: bool,
    /// Do not add tag columns
    #[arg(long)]
    pub no_tags: bool,
    /// Remote holding the anchor branches
    #[arg(long)]
    pub remote: Option<String>,
    /// Output file, `-` for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Config file; defaults to `.git-tiers.toml` in the repository
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Verbosity level (0-3)
    #[arg(short, action = ArgAction::Count)]
    pub v: u8,
    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Fold the flags given on the command line over `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(max_commits) = self.max_commits {
            config.max_commits = max_commits;
        }
        if self.per_branch_limit.is_some() {
            config.per_branch_limit = self.per_branch_limit;
        }
        if let Some(remote) = &self.remote {
            config.remote = remote.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        config.no_merges |= self.no_merges;
        config.fetch &= !self.no_fetch;
        config.tags &= !self.no_tags;
        if self.sort_by_date {
            config.sort = SortKey::Date;
        }
        config
    }

    pub fn run(self) -> Result<()> {
        let repo = Repository::discover(&self.path)
            .with_context(|| format!("Not in a git repository: {}", self.path.display()))?;
        let root = repo
            .workdir()
            .ok_or_else(|| anyhow!("Repository has no working directory"))?
            .to_path_buf();

        let config = self.apply(Config::load(self.config.as_deref(), &root)?);
        let git = GitCli::new(&root).with_program(config.git.clone());

        let report = ReportBuilder::new(&git)
            .anchors(config.tier_anchors())
            .window(config.max_commits)
            .per_branch_limit(config.per_branch_limit)
            .no_merges(config.no_merges)
            .refresh(config.fetch)
            .include_tags(config.tags)
            .sort(config.sort.into())
            .build()?;

        let rendered = render(&report, config.format)?;
        write_output(&config.output, &rendered)?;
        info!(
            commits = report.commits.len(),
            branches = report.branches.len(),
            output = %config.output.display(),
            "report written"
        );
        Ok(())
    }

    /// Initializes the tracing subscriber
    pub(crate) fn init_tracing_subscriber(self) -> Result<Self> {
        let level = if self.quiet {
            Level::ERROR
        } else {
            match self.v {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))?;

        Ok(self)
    }
}

fn render(report: &Report, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Html => render_html(report),
        OutputFormat::Text => render_text(report, TEXT_LABEL_WIDTH),
        OutputFormat::Json => report.to_json()?,
    })
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
