use crate::config::{
    CollectorConfig, MergeConfig, DEFAULT_API_URL, DEFAULT_MERGE_OUTPUT, DEFAULT_MERGE_PATTERN,
};
use crate::error::Result;
use crate::pipeline::Source;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[command(name = "repo-audience")]
#[command(about = "Collects GitHub stargazers and forkers into CSV files and merges CSV exports")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch stargazers and forkers of a repository with their profiles
    Collect(CollectArgs),
    /// Combine CSV files into one, deduplicated by profile link
    Merge(MergeArgs),
}

#[derive(clap::Args)]
pub struct CollectArgs {
    /// Repository owner
    #[arg(long, env = "REPO_OWNER")]
    pub owner: String,

    /// Repository name
    #[arg(long, env = "REPO_NAME")]
    pub repo: String,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Directory the CSV files are written to
    #[arg(long, env = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Collect only one of the two lists
    #[arg(long, value_enum)]
    pub only: Option<SourceArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Stargazers,
    Forks,
}

impl From<SourceArg> for Source {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Stargazers => Source::Stargazers,
            SourceArg::Forks => Source::Forks,
        }
    }
}

impl CollectArgs {
    pub fn to_config(&self) -> Result<CollectorConfig> {
        Ok(CollectorConfig::new(&self.owner, &self.repo, &self.token)?
            .with_api_base_url(self.api_url.clone())
            .with_output_dir(self.output_dir.clone()))
    }
}

#[derive(clap::Args)]
pub struct MergeArgs {
    /// Glob pattern selecting the CSV files to combine
    #[arg(long, env = "MERGE_PATTERN", default_value = DEFAULT_MERGE_PATTERN)]
    pub pattern: String,

    /// Combined output file
    #[arg(long, env = "MERGE_OUTPUT", default_value = DEFAULT_MERGE_OUTPUT)]
    pub output: PathBuf,
}

impl From<MergeArgs> for MergeConfig {
    fn from(args: MergeArgs) -> Self {
        MergeConfig {
            pattern: args.pattern,
            output: args.output,
        }
    }
}
