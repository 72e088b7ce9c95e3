use anyhow::Context;
use clap::Parser;
use colored::*;
use repo_audience::cli::{Cli, CollectArgs, Command, MergeArgs};
use repo_audience::config::MergeConfig;
use repo_audience::merger::Merger;
use repo_audience::pipeline::{Pipeline, Source};
use repo_audience::progress::LogProgress;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Collect(args) => collect(args).await,
        Command::Merge(args) => merge(args),
    }
}

async fn collect(args: CollectArgs) -> anyhow::Result<()> {
    let config = args.to_config().context("Invalid collection settings")?;

    let title = format!("Collecting audience of {}/{}", config.owner, config.repo);
    println!("{}", title.bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    if config.token.is_empty() {
        println!("{}", "No GITHUB_TOKEN set, using unauthenticated requests".yellow());
    }

    let pipeline = Pipeline::new(config).context("Failed to create GitHub client")?;
    let mut progress = LogProgress::new();

    let sources: Vec<Source> = match args.only {
        Some(only) => vec![only.into()],
        None => Source::ALL.to_vec(),
    };

    for source in sources {
        let outcome = pipeline
            .collect(source, &mut progress)
            .await
            .with_context(|| format!("Failed to save {}", source.people()))?;

        match outcome.output {
            Some(path) => println!(
                "✅ {} data saved to {} ({} of {} profiles)",
                source.people(),
                path.display(),
                outcome.profiles,
                outcome.identities
            ),
            None => println!(
                "{}",
                format!("No {} found or failed to fetch data.", source.people()).yellow()
            ),
        }
    }

    if let Some(rate_limit) = pipeline.client().rate_limit() {
        println!(
            "{}",
            format!(
                "Rate limit: {}/{} remaining, resets at {}",
                rate_limit.remaining, rate_limit.limit, rate_limit.reset_time
            )
            .dimmed()
        );
    }

    Ok(())
}

fn merge(args: MergeArgs) -> anyhow::Result<()> {
    let config = MergeConfig::from(args);
    let report = Merger::from(&config)
        .merge(&config.pattern)
        .with_context(|| format!("Failed to merge files matching {}", config.pattern))?;

    match report.output {
        Some(path) => println!(
            "✅ Combined data saved to {} ({} rows from {} files)",
            path.display(),
            report.rows,
            report.files.len()
        ),
        None => println!("{}", "No data to merge.".yellow()),
    }

    if !report.conflicts.is_empty() {
        println!(
            "{}",
            format!(
                "⚠️ {} conflicting values kept from first-seen rows",
                report.conflicts.len()
            )
            .yellow()
        );
        for conflict in &report.conflicts {
            println!(
                "  {} [{}]: kept {:?}, discarded {:?} from {}",
                conflict.key, conflict.column, conflict.kept, conflict.discarded, conflict.file
            );
        }
    }

    Ok(())
}
