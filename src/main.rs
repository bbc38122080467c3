use anyhow::{Context, Result};
use clap::Parser;
use contrib_ranking::config::Config;
use contrib_ranking::git::{self, GitCli};
use contrib_ranking::{logging, ndjson, ranking};
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Rank contributors of a git repository day by day.
///
/// Emits one JSON object per day with each contributor's cumulative commit
/// count, written to OUTPUT or to stdout.
#[derive(Parser, Debug)]
#[command(name = "daily-ranking", version, about)]
struct Cli {
    /// Path to the git repository
    repo: PathBuf,

    /// NDJSON output file (stdout when omitted)
    output: Option<PathBuf>,

    /// Branch to analyze (default: all branches)
    #[arg(long)]
    branch: Option<String>,

    /// Limit output to the top N contributors, extended for ties (0 = everyone)
    #[arg(long)]
    top: Option<usize>,

    /// Configuration file (default: ./daily-ranking.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging("daily-ranking", true);

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let branch = cli
        .branch
        .or(config.ranking.branch)
        .filter(|b| !b.trim().is_empty());
    let top_n = cli.top.unwrap_or(config.ranking.top_n);

    let repo = git::open_repository(&cli.repo)?;
    info!(
        repo = %repo.display(),
        branch = branch.as_deref().unwrap_or("(all)"),
        "Processing git repository"
    );

    let source = GitCli::new(repo);
    let history = git::collect_history(&source, branch.as_deref())
        .await
        .context("Failed to fetch commits")?;

    let days = ranking::compute_daily_rankings(
        &history.commits,
        &history.origin,
        &history.tags,
        top_n,
    );

    match cli.output {
        Some(path) => ndjson::write_rankings_file(&path, &days)
            .with_context(|| format!("Failed to write output file {}", path.display()))?,
        None => ndjson::write_rankings(io::stdout().lock(), &days)
            .context("Failed to write JSON output")?,
    }

    Ok(())
}
