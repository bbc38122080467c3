use anyhow::{Context, Result};
use clap::Parser;
use contrib_ranking::config::{self, Config};
use contrib_ranking::error::RankingError;
use contrib_ranking::viewer::{self, Playback, Renderer};
use contrib_ranking::{logging, ndjson};
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

/// Play back daily contributor rankings as an animated bar chart.
#[derive(Parser, Debug)]
#[command(name = "daily-ranking-viewer", version, about)]
struct Cli {
    /// NDJSON rankings produced by daily-ranking ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Maximum number of contributors to display (the terminal height may show fewer)
    #[arg(short = 'n', long = "top")]
    top: Option<usize>,

    /// Time between days, e.g. 500ms, 1s, 1.5s (a bare number is milliseconds)
    #[arg(long, value_parser = config::parse_speed)]
    speed: Option<Duration>,

    /// Regex for names drawn in the highlight colour
    #[arg(long)]
    highlight: Option<String>,

    /// Configuration file (default: ./daily-ranking.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging("daily-ranking-viewer", false);

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let top_n = cli.top.unwrap_or(config.viewer.top_n);
    let speed = cli.speed.unwrap_or_else(|| config.viewer.speed());
    let pattern = cli.highlight.unwrap_or(config.viewer.highlight);
    let highlight = Regex::new(&pattern).map_err(RankingError::from)?;

    let days = ndjson::read_rankings_from(cli.input.as_deref()).context("Error reading input")?;
    if days.is_empty() {
        return Err(RankingError::EmptyInput.into());
    }

    viewer::run(Playback::new(days, top_n, speed), Renderer::new(highlight))
        .await
        .context("Error running viewer")?;
    Ok(())
}
