//! Reading commit history, tags and the origin remote from a repository.

pub mod parse;

use crate::error::{RankingError, Result};
use crate::types::{Commit, History, Tag};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, warn};

pub use parse::{parse_log_output, parse_tag_output, ParsedLog};

/// Source of repository history for the ranking.
#[async_trait::async_trait]
pub trait HistorySource: Send + Sync {
    /// Commits reachable from `branch`, or from every ref when `None`,
    /// sorted oldest first.
    async fn commits(&self, branch: Option<&str>) -> Result<Vec<Commit>>;

    /// Tags sorted by date.
    async fn tags(&self) -> Result<Vec<Tag>>;

    /// URL of the `origin` remote.
    async fn origin_url(&self) -> Result<String>;
}

/// Resolves `path` to an absolute repository root with a `.git` entry.
pub fn open_repository(path: &Path) -> Result<PathBuf> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if !abs.exists() {
        return Err(RankingError::DirectoryNotFound(abs));
    }
    // .git may be a file for worktrees and submodules
    if !abs.join(".git").exists() {
        return Err(RankingError::NotARepository(abs));
    }
    Ok(abs)
}

/// Revision argument for `git log`: the branch, or `--all` when none (or an
/// empty name) is given.
pub fn log_revision(branch: Option<&str>) -> &str {
    branch.filter(|b| !b.trim().is_empty()).unwrap_or("--all")
}

/// Runs the `git` executable against a local checkout.
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new<P: Into<PathBuf>>(repo: P) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .await?;

        if !output.status.success() {
            return Err(RankingError::GitCommand {
                command: format!("git {}", args.first().copied().unwrap_or_default()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait::async_trait]
impl HistorySource for GitCli {
    async fn commits(&self, branch: Option<&str>) -> Result<Vec<Commit>> {
        let mut args = vec!["log", log_revision(branch)];
        args.extend([parse::LOG_FORMAT, "--date-order"]);
        let output = self.run(&args).await?;

        let parsed = parse_log_output(&output);
        if parsed.skipped > 0 {
            warn!("Skipped {} unparseable log lines", parsed.skipped);
        }
        Ok(parsed.commits)
    }

    async fn tags(&self) -> Result<Vec<Tag>> {
        let output = self
            .run(&["for-each-ref", parse::TAG_FORMAT, "refs/tags/"])
            .await?;
        Ok(parse_tag_output(&output))
    }

    async fn origin_url(&self) -> Result<String> {
        let output = self.run(&["remote", "get-url", "origin"]).await?;
        Ok(output.trim().to_string())
    }
}

/// Collects everything the ranking needs. Only the commit log is required;
/// a missing origin or tag list degrades to empty values.
pub async fn collect_history(source: &dyn HistorySource, branch: Option<&str>) -> Result<History> {
    let commits = source.commits(branch).await?;
    info!(commits = commits.len(), "Retrieved commits");

    let origin = match source.origin_url().await {
        Ok(origin) => origin,
        Err(e) => {
            warn!(error = %e, "Failed to get origin URL, using empty string");
            String::new()
        }
    };

    let tags = match source.tags().await {
        Ok(tags) => tags,
        Err(e) => {
            warn!(error = %e, "Failed to fetch tags, continuing without tags");
            Vec::new()
        }
    };
    info!(tags = tags.len(), "Retrieved tags");

    Ok(History {
        commits,
        tags,
        origin,
    })
}
