use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a git repository (no .git directory found): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("{command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },

    #[error("Failed to parse JSON line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid highlight pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("No daily stats found in input")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, RankingError>;
