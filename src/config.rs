use crate::constants;
use crate::error::{RankingError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Optional TOML configuration. Every field has a default, so an empty file
/// (or no file at all) is valid.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ranking: RankingConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Contributors kept per day (extended for ties); 0 keeps everyone.
    pub top_n: usize,
    /// Branch to analyze; all refs when unset.
    pub branch: Option<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: constants::DEFAULT_TOP_N,
            branch: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Maximum rows shown; the terminal height may show fewer. 0 means no limit.
    pub top_n: usize,
    pub speed_ms: u64,
    /// Regex selecting names drawn in the highlight colour.
    pub highlight: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            top_n: constants::DEFAULT_TOP_N,
            speed_ms: constants::DEFAULT_SPEED.as_millis() as u64,
            highlight: constants::DEFAULT_HIGHLIGHT.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }
}

impl Config {
    /// Loads `path` when given (it must exist), otherwise the default config file
    /// in the working directory if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Path::new(constants::DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p.to_path_buf()
            }
        };

        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            RankingError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.viewer.speed_ms == 0 {
            return Err(RankingError::Config(
                "viewer.speed_ms must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}

/// Parses a playback interval such as `500ms`, `1s`, `1.5s` or `2m`.
/// A bare number is taken as milliseconds. Zero is rejected.
pub fn parse_speed(value: &str) -> Result<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let amount: f64 = number
        .parse()
        .map_err(|_| RankingError::Config(format!("invalid speed '{value}'")))?;
    let millis = match unit.trim() {
        "" | "ms" => amount,
        "s" => amount * 1_000.0,
        "m" => amount * 60_000.0,
        other => {
            return Err(RankingError::Config(format!(
                "unknown speed unit '{other}' (use ms, s or m)"
            )))
        }
    };

    let speed = Duration::try_from_secs_f64(millis / 1_000.0)
        .map_err(|_| RankingError::Config(format!("speed '{value}' is out of range")))?;
    if speed.is_zero() {
        return Err(RankingError::Config("speed must be greater than zero".to_string()));
    }
    Ok(speed)
}
