//! Defaults shared by the ranking tool and the viewer.

use std::time::Duration;

pub const DEFAULT_TOP_N: usize = 100;

/// Calendar-day key used in the NDJSON `date` field.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

// Viewer playback
pub const DEFAULT_SPEED: Duration = Duration::from_millis(500);
pub const SPEED_STEP: Duration = Duration::from_millis(100);
pub const DEFAULT_HIGHLIGHT: &str = "[CT]h";

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "daily-ranking.toml";

pub const LOG_DIR: &str = "logs";
