use crate::constants::LOG_DIR;
use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes logging with a rolling JSON file and, optionally, console output.
///
/// Console output goes to stderr: stdout is reserved for NDJSON data. The viewer
/// passes `console = false` so log lines never land on the alternate screen.
/// Setting `JSON_LOGS=true` switches the console layer to JSON.
pub fn init_logging(app: &str, console: bool) {
    // Ensure logs directory exists
    let _ = fs::create_dir_all(LOG_DIR);

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, format!("{app}.log"));
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    let json_console = std::env::var("JSON_LOGS")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let console_layer =
        (console && !json_console).then(|| fmt::layer().with_writer(std::io::stderr));
    let json_console_layer = (console && json_console)
        .then(|| fmt::layer().json().with_writer(std::io::stderr));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,contrib_ranking=info"));

    // A subscriber may already be installed (tests, repeated calls)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .with(json_console_layer)
        .try_init();

    // We need to keep the guard in scope to ensure logs are flushed on exit
    std::mem::forget(_guard);
}
