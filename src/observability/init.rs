//! Tracing subscriber setup.

use super::file_writer::FileWriter;
use crate::infrastructure::paths;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LEVEL: &str = "info";

/// Initializes the global subscriber writing to the rotating log file.
///
/// # Parameters
///
/// * `config` - Resolved configuration; only `trace_level` is read
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently returns if there is no data directory or it cannot be created
/// - Idempotent: only the first successful call installs a subscriber
///
/// # Example
///
/// ```rust,no_run
/// use lyst::observability::init_tracing;
/// use lyst::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let Some(log_file) = paths::log_path() else {
        return;
    };
    if let Some(dir) = log_file.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }

    let env_level = std::env::var("RUST_LOG").ok();
    let level = resolve_level(env_level.as_deref(), config.trace_level.as_deref());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(FileWriter::new(log_file));

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

/// Picks the filter directive: environment first, then config, then default.
///
/// Blank values count as unset.
#[must_use]
pub fn resolve_level(env: Option<&str>, configured: Option<&str>) -> String {
    [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}
