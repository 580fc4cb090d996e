//! File logging.
//!
//! The terminal belongs to the scene, so log output goes to `haneul.log` in
//! the platform data directory instead of stderr. `RUST_LOG` overrides the
//! configured level.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use haneul_config::LogConfig;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

const LOG_FILE: &str = "haneul.log";
const DEFAULT_FILTER: &str = "info";

/// Filter from `RUST_LOG`, else the configured level, else `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(level))
}

fn config_filter(level: &str) -> EnvFilter {
    if level.trim().is_empty() {
        return EnvFilter::new(DEFAULT_FILTER);
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `log_dir/haneul.log`.
///
/// Returns the log file path, or `None` when logging is disabled or the file
/// cannot be opened.
pub fn init_logging(
    log_dir: Option<&Path>,
    config: &LogConfig,
) -> Result<Option<PathBuf>, TryInitError> {
    if !config.enabled {
        return Ok(None);
    }
    let Some(log_dir) = log_dir else {
        return Ok(None);
    };
    let path = log_dir.join(LOG_FILE);

    if std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = OpenOptions::new().create(true).append(true).open(&path)
    {
        let file_layer = fmt::layer()
            .with_writer(Mutex::new(log_file))
            .with_ansi(false) // No ANSI color codes in file output
            .with_target(true)
            .with_thread_names(true)
            .with_timer(fmt::time::uptime());

        tracing_subscriber::registry()
            .with(env_filter(&config.level))
            .with(file_layer)
            .try_init()?;
        return Ok(Some(path));
    }

    Ok(None)
}
