use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::error::Result;
use crate::utils::constants::LOG_TIMESTAMP_FORMAT;

/// Renders entry timestamps as local `YYYY-MM-DD HH:MM:SS`
struct LogTimer;

impl FormatTime for LogTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format(LOG_TIMESTAMP_FORMAT))
    }
}

/// Initialize logging: error entries are appended to `log_path` and mirrored
/// to the console. `verbose` raises the console level to DEBUG; the file
/// stays error-only.
pub fn init(log_path: &Path, verbose: bool) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let file_layer = fmt::layer()
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(LogTimer)
        .with_filter(LevelFilter::ERROR);

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::ERROR
    };
    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_timer(LogTimer)
        .with_filter(console_level);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}
