use std::path::PathBuf;

use time::macros::format_description;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::shared_state;

/// Initialise logging to stderr and a daily log file.
///
/// With debug logging off the level is fixed at `info`, regardless of
/// `RUST_LOG`. With it on, `RUST_LOG` may override the `debug` default.
///
/// Must run before any other thread is spawned: the local UTC offset can't be
/// read safely afterwards on some platforms (we fall back to UTC).
///
/// Keep the returned guard alive until exit or buffered file lines are lost.
pub fn init(debug: bool) -> Option<WorkerGuard> {
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(
        offset,
        format_description!("[hour]:[minute]:[second].[subsecond digits:3]"),
    );

    let (file_layer, guard) = match log_dir() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(&dir, "xypad.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(timer.clone());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer);

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("[Logging] Could not install subscriber: {}", e);
    }

    guard
}

/// `<data dir>/logs`, created if missing
fn log_dir() -> Option<PathBuf> {
    let dir = shared_state::project_dirs()?.data_dir().join("logs");
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(e) => {
            eprintln!("[Logging] Could not create log dir {}: {}", dir.display(), e);
            None
        }
    }
}
