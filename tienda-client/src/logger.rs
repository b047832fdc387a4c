//! Logging Infrastructure
//!
//! Console logging for development, optional daily rotating files for
//! installed front-ends. `RUST_LOG` overrides the level when set.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize console logging at `info`
pub fn init_logger() {
    if let Err(e) = init_logger_with_file("info", None) {
        eprintln!("failed to initialize logger: {}", e);
    }
}

/// Initialize the logger with optional file output
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `log_dir` - Optional directory for daily rotating `tienda.*` files
pub fn init_logger_with_file(level: &str, log_dir: Option<&Path>) -> std::io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "tienda");
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(appender),
            )
        }
        None => None,
    };

    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}
