//! Logging Infrastructure
//!
//! Structured logging setup for both development and production
//! environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger, optionally writing daily rolling files into
/// `log_dir`. Log level comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logger(log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided and exists
    if let Some(dir) = log_dir {
        if Path::new(dir).exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "quote-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
