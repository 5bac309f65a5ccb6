//! Logging Infrastructure
//!
//! fmt subscriber for the mock server, to stdout or a daily rolling file.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "catalog_mock=info,tower_http=info";

/// Initialize the logger with optional file output.
///
/// `RUST_LOG` wins over `filter`. A `log_dir` that is not a directory falls
/// back to stdout.
pub fn init_logger_with_file(filter: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "catalog-mock");
            let _ = subscriber.with_writer(file_appender).try_init();
            return;
        }
        eprintln!("log directory {} does not exist, logging to stdout", dir);
    }

    let _ = subscriber.try_init();
}
