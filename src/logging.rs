use std::path::Path;

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Route `tracing` output to the configured log file.
///
/// Raw mode owns stdout while the UI runs, so nothing is written to the
/// terminal. `RUST_LOG` wins over the configured level when set. Writes go
/// through a background worker; keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(&config.log_file)?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Directory and file name of the log file. A bare name lives in the
/// working directory.
fn split_log_path(log_file: &str) -> Result<(&Path, &Path)> {
    let path = Path::new(log_file);
    let file_name = path
        .file_name()
        .map(Path::new)
        .ok_or_else(|| anyhow!("log file path has no file name: {log_file:?}"))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}
