use std::fs;
use std::path::Path;
use std::sync::Arc;

use spdlog::sink::{RotatingFileSink, RotationPolicy, Sink, StdStream, StdStreamSink};
use spdlog::{error, info, Logger};

use crate::config::LoggingConfig;

const REPORT_FILE_NAME: &str = "metrics.log";

/// Owns the logger that periodic reports are written through: a rotating
/// file under `log_file_path`, or stdout when no path is configured.
pub struct MetricPublisher {
    logger: Arc<Logger>,
}

impl MetricPublisher {
    pub fn new(config: &LoggingConfig) -> spdlog::Result<Self> {
        let sink = build_report_sink(config)?;
        let logger = Arc::new(Logger::builder().sink(sink).build()?);
        Ok(Self { logger })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test() -> Self {
        Self {
            logger: Arc::new(Logger::builder().build().unwrap()),
        }
    }

    pub fn publish(&self, report: &str) {
        info!(logger: self.logger, "{}", report);
        self.logger.flush();
    }
}

/// A missing or unwritable log folder is not fatal: the publisher falls back
/// to stdout so reporting still starts.
fn build_report_sink(config: &LoggingConfig) -> spdlog::Result<Arc<dyn Sink>> {
    if let Some(path) = config.log_file_path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        match rotating_sink(path, config) {
            Ok(sink) => return Ok(sink),
            Err(e) => error!("Could not create metrics log in {}: {}", path.display(), e),
        }
    }

    let stdout = StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .build()?;
    Ok(Arc::new(stdout))
}

fn rotating_sink(path: &Path, config: &LoggingConfig) -> anyhow::Result<Arc<dyn Sink>> {
    fs::create_dir_all(path)?;

    let sink = RotatingFileSink::builder()
        .base_path(path.join(REPORT_FILE_NAME))
        .rotation_policy(RotationPolicy::FileSize(config.max_file_size * 1024 * 1024))
        .max_files(config.max_files)
        .rotate_on_open(false)
        .build()?;

    Ok(Arc::new(sink))
}
