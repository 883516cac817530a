use std::sync::Arc;
use std::time::Duration;

use crate::config::LoggingConfig;
use crate::metric_aggregator::AggregateStore;
use crate::metric_key::build_key;
use crate::metric_publisher::MetricPublisher;
use crate::metric_types::{MetricKind, MetricTag};
use crate::report_scheduler::ReportScheduler;

/// Aggregates observations in memory and logs a summary report on a fixed
/// interval. Reporting starts as soon as the client is built.
pub struct LoggingClient {
    store: Arc<AggregateStore>,
    scheduler: ReportScheduler,
}

impl LoggingClient {
    pub fn new(config: &LoggingConfig) -> spdlog::Result<Self> {
        let publisher = MetricPublisher::new(config)?;
        Ok(Self::with_publisher(config, publisher))
    }

    fn with_publisher(config: &LoggingConfig, publisher: MetricPublisher) -> Self {
        let store = Arc::new(AggregateStore::new());
        let interval = Duration::from_secs(config.timeout.max(1));
        let scheduler = ReportScheduler::start(store.clone(), publisher, interval);

        Self { store, scheduler }
    }

    pub fn increment(&self, name: &str, count: i64, tags: &[MetricTag]) {
        self.count(name, count, tags);
    }

    pub fn decrement(&self, name: &str, count: i64, tags: &[MetricTag]) {
        self.count(name, -count, tags);
    }

    pub fn count(&self, name: &str, value: i64, tags: &[MetricTag]) {
        self.store
            .update(build_key(name, tags), MetricKind::Count, value as f64);
    }

    pub fn gauge(&self, name: &str, value: f64, tags: &[MetricTag]) {
        self.store.update(build_key(name, tags), MetricKind::Gauge, value);
    }

    /// Timings are aggregated in milliseconds.
    pub fn timing(&self, name: &str, duration: Duration, tags: &[MetricTag]) {
        self.store.update(
            build_key(name, tags),
            MetricKind::Timing,
            duration.as_millis() as f64,
        );
    }

    /// Stops the report loop and blocks until it has exited. Call at most
    /// once; observations recorded after this are never reported.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }
}
