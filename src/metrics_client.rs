use std::time::Duration;

use anyhow::Result;
use spdlog::debug;

use crate::config::MetricsConfig;
use crate::logging_client::LoggingClient;
use crate::metric_types::MetricTag;
use crate::statsd_client::StatsdClient;

/// The closed set of metrics backends, selected from configuration. `Dummy`
/// discards observations, `Statsd` forwards them, `Logging` aggregates them
/// into periodic reports.
pub enum MetricsClient {
    Dummy,
    Statsd(StatsdClient),
    Logging(LoggingClient),
}

impl MetricsClient {
    pub fn from_config(config: &MetricsConfig) -> Result<Self> {
        match config {
            MetricsConfig::Dummy => {
                debug!("Creating dummy metrics client");
                Ok(MetricsClient::Dummy)
            }
            MetricsConfig::Statsd(data) => {
                debug!("Creating statsd metrics client");
                Ok(MetricsClient::Statsd(StatsdClient::new(data)?))
            }
            MetricsConfig::Logging(data) => {
                debug!("Creating logging metrics client");
                Ok(MetricsClient::Logging(LoggingClient::new(data)?))
            }
        }
    }

    pub fn increment(&self, name: &str, count: i64, tags: &[MetricTag]) {
        match self {
            MetricsClient::Dummy => {}
            MetricsClient::Statsd(client) => client.increment(name, count, tags),
            MetricsClient::Logging(client) => client.increment(name, count, tags),
        }
    }

    pub fn decrement(&self, name: &str, count: i64, tags: &[MetricTag]) {
        match self {
            MetricsClient::Dummy => {}
            MetricsClient::Statsd(client) => client.decrement(name, count, tags),
            MetricsClient::Logging(client) => client.decrement(name, count, tags),
        }
    }

    pub fn count(&self, name: &str, value: i64, tags: &[MetricTag]) {
        match self {
            MetricsClient::Dummy => {}
            MetricsClient::Statsd(client) => client.count(name, value, tags),
            MetricsClient::Logging(client) => client.count(name, value, tags),
        }
    }

    pub fn gauge(&self, name: &str, value: f64, tags: &[MetricTag]) {
        match self {
            MetricsClient::Dummy => {}
            MetricsClient::Statsd(client) => client.gauge(name, value, tags),
            MetricsClient::Logging(client) => client.gauge(name, value, tags),
        }
    }

    pub fn timing(&self, name: &str, duration: Duration, tags: &[MetricTag]) {
        match self {
            MetricsClient::Dummy => {}
            MetricsClient::Statsd(client) => client.timing(name, duration, tags),
            MetricsClient::Logging(client) => client.timing(name, duration, tags),
        }
    }

    /// Stops background reporting where the backend has any. Call at most
    /// once, when the client is no longer used.
    pub fn stop(&mut self) {
        match self {
            MetricsClient::Logging(client) => client.stop(),
            MetricsClient::Dummy | MetricsClient::Statsd(_) => {}
        }
    }
}
