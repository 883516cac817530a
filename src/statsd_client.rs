use std::net::UdpSocket;
use std::time::Duration;

use anyhow::Context;
use cadence::{Counted, Gauged, Timed, UdpMetricSink};
use spdlog::{debug, error};

use crate::config::StatsdConfig;
use crate::metric_key::build_key;
use crate::metric_types::MetricTag;

/// Forwards each observation to a statsd daemon over UDP. Nothing is
/// aggregated locally; sends are fire-and-forget.
pub struct StatsdClient {
    client: cadence::StatsdClient,
}

impl StatsdClient {
    pub fn new(config: &StatsdConfig) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").context("Could not bind statsd socket")?;
        let sink = UdpMetricSink::from((config.host.as_str(), config.port), socket)
            .context("Could not create statsd sink")?;
        let client = cadence::StatsdClient::from_sink(&config.prefix, sink);

        debug!("StatsD metrics client created [{}:{}]", config.host, config.port);
        Ok(Self { client })
    }

    pub fn increment(&self, name: &str, count: i64, tags: &[MetricTag]) {
        self.count(name, count, tags);
    }

    pub fn decrement(&self, name: &str, count: i64, tags: &[MetricTag]) {
        self.count(name, -count, tags);
    }

    pub fn count(&self, name: &str, value: i64, tags: &[MetricTag]) {
        if let Err(e) = self.client.count(&build_key(name, tags), value) {
            error!("Error sending count metric {}: {}", name, e);
        }
    }

    pub fn gauge(&self, name: &str, value: f64, tags: &[MetricTag]) {
        if let Err(e) = self.client.gauge(&build_key(name, tags), value) {
            error!("Error sending gauge metric {}: {}", name, e);
        }
    }

    pub fn timing(&self, name: &str, duration: Duration, tags: &[MetricTag]) {
        let millis = duration.as_millis() as u64;
        if let Err(e) = self.client.time(&build_key(name, tags), millis) {
            error!("Error sending timing metric {}: {}", name, e);
        }
    }
}
