pub mod config;
mod metric_types;
mod metric_key;
mod metric_aggregator;
mod metric_publisher;
mod report_renderer;
mod report_scheduler;
mod logging_client;
mod statsd_client;
mod metrics_client;

pub use config::{read_config, LoggingConfig, MetricsConfig, StatsdConfig};
pub use logging_client::LoggingClient;
pub use metric_types::{MetricKind, MetricTag, TagValue};
pub use metrics_client::MetricsClient;
pub use statsd_client::StatsdClient;
