use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::metric_aggregator::AggregateStore;
use crate::metric_publisher::MetricPublisher;
use crate::report_renderer::render;

/// Publishes one report per interval until stopped. Rendering and writing
/// happen outside the store lock; the loop never touches the store beyond
/// the single snapshot-and-reset call per tick.
pub struct ReportScheduler {
    stop_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ReportScheduler {
    pub fn start(store: Arc<AggregateStore>, publisher: MetricPublisher, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("metrics-report".to_string())
            .spawn(move || run(store, publisher, interval, stop_rx))
            .expect("failed to spawn metrics report thread");

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Signals the loop and blocks until it has exited. No report is written
    /// after this returns. Call at most once; later calls are no-ops.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.stop_tx.send(());
            let _ = handle.join();
        }
    }
}

impl Drop for ReportScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    store: Arc<AggregateStore>,
    publisher: MetricPublisher,
    interval: Duration,
    stop_rx: mpsc::Receiver<()>,
) {
    // Sum of nominal intervals, counted only once the store has metrics.
    // This is the denominator for the per-second averages.
    let mut total_elapsed_secs = 0.0;

    loop {
        // A stop message pending at tick time wins over the tick.
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                let snapshot = store.snapshot_and_reset_window(interval);
                if !snapshot.metrics.is_empty() {
                    total_elapsed_secs += interval.as_secs_f64();
                }
                publisher.publish(&render(&snapshot, total_elapsed_secs));
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
