use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::metric_types::MetricKind;

/// Running summary for one metric key.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricAggregate {
    pub kind: MetricKind,
    pub total: f64,
    pub count: u64,
    pub window_total: f64,
    pub window_count: u64,
    pub min: f64,
    pub max: f64,
}

impl MetricAggregate {
    fn new(kind: MetricKind, value: f64) -> Self {
        Self {
            kind,
            total: 0.0,
            count: 0,
            window_total: 0.0,
            window_count: 0,
            min: value,
            max: value,
        }
    }

    fn observe(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
        self.window_total += value;
        self.window_count += 1;

        if self.kind.tracks_extrema() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }
}

/// Point-in-time copy of every aggregate, detached from the live store.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub metrics: HashMap<String, MetricAggregate>,
    pub window: Duration,
}

#[derive(Default)]
pub struct AggregateStore {
    metrics: Mutex<HashMap<String, MetricAggregate>>,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self {
            metrics: Mutex::new(HashMap::new()),
        }
    }

    /// Records one observation. A key's kind is fixed by its first
    /// observation; later calls that claim a different kind are aggregated
    /// under the original one.
    pub fn update(&self, key: String, kind: MetricKind, value: f64) {
        let mut metrics = self.metrics.lock().unwrap();
        metrics
            .entry(key)
            .or_insert_with(|| MetricAggregate::new(kind, value))
            .observe(value);
    }

    /// Copies every aggregate and zeroes the window counters in a single
    /// critical section, so a concurrent update lands in exactly one window.
    pub fn snapshot_and_reset_window(&self, window: Duration) -> Snapshot {
        let mut metrics = self.metrics.lock().unwrap();
        let copy = metrics.clone();
        for aggregate in metrics.values_mut() {
            aggregate.window_total = 0.0;
            aggregate.window_count = 0;
        }

        Snapshot {
            metrics: copy,
            window,
        }
    }

    pub fn len(&self) -> usize {
        self.metrics.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_count_totals_across_windows() {
        let store = AggregateStore::new();
        store.update("requests".to_string(), MetricKind::Count, 5.0);
        store.update("requests".to_string(), MetricKind::Count, 3.0);

        let snapshot = store.snapshot_and_reset_window(WINDOW);
        let m = &snapshot.metrics["requests"];
        assert_eq!(m.kind, MetricKind::Count);
        assert_eq!(m.total, 8.0);
        assert_eq!(m.count, 2);
        assert_eq!(m.window_total, 8.0);
        assert_eq!(m.window_count, 2);

        store.update("requests".to_string(), MetricKind::Count, 2.0);
        let snapshot = store.snapshot_and_reset_window(WINDOW);
        let m = &snapshot.metrics["requests"];
        assert_eq!(m.total, 10.0);
        assert_eq!(m.count, 3);
        assert_eq!(m.window_total, 2.0);
        assert_eq!(m.window_count, 1);
    }

    #[test]
    fn test_gauge_extrema() {
        let store = AggregateStore::new();
        for value in [3.0, 1.0, 7.0, 4.0] {
            store.update("depth".to_string(), MetricKind::Gauge, value);
        }

        let snapshot = store.snapshot_and_reset_window(WINDOW);
        let m = &snapshot.metrics["depth"];
        assert_eq!(m.min, 1.0);
        assert_eq!(m.max, 7.0);
        assert_eq!(m.count, 4);
        assert_eq!(m.total, 15.0);
    }

    #[test]
    fn test_count_does_not_track_extrema() {
        let store = AggregateStore::new();
        store.update("hits".to_string(), MetricKind::Count, 5.0);
        store.update("hits".to_string(), MetricKind::Count, 2.0);
        store.update("hits".to_string(), MetricKind::Count, 9.0);

        let snapshot = store.snapshot_and_reset_window(WINDOW);
        let m = &snapshot.metrics["hits"];
        assert_eq!(m.min, 5.0);
        assert_eq!(m.max, 5.0);
    }

    #[test]
    fn test_snapshot_and_reset_is_idempotent() {
        let store = AggregateStore::new();
        store.update("lat".to_string(), MetricKind::Timing, 10.0);
        store.update("lat".to_string(), MetricKind::Timing, 30.0);

        let first = store.snapshot_and_reset_window(WINDOW);
        let second = store.snapshot_and_reset_window(WINDOW);

        let m1 = &first.metrics["lat"];
        let m2 = &second.metrics["lat"];
        assert_eq!(m1.window_total, 40.0);
        assert_eq!(m1.window_count, 2);
        assert_eq!(m2.window_total, 0.0);
        assert_eq!(m2.window_count, 0);
        assert_eq!(m2.total, m1.total);
        assert_eq!(m2.count, m1.count);
        assert_eq!(m2.min, m1.min);
        assert_eq!(m2.max, m1.max);
    }

    #[test]
    fn test_kind_is_fixed_at_creation() {
        let store = AggregateStore::new();
        store.update("size".to_string(), MetricKind::Gauge, 5.0);
        store.update("size".to_string(), MetricKind::Count, 50.0);

        let snapshot = store.snapshot_and_reset_window(WINDOW);
        let m = &snapshot.metrics["size"];
        assert_eq!(m.kind, MetricKind::Gauge);
        assert_eq!(m.total, 55.0);
        assert_eq!(m.count, 2);
        // extrema keep following the original kind
        assert_eq!(m.min, 5.0);
        assert_eq!(m.max, 50.0);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = Arc::new(AggregateStore::new());

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || store.update("hits".to_string(), MetricKind::Count, 1.0))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot_and_reset_window(WINDOW);
        let m = &snapshot.metrics["hits"];
        assert_eq!(m.total, 100.0);
        assert_eq!(m.count, 100);
    }

    #[test]
    fn test_len() {
        let store = AggregateStore::new();
        assert!(store.is_empty());
        store.update("a".to_string(), MetricKind::Count, 1.0);
        store.update("a".to_string(), MetricKind::Count, 1.0);
        store.update("b".to_string(), MetricKind::Gauge, 1.0);
        assert_eq!(store.len(), 2);
    }
}
