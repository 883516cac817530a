use std::collections::BTreeMap;
use std::fmt::Write;

use crate::metric_aggregator::Snapshot;
use crate::metric_types::MetricKind;

/// Formats a snapshot into the periodic report: one uppercased section per
/// metric kind, kinds and keys in lexicographic order.
/// `total_elapsed_secs` is the denominator for the per-second averages and
/// must be positive for non-empty snapshots.
pub fn render(snapshot: &Snapshot, total_elapsed_secs: f64) -> String {
    if snapshot.metrics.is_empty() {
        return "[METRICS] NONE".to_string();
    }

    let mut by_kind: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (key, aggregate) in &snapshot.metrics {
        by_kind.entry(aggregate.kind.as_str()).or_default().push(key.as_str());
    }

    let mut output = String::from("[METRICS]\n");
    for (kind, mut keys) in by_kind {
        let _ = writeln!(output, "[{}]", kind.to_uppercase());
        keys.sort_unstable();

        for key in keys {
            let m = &snapshot.metrics[key];
            match m.kind {
                MetricKind::Count => {
                    let _ = writeln!(
                        output,
                        "\t[{}] TOTAL[{:.0}] AVG_PER_SECOND[{:.4}] WINDOW[{:.0}] WINDOW_PER_SECOND[{:.4}]",
                        key,
                        m.total,
                        m.total / total_elapsed_secs,
                        m.window_total,
                        m.window_total / total_elapsed_secs,
                    );
                }
                MetricKind::Gauge | MetricKind::Timing => {
                    let avg = m.total / m.count as f64;
                    let window_avg = if m.window_count > 0 {
                        m.window_total / m.window_count as f64
                    } else {
                        0.0
                    };
                    let _ = writeln!(
                        output,
                        "\t[{}] AVG[{:.2}] MIN[{:.2}] MAX[{:.2}] COUNT[{}] WINDOW_AVG[{:.2}] WINDOW_COUNT[{}]",
                        key, avg, m.min, m.max, m.count, window_avg, m.window_count,
                    );
                }
            }
        }
    }

    output
}
