use std::fmt::Write;

use crate::metric_types::MetricTag;

/// Folds `name` and its tags into the aggregation key. Tags are sorted
/// before folding so the same tag set always produces the same key,
/// regardless of the order the call site supplied them in.
pub fn build_key(name: &str, tags: &[MetricTag]) -> String {
    if tags.is_empty() {
        return name.to_string();
    }

    let mut sorted: Vec<&MetricTag> = tags.iter().collect();
    sorted.sort();

    let mut key = name.to_string();
    for tag in sorted {
        let _ = write!(key, "_{}_{}", tag.name, tag.value);
    }
    key
}
