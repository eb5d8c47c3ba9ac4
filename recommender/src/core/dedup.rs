//! Repeat filtering against the batch itself and the previous batch

use std::collections::HashSet;

use shared::{ProcessId, RecommendationRecord, RecordKey, process_debug, process_warn};

/// Drop records whose (restaurant, menu) key already appeared earlier in
/// `current` or anywhere in `previous`. Survivors keep their order.
///
/// If nothing survives, `current` is returned untouched: the caller always
/// gets something to show, at the cost of possibly repeating last batch.
pub fn dedupe(
    current: Vec<RecommendationRecord>,
    previous: &[RecommendationRecord],
) -> Vec<RecommendationRecord> {
    let avoid: HashSet<RecordKey> = previous.iter().map(RecommendationRecord::key).collect();
    let mut seen: HashSet<RecordKey> = HashSet::with_capacity(current.len());

    let keep: Vec<bool> = current
        .iter()
        .map(|record| {
            let key = record.key();
            !avoid.contains(&key) && seen.insert(key)
        })
        .collect();

    let kept = keep.iter().filter(|k| **k).count();

    if kept == 0 {
        if !current.is_empty() {
            process_warn!(
                ProcessId::current(),
                candidates = current.len(),
                "Every candidate repeats the previous batch or itself; returning the unfiltered batch"
            );
        }
        return current;
    }

    if kept < current.len() {
        process_debug!(
            ProcessId::current(),
            dropped = current.len() - kept,
            kept = kept,
            "Removed repeated recommendations"
        );
    }

    current
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}
