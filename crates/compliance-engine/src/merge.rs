//! Merge/dedup resolver
//!
//! Model flags go in first and win; pattern flags are appended only when no
//! flag with the same lowercased matched text has been seen. Near-duplicates
//! ("guarantee" vs "guaranteed") are not merged.

use std::collections::HashSet;

use shared_types::Flag;

/// Combine model and pattern flags into one deduplicated list.
pub fn merge_flags(model_flags: Vec<Flag>, pattern_flags: Vec<Flag>) -> Vec<Flag> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(model_flags.len() + pattern_flags.len());

    for flag in model_flags.into_iter().chain(pattern_flags) {
        if seen.insert(flag.dedup_key()) {
            merged.push(flag);
        }
    }

    merged
}
