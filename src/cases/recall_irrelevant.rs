//! Recall Irrelevant Case
//!
//! Returns saved data that has gone stale — naturally expired or explicitly
//! marked irrelevant.

use crate::memory::{Image, MemoryStore, TimedImage};
use crate::query::class_key_for;

// == Recall Irrelevant ==
/// Returns the stale subset of the query's class, or None if the class was
/// never indexed.
///
/// # Arguments
/// * `window_secs` - Relevance window override (store default if None)
pub fn recall_irrelevant(
    store: &MemoryStore,
    query: Option<&Image>,
    window_secs: Option<u64>,
) -> Option<Vec<Option<Image>>> {
    let class = class_key_for(query);

    store.pull_irrelevant(class.as_deref(), false, None, window_secs)
}

/// `recall_irrelevant`, with relevance timestamps included.
pub fn recall_irrelevant_with_relevance(
    store: &MemoryStore,
    query: Option<&Image>,
    window_secs: Option<u64>,
) -> Option<Vec<TimedImage>> {
    let class = class_key_for(query);

    store.pull_irrelevant_with_relevance(class.as_deref(), false, None, window_secs)
}

// == Recall All Irrelevant ==
/// Returns every stale image across the whole long memory.
pub fn recall_all_irrelevant(store: &MemoryStore, window_secs: Option<u64>) -> Vec<Option<Image>> {
    store
        .pull_irrelevant(None, true, None, window_secs)
        .unwrap_or_default()
}

/// `recall_all_irrelevant`, with relevance timestamps included.
pub fn recall_all_irrelevant_with_relevance(
    store: &MemoryStore,
    window_secs: Option<u64>,
) -> Vec<TimedImage> {
    store
        .pull_irrelevant_with_relevance(None, true, None, window_secs)
        .unwrap_or_default()
}
