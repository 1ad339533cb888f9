//! Recall Case
//!
//! Returns data saved earlier, gated by class relevance.

use crate::memory::{Image, MemoryStore, TimedImage};
use crate::query::class_key_for;

// == Recall ==
/// Returns the query's class contents if the class is still relevant.
///
/// `anyway` bypasses the relevance gate and returns whatever the class
/// currently indexes. A class that was never indexed, or whose relevance
/// has lapsed, yields None.
pub fn recall(
    store: &MemoryStore,
    query: Option<&Image>,
    anyway: bool,
) -> Option<Vec<Option<Image>>> {
    let class = class_key_for(query);

    if anyway || store.is_class_relevant(class.as_deref(), None, None).unwrap_or(false) {
        return store.pull_by_class(class.as_deref());
    }

    None
}

/// `recall`, with each image paired with its relevance timestamp.
pub fn recall_with_relevance(
    store: &MemoryStore,
    query: Option<&Image>,
    anyway: bool,
) -> Option<Vec<TimedImage>> {
    let class = class_key_for(query);

    if anyway || store.is_class_relevant(class.as_deref(), None, None).unwrap_or(false) {
        return store.pull_by_class_with_relevance(class.as_deref());
    }

    None
}
