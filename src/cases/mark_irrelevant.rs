//! Mark Irrelevant Case
//!
//! Explicitly marks saved data as stale, by class, raw key, or image.

use crate::memory::{Image, MemoryStore};
use crate::query::class_key_for;

// == Mark Class ==
/// Marks the query's whole class irrelevant.
///
/// Returns None when the class was never indexed (or lacks a
/// short-relevance record — member records may still have been zeroed).
pub fn mark_class(store: &mut MemoryStore, query: Option<&Image>) -> Option<bool> {
    let class = class_key_for(query);

    store.mark_class_irrelevant(class.as_deref())
}

// == Mark Key ==
/// Marks one image irrelevant by its storage key.
pub fn mark_key(store: &mut MemoryStore, key: &str) -> Option<bool> {
    store.mark_irrelevant(key)
}

// == Mark Image ==
/// Marks one image irrelevant by deriving its key first.
///
/// Returns None when the image is non-storable or was never recorded.
pub fn mark_image(store: &mut MemoryStore, image: &Image) -> Option<bool> {
    let key = store.derive_key(image)?;

    store.mark_irrelevant(&key)
}
