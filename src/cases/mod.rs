//! Cases Module
//!
//! Caller-facing use cases over the memory store: remembering data,
//! recalling it, recalling stale data, and marking it irrelevant.

pub mod mark_irrelevant;
pub mod recall;
pub mod recall_irrelevant;
pub mod remember;

// Re-export public types
pub use mark_irrelevant::{mark_class, mark_image, mark_key};
pub use recall::{recall, recall_with_relevance};
pub use recall_irrelevant::{
    recall_all_irrelevant, recall_all_irrelevant_with_relevance, recall_irrelevant,
    recall_irrelevant_with_relevance,
};
pub use remember::{Normalizer, Remember};
