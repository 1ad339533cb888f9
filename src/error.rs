//! Error types for the memo cache
//!
//! The store itself signals not-found and non-storable conditions through
//! Option/bool returns; the error enum covers registry misuse only.

use thiserror::Error;

// == Memory Error Enum ==
/// Hard errors of the crate — all of them registry-level.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Data family initialized twice in one pool
    #[error("Memory family already initialized: {0}")]
    FamilyExists(String),

    /// Data family never initialized in this pool
    #[error("Unknown memory family: {0}")]
    UnknownFamily(String),
}

// == Result Type Alias ==
/// Convenience Result type for the memo cache.
pub type Result<T> = std::result::Result<T, MemoryError>;
