//! Memory Pool Module
//!
//! Caller-owned registry of app memories by data family name.

use std::collections::HashMap;

use tracing::info;

use crate::app::AppMemory;
use crate::config::MemoryConfig;
use crate::error::{MemoryError, Result};

// == Memory Pool ==
/// Maps data family names to configured app memories.
///
/// Owned by the caller and passed where needed; there is no ambient global
/// pool.
#[derive(Debug, Default)]
pub struct MemoryPool {
    memories: HashMap<String, AppMemory>,
}

impl MemoryPool {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Init ==
    /// Creates the app memory for a data family.
    ///
    /// A family can be initialized once per pool; re-initialization is
    /// rejected.
    pub fn init(&mut self, family: &str, config: &MemoryConfig) -> Result<&mut AppMemory> {
        if self.memories.contains_key(family) {
            return Err(MemoryError::FamilyExists(family.to_string()));
        }

        info!(family = %family, "memory family initialized");

        Ok(self
            .memories
            .entry(family.to_string())
            .or_insert_with(|| AppMemory::new(config)))
    }

    // == Get ==
    /// The app memory for a family, if initialized.
    pub fn get(&self, family: &str) -> Option<&AppMemory> {
        self.memories.get(family)
    }

    pub fn get_mut(&mut self, family: &str) -> Option<&mut AppMemory> {
        self.memories.get_mut(family)
    }

    // == Require ==
    /// Like `get_mut`, erroring when the family was never initialized.
    pub fn require(&mut self, family: &str) -> Result<&mut AppMemory> {
        self.memories
            .get_mut(family)
            .ok_or_else(|| MemoryError::UnknownFamily(family.to_string()))
    }

    // == Has ==
    /// Checks whether a family has been initialized.
    pub fn has(&self, family: &str) -> bool {
        self.memories.contains_key(family)
    }
}
