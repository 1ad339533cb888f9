//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;

use crate::memory::{DEFAULT_MAX_KEY_LENGTH, DEFAULT_RELEVANCE_WINDOW};

/// Memory store configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. Values are taken as given — validation is the caller's
/// responsibility.
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Maximum derived key length in characters
    pub max_key_length: usize,
    /// Relevance window in seconds
    pub relevance_window: u64,
}

impl MemoryConfig {
    /// Creates a new MemoryConfig by loading values from environment
    /// variables.
    ///
    /// # Environment Variables
    /// - `MAX_KEY_LENGTH` - Maximum derived key length (default: 32)
    /// - `RELEVANCE_WINDOW` - Relevance window in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            max_key_length: env::var("MAX_KEY_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_KEY_LENGTH),
            relevance_window: env::var("RELEVANCE_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RELEVANCE_WINDOW),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            relevance_window: DEFAULT_RELEVANCE_WINDOW,
        }
    }
}
