//! App Memory Module
//!
//! Union of the cases over one configured memory store.

use crate::cases::{self, Remember};
use crate::config::MemoryConfig;
use crate::memory::{Image, ImageKey, KeyGenerator, MemoryStore, TimedImage};

// == App Memory ==
/// One memory store together with its remember/recall cases.
#[derive(Debug, Default)]
pub struct AppMemory {
    store: MemoryStore,
    remember: Remember,
}

impl AppMemory {
    // == Constructor ==
    /// Creates an app memory from configuration.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            store: MemoryStore::from_config(config),
            remember: Remember::new(),
        }
    }

    // == Store Access ==
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    // == Hooks ==
    /// Registers a batch transform applied before every remember.
    pub fn add_normalizer(&mut self, normalizer: impl Fn(Vec<Image>) -> Vec<Image> + 'static) {
        self.remember.add_normalizer(normalizer);
    }

    /// Registers a callback fired after every remember with the class's
    /// fresh contents.
    pub fn add_insight(&mut self, insight: impl Fn(Option<Vec<Option<Image>>>) + 'static) {
        self.remember.add_insight(insight);
    }

    /// Like `add_insight`, with relevance timestamps included.
    pub fn add_insight_with_relevance(
        &mut self,
        insight: impl Fn(Option<Vec<TimedImage>>) + 'static,
    ) {
        self.remember.add_insight_with_relevance(insight);
    }

    /// Installs a custom key generator on the underlying store.
    pub fn set_key_generator(&mut self, generator: KeyGenerator) {
        self.store.set_key_generator(generator);
    }

    // == Remember ==
    /// Saves data under the query's class; see `cases::remember`.
    pub fn remember(&mut self, data: Image, query: Option<&Image>) -> Vec<Option<ImageKey>> {
        self.remember.remember(&mut self.store, data, query)
    }

    // == Recall ==
    /// Returns the query's class contents if still relevant; see
    /// `cases::recall`.
    pub fn recall(&self, query: Option<&Image>, anyway: bool) -> Option<Vec<Option<Image>>> {
        cases::recall(&self.store, query, anyway)
    }

    pub fn recall_with_relevance(
        &self,
        query: Option<&Image>,
        anyway: bool,
    ) -> Option<Vec<TimedImage>> {
        cases::recall_with_relevance(&self.store, query, anyway)
    }

    // == Recall Irrelevant ==
    /// Returns the stale subset of the query's class.
    pub fn recall_irrelevant(
        &self,
        query: Option<&Image>,
        window_secs: Option<u64>,
    ) -> Option<Vec<Option<Image>>> {
        cases::recall_irrelevant(&self.store, query, window_secs)
    }

    pub fn recall_irrelevant_with_relevance(
        &self,
        query: Option<&Image>,
        window_secs: Option<u64>,
    ) -> Option<Vec<TimedImage>> {
        cases::recall_irrelevant_with_relevance(&self.store, query, window_secs)
    }

    /// Returns every stale image across the whole long memory.
    pub fn recall_all_irrelevant(&self, window_secs: Option<u64>) -> Vec<Option<Image>> {
        cases::recall_all_irrelevant(&self.store, window_secs)
    }

    pub fn recall_all_irrelevant_with_relevance(
        &self,
        window_secs: Option<u64>,
    ) -> Vec<TimedImage> {
        cases::recall_all_irrelevant_with_relevance(&self.store, window_secs)
    }

    // == Mark Irrelevant ==
    /// Marks the query's whole class irrelevant.
    pub fn mark_irrelevant(&mut self, query: Option<&Image>) -> Option<bool> {
        cases::mark_class(&mut self.store, query)
    }

    /// Marks one image irrelevant by its storage key.
    pub fn mark_irrelevant_key(&mut self, key: &str) -> Option<bool> {
        cases::mark_key(&mut self.store, key)
    }

    /// Marks one image irrelevant by deriving its key first.
    pub fn mark_irrelevant_image(&mut self, image: &Image) -> Option<bool> {
        cases::mark_image(&mut self.store, image)
    }
}
