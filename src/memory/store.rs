//! Memory Store Module
//!
//! The two-tier image store: a long memory of every image ever saved, a
//! per-class short memory holding the latest batch for each class, and
//! relevance records for both tiers.

use std::collections::HashMap;

use tracing::debug;

use crate::config::MemoryConfig;
use crate::memory::order::InsertionOrder;
use crate::memory::{
    clock, ClassKey, Image, ImageKey, KeyCodec, KeyGenerator, Millis, TimedImage,
    DEFAULT_CLASS_KEY, DEFAULT_MAX_KEY_LENGTH, DEFAULT_RELEVANCE_WINDOW,
};

// == Memory Store ==
/// Two-tier image store with class indexing and relevance tracking.
///
/// All operations are synchronous and complete before returning; a caller
/// embedding the store in a concurrent host must serialize mutations, which
/// touch several tables per call.
#[derive(Debug)]
pub struct MemoryStore {
    /// Relevance window in seconds applied when a check supplies none
    relevance_window: u64,
    /// Class used when an operation names none
    default_class_key: ClassKey,
    /// Key derivation
    codec: KeyCodec,
    /// Long memory: every saved image, by derived key
    long: HashMap<ImageKey, Image>,
    /// First-insertion order of long-memory keys
    order: InsertionOrder,
    /// Per-image relevance timestamps; 0 once marked irrelevant
    relevance: HashMap<ImageKey, Millis>,
    /// Short memory: the latest key batch per class
    short: HashMap<ClassKey, Vec<ImageKey>>,
    /// Per-class relevance: the oldest member's timestamp; 0 once marked
    short_relevance: HashMap<ClassKey, Millis>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a store with the given key-length bound and relevance window.
    ///
    /// # Arguments
    /// * `max_key_length` - Maximum derived key length in characters
    /// * `relevance_window` - Default relevance window in seconds
    pub fn new(max_key_length: usize, relevance_window: u64) -> Self {
        Self {
            relevance_window,
            default_class_key: DEFAULT_CLASS_KEY.to_string(),
            codec: KeyCodec::new(max_key_length),
            long: HashMap::new(),
            order: InsertionOrder::new(),
            relevance: HashMap::new(),
            short: HashMap::new(),
            short_relevance: HashMap::new(),
        }
    }

    /// Creates a store from configuration.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.max_key_length, config.relevance_window)
    }

    // == Settings ==
    /// Sets the default relevance window in seconds.
    pub fn set_relevance_window(&mut self, window_secs: u64) {
        self.relevance_window = window_secs;
    }

    /// Sets the maximum derived key length.
    pub fn set_max_key_length(&mut self, len: usize) {
        self.codec.set_max_key_length(len);
    }

    /// Installs a custom key generator replacing the default derivation.
    pub fn set_key_generator(&mut self, generator: KeyGenerator) {
        self.codec.set_generator(generator);
    }

    // == Save ==
    /// Saves one image, indexing it under the class.
    ///
    /// Overwrites the long-memory entry for the derived key, records the
    /// timestamp, lowers the class relevance toward its oldest member, and
    /// appends the key to the class index. A non-storable image (no
    /// derivable key) leaves the store untouched and returns None.
    ///
    /// # Arguments
    /// * `image` - The image to save
    /// * `class_key` - Class to index under (default class if None)
    /// * `now` - Save timestamp in milliseconds (wall clock if None)
    pub fn save(
        &mut self,
        image: Image,
        class_key: Option<&str>,
        now: Option<Millis>,
    ) -> Option<ImageKey> {
        let key = self.codec.derive_key(&image)?;
        let stamp = now.unwrap_or_else(clock::now_ms);
        let class = self.class_or_default(class_key);

        self.long.insert(key.clone(), image);
        self.order.record(&key);
        self.record_relevance(&class, &key, stamp);
        self.index_in_class(&class, &key);

        debug!(key = %key, class = %class, stamp, "image saved");

        Some(key)
    }

    // == Save Batch ==
    /// Replaces a class's view with a new batch of images.
    ///
    /// The class's existing index entry is evicted first, so images absent
    /// from the new batch drop out of the class view while staying in long
    /// memory. Returned keys align element-wise with the input batch, in
    /// input order; a non-storable member yields None in its slot.
    pub fn save_batch(
        &mut self,
        images: Vec<Image>,
        class_key: Option<&str>,
        now: Option<Millis>,
    ) -> Vec<Option<ImageKey>> {
        self.evict(class_key, false, false, false);

        images
            .into_iter()
            .map(|image| self.save(image, class_key, now))
            .collect()
    }

    // == Pull ==
    /// Returns a copy of the image stored under a key.
    pub fn pull(&self, key: &str) -> Option<Image> {
        self.long.get(key).cloned()
    }

    /// Returns the image together with its recorded relevance timestamp.
    ///
    /// The two sides are looked up independently: after a relevance-scope
    /// eviction an image can exist without a relevance record.
    pub fn pull_with_relevance(&self, key: &str) -> TimedImage {
        (self.pull(key), self.relevance_of(key))
    }

    // == Pull Many ==
    /// Element-wise pull over a key sequence.
    pub fn pull_many(&self, keys: &[ImageKey]) -> Vec<Option<Image>> {
        keys.iter().map(|key| self.pull(key)).collect()
    }

    pub fn pull_many_with_relevance(&self, keys: &[ImageKey]) -> Vec<TimedImage> {
        keys.iter().map(|key| self.pull_with_relevance(key)).collect()
    }

    // == Pull By Class ==
    /// Pulls the class's current batch, or None if the class has no index.
    pub fn pull_by_class(&self, class_key: Option<&str>) -> Option<Vec<Option<Image>>> {
        let keys = self.short.get(&self.class_or_default(class_key))?;
        Some(self.pull_many(keys))
    }

    pub fn pull_by_class_with_relevance(
        &self,
        class_key: Option<&str>,
    ) -> Option<Vec<TimedImage>> {
        let keys = self.short.get(&self.class_or_default(class_key))?;
        Some(self.pull_many_with_relevance(keys))
    }

    // == Pull All ==
    /// Every image in long memory, in first-insertion order.
    pub fn pull_all(&self) -> Vec<Image> {
        self.order.iter().filter_map(|key| self.pull(key)).collect()
    }

    pub fn pull_all_with_relevance(&self) -> Vec<(Image, Option<Millis>)> {
        self.order
            .iter()
            .filter_map(|key| self.pull(key).map(|image| (image, self.relevance_of(key))))
            .collect()
    }

    // == Pull Irrelevant ==
    /// Collects images whose keys are no longer relevant.
    ///
    /// Scans the class's index, or the whole long memory when `scan_long` is
    /// set. Returns None when scanning a class that has no index. Keys that
    /// never had a relevance record count as relevant and are skipped.
    pub fn pull_irrelevant(
        &self,
        class_key: Option<&str>,
        scan_long: bool,
        now: Option<Millis>,
        window_secs: Option<u64>,
    ) -> Option<Vec<Option<Image>>> {
        let stale = self.stale_keys(class_key, scan_long, now, window_secs)?;
        Some(stale.iter().map(|key| self.pull(key)).collect())
    }

    pub fn pull_irrelevant_with_relevance(
        &self,
        class_key: Option<&str>,
        scan_long: bool,
        now: Option<Millis>,
        window_secs: Option<u64>,
    ) -> Option<Vec<TimedImage>> {
        let stale = self.stale_keys(class_key, scan_long, now, window_secs)?;
        Some(stale.iter().map(|key| self.pull_with_relevance(key)).collect())
    }

    // == Is Relevant ==
    /// Checks the per-image relevance record against the window.
    ///
    /// A key with no record is relevant.
    pub fn is_relevant(&self, key: &str, now: Option<Millis>, window_secs: Option<u64>) -> bool {
        clock::is_relevant(
            self.relevance.get(key).copied(),
            now.unwrap_or_else(clock::now_ms),
            window_secs.unwrap_or(self.relevance_window),
        )
    }

    // == Is Class Relevant ==
    /// Checks a class's short-relevance record — its oldest member's
    /// freshness.
    ///
    /// Returns None when the class has no short-relevance record.
    pub fn is_class_relevant(
        &self,
        class_key: Option<&str>,
        now: Option<Millis>,
        window_secs: Option<u64>,
    ) -> Option<bool> {
        let stamp = self
            .short_relevance
            .get(&self.class_or_default(class_key))
            .copied()?;

        Some(clock::is_relevant(
            Some(stamp),
            now.unwrap_or_else(clock::now_ms),
            window_secs.unwrap_or(self.relevance_window),
        ))
    }

    // == Mark Irrelevant ==
    /// Zeroes the relevance record for a key.
    ///
    /// Returns None when the key has no record. The image itself stays in
    /// long memory and in any class index.
    pub fn mark_irrelevant(&mut self, key: &str) -> Option<bool> {
        let stamp = self.relevance.get_mut(key)?;
        *stamp = 0;

        Some(true)
    }

    // == Mark Class Irrelevant ==
    /// Marks every key in the class's index irrelevant, then zeroes the
    /// class's own short-relevance record.
    ///
    /// Returns None when the class has no index. Also returns None when the
    /// index exists but the short-relevance record does not — the member
    /// records have been zeroed by that point, so None does not imply a
    /// no-op.
    pub fn mark_class_irrelevant(&mut self, class_key: Option<&str>) -> Option<bool> {
        let class = self.class_or_default(class_key);
        let keys = self.short.get(&class)?.clone();

        for key in &keys {
            let _ = self.mark_irrelevant(key);
        }

        let stamp = self.short_relevance.get_mut(&class)?;
        *stamp = 0;

        Some(true)
    }

    // == Evict ==
    /// Clears store state in selectable scopes.
    ///
    /// The flags are independent and can fire together:
    /// - all false: remove only the named class's index and short-relevance
    ///   entries (default class if unnamed);
    /// - `clear_short` or `clear_long`: clear the whole class index and
    ///   short-relevance table, across all classes;
    /// - `clear_long`: additionally empty long memory;
    /// - `clear_relevance` or `clear_long`: clear every per-image relevance
    ///   record and the short-relevance table.
    pub fn evict(
        &mut self,
        class_key: Option<&str>,
        clear_short: bool,
        clear_long: bool,
        clear_relevance: bool,
    ) {
        if !clear_short && !clear_long && !clear_relevance {
            let class = self.class_or_default(class_key);
            self.short.remove(&class);
            self.short_relevance.remove(&class);
            debug!(class = %class, "class evicted");
        }

        if clear_short || clear_long {
            self.short.clear();
            self.short_relevance.clear();
        }

        if clear_long {
            self.long.clear();
            self.order.clear();
        }

        if clear_relevance || clear_long {
            self.relevance.clear();
            self.short_relevance.clear();
        }
    }

    // == Class Keys ==
    /// The raw key sequence currently indexed for a class.
    pub fn class_keys(&self, class_key: Option<&str>) -> Option<&[ImageKey]> {
        self.short
            .get(&self.class_or_default(class_key))
            .map(Vec::as_slice)
    }

    // == Relevance Of ==
    /// The relevance timestamp recorded for a key, if any.
    pub fn relevance_of(&self, key: &str) -> Option<Millis> {
        self.relevance.get(key).copied()
    }

    // == Derive Key ==
    /// Derives the storage key an image would be saved under.
    pub fn derive_key(&self, image: &Image) -> Option<ImageKey> {
        self.codec.derive_key(image)
    }

    // == Length ==
    /// Number of images in long memory.
    pub fn len(&self) -> usize {
        self.long.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.long.is_empty()
    }

    // == Internals ==
    fn class_or_default(&self, class_key: Option<&str>) -> ClassKey {
        class_key.unwrap_or(&self.default_class_key).to_string()
    }

    fn record_relevance(&mut self, class: &str, key: &str, stamp: Millis) {
        self.relevance.insert(key.to_string(), stamp);
        self.short_relevance
            .entry(class.to_string())
            .and_modify(|oldest| *oldest = (*oldest).min(stamp))
            .or_insert(stamp);
    }

    fn index_in_class(&mut self, class: &str, key: &str) {
        self.short
            .entry(class.to_string())
            .or_default()
            .push(key.to_string());
    }

    fn stale_keys(
        &self,
        class_key: Option<&str>,
        scan_long: bool,
        now: Option<Millis>,
        window_secs: Option<u64>,
    ) -> Option<Vec<ImageKey>> {
        let stamp = now.unwrap_or_else(clock::now_ms);
        let keys: Vec<ImageKey> = if scan_long {
            self.order.iter().cloned().collect()
        } else {
            self.short.get(&self.class_or_default(class_key))?.clone()
        };

        Some(
            keys.into_iter()
                .filter(|key| !self.is_relevant(key, Some(stamp), window_secs))
                .collect(),
        )
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEY_LENGTH, DEFAULT_RELEVANCE_WINDOW)
    }
}
