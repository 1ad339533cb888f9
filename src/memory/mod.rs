//! Memory Module
//!
//! Two-tier image store with class indexing and relevance tracking.

pub mod clock;
mod codec;
mod order;
mod store;


// Re-export public types
pub use codec::{hash_key, identity_of, KeyCodec};
pub use store::MemoryStore;

// == Vocabulary Types ==
/// An opaque stored value.
pub type Image = serde_json::Value;

/// Derived string identity for an image.
pub type ImageKey = String;

/// Name of a logical group of images.
pub type ClassKey = String;

/// Timestamp in milliseconds since the Unix epoch.
pub type Millis = i64;

/// An image lookup paired with the relevance timestamp recorded for its key.
pub type TimedImage = (Option<Image>, Option<Millis>);

/// Replacement for the built-in key derivation; receives the image and the
/// configured maximum key length.
pub type KeyGenerator = Box<dyn Fn(&Image, usize) -> Option<ImageKey>>;

// == Public Constants ==
/// Default maximum derived key length in characters
pub const DEFAULT_MAX_KEY_LENGTH: usize = 32;

/// Default relevance window in seconds
pub const DEFAULT_RELEVANCE_WINDOW: u64 = 60;

/// Class used when an operation names none
pub const DEFAULT_CLASS_KEY: &str = "last";

/// Filler character for hash-shrunk keys
pub const KEY_FILLER: char = 'x';

/// Identity field candidates, tried in priority order
pub const IDENTITY_FIELDS: [&str; 3] = ["id", "ID", "Id"];
