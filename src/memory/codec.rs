//! Key Codec Module
//!
//! Derives bounded-length, deterministic string keys for images.

use std::fmt;

use serde_json::Value;

use crate::memory::{Image, ImageKey, KeyGenerator, IDENTITY_FIELDS, KEY_FILLER};

// == Key Codec ==
/// Derives storage keys for images.
///
/// An image exposing an identity field is keyed by that field's string form;
/// any other image by its canonical JSON serialization (field order follows
/// the serializer, not the caller). Keys longer than the configured maximum
/// are replaced by a hash-based short form. An installed custom generator
/// replaces the whole derivation.
pub struct KeyCodec {
    /// Maximum derived key length in characters
    max_key_length: usize,
    /// Replacement key derivation, if installed
    generator: Option<KeyGenerator>,
}

impl KeyCodec {
    // == Constructor ==
    /// Creates a codec with the given maximum key length.
    pub fn new(max_key_length: usize) -> Self {
        Self {
            max_key_length,
            generator: None,
        }
    }

    // == Max Key Length ==
    pub fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    pub fn set_max_key_length(&mut self, len: usize) {
        self.max_key_length = len;
    }

    // == Set Generator ==
    /// Installs a custom key generator used in place of the default
    /// derivation.
    pub fn set_generator(&mut self, generator: KeyGenerator) {
        self.generator = Some(generator);
    }

    // == Derive Key ==
    /// Derives the storage key for an image.
    ///
    /// Returns None for a non-storable image (JSON null).
    pub fn derive_key(&self, image: &Image) -> Option<ImageKey> {
        if let Some(generator) = &self.generator {
            return generator(image, self.max_key_length);
        }

        self.default_key(image)
    }

    fn default_key(&self, image: &Image) -> Option<ImageKey> {
        let raw = match image {
            Value::Null => return None,
            Value::Object(_) | Value::Array(_) => {
                identity_of(image).unwrap_or_else(|| image.to_string())
            }
            Value::String(text) => text.clone(),
            scalar => scalar.to_string(),
        };

        if raw.chars().count() > self.max_key_length {
            return Some(self.shrink(&raw));
        }

        Some(raw)
    }

    // == Shrink ==
    /// Hash-based short form for an oversized key.
    ///
    /// Filler is prepended while `filler.len() + digest.len()` stays within
    /// the maximum, so the result always exceeds the maximum by at least one
    /// character; a digest that alone exceeds the maximum is returned bare.
    fn shrink(&self, raw: &str) -> ImageKey {
        let digest = hash_key(raw).to_string();

        let mut key = String::new();
        while key.len() + digest.len() <= self.max_key_length {
            key.push(KEY_FILLER);
        }
        key.push_str(&digest);

        key
    }
}

impl fmt::Debug for KeyCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyCodec")
            .field("max_key_length", &self.max_key_length)
            .field("custom_generator", &self.generator.is_some())
            .finish()
    }
}

// == Identity Lookup ==
/// Returns the string form of the image's identity field, if it exposes one.
///
/// Candidate field names are tried in a fixed priority order; a field set to
/// JSON null does not count as an identity.
pub fn identity_of(image: &Image) -> Option<String> {
    let fields = image.as_object()?;

    for name in IDENTITY_FIELDS {
        match fields.get(name) {
            None | Some(Value::Null) => continue,
            Some(Value::String(text)) => return Some(text.clone()),
            Some(other) => return Some(other.to_string()),
        }
    }

    None
}

// == Hashing ==
/// 32-bit signed polynomial hash of a string.
///
/// Multiplier 31 applied per UTF-16 code unit, accumulated with wrapping
/// 32-bit signed arithmetic. Pure and stable across runs.
pub fn hash_key(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}
