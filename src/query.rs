//! Query Stringification Module
//!
//! Turns a caller's arbitrary query value into a class key.

use crate::memory::{identity_of, ClassKey, Image};

// == Class Key For ==
/// Derives the class key a query addresses.
///
/// A query carrying an identity field is addressed by that field's string
/// form; any other query by its canonical JSON serialization (so a string
/// query keeps its quotes). An absent query addresses the default class,
/// signalled by None.
pub fn class_key_for(query: Option<&Image>) -> Option<ClassKey> {
    let query = query?;

    Some(identity_of(query).unwrap_or_else(|| query.to_string()))
}
