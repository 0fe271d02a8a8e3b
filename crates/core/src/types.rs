//! Record and index key types
//!
//! `Record` is the only abstraction a type needs to implement to live in an
//! `IndexedStore`. `IndexKey` is the common currency of every secondary
//! index: extractors produce it, buckets are keyed by it, lookups probe
//! with it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

// =============================================================================
// IndexKey
// =============================================================================

/// Value extracted from a record for secondary indexing
///
/// Ordered so that range lookups over an index have a well-defined order.
/// Keys of different variants never compare equal; across variants the
/// declaration order applies (Bool < Int < Str).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexKey {
    /// Boolean key
    Bool(bool),
    /// Integer key
    Int(i64),
    /// String key
    Str(String),
}

impl IndexKey {
    /// Borrow the string payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            IndexKey::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload, if any
    pub fn as_int(&self) -> Option<i64> {
        match self {
            IndexKey::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Lowercase string keys; other variants pass through
    ///
    /// Used as the normalizer of case-insensitive indices.
    pub fn to_lowercase(&self) -> IndexKey {
        match self {
            IndexKey::Str(s) => IndexKey::Str(s.to_lowercase()),
            other => other.clone(),
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Bool(b) => write!(f, "{}", b),
            IndexKey::Int(i) => write!(f, "{}", i),
            IndexKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for IndexKey {
    fn from(s: &str) -> Self {
        IndexKey::Str(s.to_string())
    }
}

impl From<String> for IndexKey {
    fn from(s: String) -> Self {
        IndexKey::Str(s)
    }
}

impl From<&String> for IndexKey {
    fn from(s: &String) -> Self {
        IndexKey::Str(s.clone())
    }
}

impl From<i64> for IndexKey {
    fn from(i: i64) -> Self {
        IndexKey::Int(i)
    }
}

impl From<i32> for IndexKey {
    fn from(i: i32) -> Self {
        IndexKey::Int(i as i64)
    }
}

impl From<u32> for IndexKey {
    fn from(i: u32) -> Self {
        IndexKey::Int(i as i64)
    }
}

impl From<bool> for IndexKey {
    fn from(b: bool) -> Self {
        IndexKey::Bool(b)
    }
}

// =============================================================================
// Record
// =============================================================================

/// A value stored in an `IndexedStore`
///
/// A record has exactly one primary key, which must not change once the
/// record has been inserted. Two records are the same record iff their
/// primary keys are equal; the store never compares any other field for
/// identity.
///
/// `FIELDS` and `field()` expose named fields for field-based index specs.
/// Records that are only indexed through closures can leave both at their
/// defaults.
pub trait Record: Clone {
    /// Primary key type
    type Key: Eq + Hash + Clone + fmt::Debug;

    /// Names of the fields `field()` can extract
    const FIELDS: &'static [&'static str] = &[];

    /// The record's primary key
    fn primary_key(&self) -> &Self::Key;

    /// Extract a named field as an index key
    ///
    /// Returns None for names not listed in `FIELDS`.
    fn field(&self, _name: &str) -> Option<IndexKey> {
        None
    }
}
