//! Store construction options.

use serde::{Deserialize, Serialize};

/// Options for building an `IndexedStore`.
///
/// Use the builder pattern to configure options:
///
/// ```ignore
/// use folio_storage::StoreOptions;
///
/// let opts = StoreOptions::new().capacity(10_000).verify_invariants(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Expected number of records, used to pre-size the primary map.
    #[serde(default)]
    pub capacity: usize,
    /// Run `check_invariants` after every successful mutation.
    ///
    /// Meant for tests and debugging; each check is linear in store size.
    #[serde(default)]
    pub verify_invariants: bool,
}

impl StoreOptions {
    /// Create a new `StoreOptions` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity hint for the primary map.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enable or disable post-mutation invariant checks.
    pub fn verify_invariants(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }
}
