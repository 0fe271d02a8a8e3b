//! Thread-safe handle over an IndexedStore
//!
//! # Design
//!
//! - One `parking_lot::RwLock` guards the whole store
//! - Mutations hold the write lock for the full mutation, so no reader can
//!   see the primary map updated while a bucket is not
//! - Readers share the read lock and get owned clones back
//!
//! `SharedStore` is Clone; clones share the same underlying store.

use folio_core::{IndexKey, Record, StoreResult};
use parking_lot::RwLock;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::options::StoreOptions;
use crate::spec::IndexSpec;
use crate::stats::{IndexStats, MutationCounters};
use crate::store::IndexedStore;

/// Shared, lock-guarded IndexedStore
pub struct SharedStore<R: Record> {
    inner: Arc<RwLock<IndexedStore<R>>>,
}

impl<R: Record> SharedStore<R> {
    /// Create an empty shared store with the given secondary indices
    pub fn new(specs: Vec<IndexSpec<R>>) -> StoreResult<Self> {
        Ok(Self::from_store(IndexedStore::new(specs)?))
    }

    /// Create an empty shared store with explicit options
    pub fn with_options(specs: Vec<IndexSpec<R>>, options: StoreOptions) -> StoreResult<Self> {
        Ok(Self::from_store(IndexedStore::with_options(specs, options)?))
    }

    /// Wrap an existing store
    pub fn from_store(store: IndexedStore<R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// See [`IndexedStore::insert`]
    pub fn insert(&self, record: R) -> StoreResult<()> {
        self.inner.write().insert(record)
    }

    /// See [`IndexedStore::remove`]
    pub fn remove(&self, key: &R::Key) -> StoreResult<R> {
        self.inner.write().remove(key)
    }

    /// See [`IndexedStore::update`]
    pub fn update<F>(&self, key: &R::Key, mutator: F) -> StoreResult<R>
    where
        F: FnOnce(&mut R),
    {
        self.inner.write().update(key, mutator)
    }

    /// Clone of the record stored under `key`
    pub fn lookup_by_primary(&self, key: &R::Key) -> Option<R> {
        self.inner.read().lookup_by_primary(key).cloned()
    }

    /// Clones of the records in one bucket, in insertion order
    pub fn lookup_by_secondary(
        &self,
        index_name: &str,
        key: impl Into<IndexKey>,
    ) -> StoreResult<Vec<R>> {
        let store = self.inner.read();
        let hits = store.lookup_by_secondary(index_name, key)?;
        Ok(hits.into_iter().cloned().collect())
    }

    /// Clones of the records whose key lies in `range`
    pub fn lookup_range(
        &self,
        index_name: &str,
        range: RangeInclusive<IndexKey>,
    ) -> StoreResult<Vec<R>> {
        let store = self.inner.read();
        let hits = store.lookup_range(index_name, range)?;
        Ok(hits.into_iter().cloned().collect())
    }

    /// Run `f` against a consistent view of the store
    ///
    /// The read lock is held for the duration of `f`; keep it short.
    pub fn read<T>(&self, f: impl FnOnce(&IndexedStore<R>) -> T) -> T {
        f(&*self.inner.read())
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// See [`IndexedStore::stats`]
    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    /// See [`IndexedStore::counters`]
    pub fn counters(&self) -> MutationCounters {
        self.inner.read().counters()
    }

    /// See [`IndexedStore::check_invariants`]
    pub fn check_invariants(&self) -> StoreResult<()> {
        self.inner.read().check_invariants()
    }
}

impl<R: Record> Clone for SharedStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Record> std::fmt::Debug for SharedStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedStore").field(&*self.inner.read()).finish()
    }
}
