//! Multi-index record store
//!
//! `IndexedStore` owns one primary map (primary key -> record) and one
//! `SecondaryIndex` per declared `IndexSpec`. Every mutation updates all of
//! them before returning, so lookups never see stale buckets.
//!
//! # Atomicity
//!
//! Each mutating operation performs all of its checks (presence, duplicate
//! key, primary key preservation) before touching any structure. Once the
//! checks pass, the remaining steps cannot fail. A rejected call therefore
//! leaves the primary map and every bucket exactly as they were.
//!
//! Mutations take `&mut self`; for shared access across threads wrap the
//! store in a [`SharedStore`](crate::SharedStore).
//!
//! # Example
//!
//! ```ignore
//! let mut store = IndexedStore::new(vec![IndexSpec::field("author", "author")])?;
//! store.insert(book)?;
//! let by_author = store.lookup_by_secondary("author", "X")?;
//! ```

use folio_core::{IndexKey, Record, StoreError, StoreResult};
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::RangeInclusive;
use tracing::{debug, error, warn};

use crate::index::SecondaryIndex;
use crate::options::StoreOptions;
use crate::spec::{validate_specs, IndexSpec};
use crate::stats::{IndexStat, IndexStats, MutationCounters};

/// In-memory store with a unique primary index and N secondary indices
pub struct IndexedStore<R: Record> {
    /// Primary key -> record
    primary: FxHashMap<R::Key, R>,
    /// Secondary indices in declaration order
    secondary: Vec<SecondaryIndex<R>>,
    /// Index name -> position in `secondary`
    positions: FxHashMap<String, usize>,
    options: StoreOptions,
    counters: MutationCounters,
}

impl<R: Record> IndexedStore<R> {
    /// Create an empty store with the given secondary indices
    ///
    /// Fails with `InvalidIndexSpec` if any spec is rejected.
    pub fn new(specs: Vec<IndexSpec<R>>) -> StoreResult<Self> {
        Self::with_options(specs, StoreOptions::default())
    }

    /// Create an empty store with explicit options
    pub fn with_options(specs: Vec<IndexSpec<R>>, options: StoreOptions) -> StoreResult<Self> {
        validate_specs(&specs)?;

        let positions = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| (spec.name().to_string(), i))
            .collect();
        let secondary = specs.into_iter().map(SecondaryIndex::new).collect();
        let primary =
            FxHashMap::with_capacity_and_hasher(options.capacity, Default::default());

        Ok(Self {
            primary,
            secondary,
            positions,
            options,
            counters: MutationCounters::default(),
        })
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Insert a new record
    ///
    /// Fails with `DuplicateKey` if a record with the same primary key is
    /// already stored. On success the record is appended to its bucket in
    /// every secondary index.
    pub fn insert(&mut self, record: R) -> StoreResult<()> {
        let key = record.primary_key().clone();
        if self.primary.contains_key(&key) {
            self.counters.record_insert(false);
            warn!(key = ?key, "insert rejected: duplicate primary key");
            return Err(StoreError::duplicate_key(&key));
        }

        for index in &mut self.secondary {
            if let Some(k) = index.key_for(&record) {
                index.file(k, key.clone());
            }
        }
        debug!(key = ?key, "inserted record");
        self.primary.insert(key, record);

        self.counters.record_insert(true);
        self.verify("insert");
        Ok(())
    }

    /// Remove a record by primary key
    ///
    /// Fails with `NotFound` if the key is absent. Buckets emptied by the
    /// removal are dropped.
    pub fn remove(&mut self, key: &R::Key) -> StoreResult<R> {
        let Some(record) = self.primary.remove(key) else {
            self.counters.record_remove(false);
            warn!(key = ?key, "remove rejected: key not found");
            return Err(StoreError::not_found(key));
        };

        for index in &mut self.secondary {
            if let Some(k) = index.key_for(&record) {
                index.unfile(&k, key);
            }
        }
        debug!(key = ?key, "removed record");

        self.counters.record_remove(true);
        self.verify("remove");
        Ok(record)
    }

    /// Modify a stored record in place
    ///
    /// `mutator` runs against a copy of the stored record. If it changes the
    /// primary key the call fails with `ImmutableKey` and nothing is
    /// modified. Otherwise the record moves out of every bucket whose key
    /// changed and into its new buckets, then replaces the stored value.
    /// Buckets whose key is unchanged keep the record at its position.
    ///
    /// Returns the previous value.
    pub fn update<F>(&mut self, key: &R::Key, mutator: F) -> StoreResult<R>
    where
        F: FnOnce(&mut R),
    {
        let Some(slot) = self.primary.get_mut(key) else {
            self.counters.record_update(false);
            warn!(key = ?key, "update rejected: key not found");
            return Err(StoreError::not_found(key));
        };

        let mut next = slot.clone();
        mutator(&mut next);

        if next.primary_key() != key {
            self.counters.record_update(false);
            warn!(
                key = ?key,
                attempted = ?next.primary_key(),
                "update rejected: primary key is immutable"
            );
            return Err(StoreError::ImmutableKey {
                key: format!("{:?}", key),
                attempted: format!("{:?}", next.primary_key()),
            });
        }

        // Plan every bucket move before committing any of them
        let moves: Vec<(usize, Option<IndexKey>, Option<IndexKey>)> = self
            .secondary
            .iter()
            .enumerate()
            .filter_map(|(i, index)| {
                let old = index.key_for(&*slot);
                let new = index.key_for(&next);
                (old != new).then_some((i, old, new))
            })
            .collect();

        let previous = std::mem::replace(slot, next);
        for (i, old, new) in moves {
            let index = &mut self.secondary[i];
            if let Some(old) = old {
                index.unfile(&old, key);
            }
            if let Some(new) = new {
                index.file(new, key.clone());
            }
        }
        debug!(key = ?key, "updated record");

        self.counters.record_update(true);
        self.verify("update");
        Ok(previous)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Record stored under `key`, if any
    #[inline]
    pub fn lookup_by_primary(&self, key: &R::Key) -> Option<&R> {
        self.primary.get(key)
    }

    /// Records filed under `key` in index `index_name`, in insertion order
    ///
    /// An unknown key yields an empty vector. An index name that was not
    /// declared at construction is an `UnknownIndex` error.
    pub fn lookup_by_secondary(
        &self,
        index_name: &str,
        key: impl Into<IndexKey>,
    ) -> StoreResult<Vec<&R>> {
        let index = self.index(index_name)?;
        let probe = index.probe(key.into());
        Ok(self.resolve(index.bucket(&probe)))
    }

    /// Records whose key in `index_name` lies within `range`
    ///
    /// Results are ordered by index key, then by insertion order within
    /// each bucket.
    pub fn lookup_range(
        &self,
        index_name: &str,
        range: RangeInclusive<IndexKey>,
    ) -> StoreResult<Vec<&R>> {
        let index = self.index(index_name)?;
        let (low, high) = range.into_inner();
        let range = index.probe(low)..=index.probe(high);

        Ok(index
            .keys_in_range(&range)
            .into_iter()
            .flat_map(|k| self.resolve(index.bucket(k)))
            .collect())
    }

    /// Whether a record with `key` is stored
    #[inline]
    pub fn contains(&self, key: &R::Key) -> bool {
        self.primary.contains_key(key)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Iterate over all records in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.primary.values()
    }

    /// Iterate over all primary keys in arbitrary order
    pub fn primary_keys(&self) -> impl Iterator<Item = &R::Key> {
        self.primary.keys()
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Names of the secondary indices, in declaration order
    pub fn index_names(&self) -> impl Iterator<Item = &str> {
        self.secondary.iter().map(SecondaryIndex::name)
    }

    /// Number of buckets in `index_name`
    pub fn bucket_count(&self, index_name: &str) -> StoreResult<usize> {
        Ok(self.index(index_name)?.bucket_count())
    }

    /// Whether `index_name` currently holds a bucket for `key`
    pub fn contains_bucket(&self, index_name: &str, key: impl Into<IndexKey>) -> StoreResult<bool> {
        let index = self.index(index_name)?;
        Ok(index.contains_bucket(&index.probe(key.into())))
    }

    /// Current size and index shape
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.primary.len(),
            indexes: self
                .secondary
                .iter()
                .map(|index| IndexStat {
                    name: index.name().to_string(),
                    distinct_keys: index.bucket_count(),
                    entries: index.entry_count(),
                })
                .collect(),
        }
    }

    /// Mutation outcome counts since construction
    pub fn counters(&self) -> MutationCounters {
        self.counters
    }

    /// Options the store was built with
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Verify the primary/secondary invariants
    ///
    /// Checks that:
    /// - every record is stored under its own primary key
    /// - no bucket is empty
    /// - every bucket member is a stored record whose extracted key is the
    ///   bucket key, and appears once in that bucket
    /// - every stored record with an extracted key is filed under it
    ///
    /// Linear in the number of records times the number of indices.
    pub fn check_invariants(&self) -> StoreResult<()> {
        for (key, record) in &self.primary {
            if record.primary_key() != key {
                return Err(StoreError::inconsistent(format!(
                    "record stored under {:?} reports key {:?}",
                    key,
                    record.primary_key()
                )));
            }
        }

        for index in &self.secondary {
            let mut filed = 0usize;
            for (bucket_key, members) in index.buckets() {
                if members.is_empty() {
                    return Err(StoreError::inconsistent(format!(
                        "index '{}' holds empty bucket {}",
                        index.name(),
                        bucket_key
                    )));
                }
                let mut seen = FxHashSet::default();
                for pk in members {
                    if !seen.insert(pk) {
                        return Err(StoreError::inconsistent(format!(
                            "index '{}' bucket {} lists {:?} twice",
                            index.name(),
                            bucket_key,
                            pk
                        )));
                    }
                    let Some(record) = self.primary.get(pk) else {
                        return Err(StoreError::inconsistent(format!(
                            "index '{}' bucket {} references missing record {:?}",
                            index.name(),
                            bucket_key,
                            pk
                        )));
                    };
                    if index.key_for(record).as_ref() != Some(bucket_key) {
                        return Err(StoreError::inconsistent(format!(
                            "index '{}' files {:?} under stale key {}",
                            index.name(),
                            pk,
                            bucket_key
                        )));
                    }
                }
                filed += members.len();
            }

            let expected = self
                .primary
                .values()
                .filter(|r| index.key_for(r).is_some())
                .count();
            if filed != expected {
                return Err(StoreError::inconsistent(format!(
                    "index '{}' files {} records, expected {}",
                    index.name(),
                    filed,
                    expected
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn index(&self, name: &str) -> StoreResult<&SecondaryIndex<R>> {
        self.positions
            .get(name)
            .map(|&i| &self.secondary[i])
            .ok_or_else(|| StoreError::UnknownIndex {
                name: name.to_string(),
            })
    }

    fn resolve(&self, members: &[R::Key]) -> Vec<&R> {
        members.iter().filter_map(|pk| self.primary.get(pk)).collect()
    }

    fn verify(&self, op: &'static str) {
        if !self.options.verify_invariants {
            return;
        }
        if let Err(e) = self.check_invariants() {
            error!(op, error = %e, "index invariant violated");
            if cfg!(debug_assertions) {
                panic!("index invariant violated after {}: {}", op, e);
            }
        }
    }
}

impl<R: Record> std::fmt::Debug for IndexedStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedStore")
            .field("records", &self.primary.len())
            .field("indexes", &self.secondary)
            .field("counters", &self.counters)
            .finish()
    }
}
