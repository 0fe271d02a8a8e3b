//! Secondary index buckets
//!
//! A `SecondaryIndex` maps each extracted key to the primary keys of the
//! records filed under it, in insertion order. It stores primary keys only;
//! the records themselves live in the store's primary map.
//!
//! Buckets are never left empty: `unfile` drops a bucket as soon as its
//! last member leaves.

use folio_core::{IndexKey, Record};
use rustc_hash::FxHashMap;
use std::ops::RangeInclusive;

use crate::spec::IndexSpec;

/// One secondary index: its declaration plus its buckets
pub struct SecondaryIndex<R: Record> {
    spec: IndexSpec<R>,
    buckets: FxHashMap<IndexKey, Vec<R::Key>>,
}

impl<R: Record> SecondaryIndex<R> {
    /// Create an empty index for `spec`
    pub fn new(spec: IndexSpec<R>) -> Self {
        Self {
            spec,
            buckets: FxHashMap::default(),
        }
    }

    /// Index name
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// The declaration this index was built from
    pub fn spec(&self) -> &IndexSpec<R> {
        &self.spec
    }

    /// Key `record` belongs under in this index
    #[inline]
    pub fn key_for(&self, record: &R) -> Option<IndexKey> {
        self.spec.extract(record)
    }

    /// Normalize a lookup probe the way extracted keys are normalized
    #[inline]
    pub fn probe(&self, key: IndexKey) -> IndexKey {
        self.spec.normalize(key)
    }

    /// Append `pk` to the bucket for `key`, creating the bucket if needed
    pub fn file(&mut self, key: IndexKey, pk: R::Key) {
        self.buckets.entry(key).or_default().push(pk);
    }

    /// Remove `pk` from the bucket for `key`
    ///
    /// Drops the bucket when it becomes empty. Returns false if `pk` was not
    /// filed under `key`.
    pub fn unfile(&mut self, key: &IndexKey, pk: &R::Key) -> bool {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|k| k == pk) else {
            return false;
        };
        // Vec::remove keeps the remaining members in insertion order
        bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        true
    }

    /// Members of the bucket for `key`, in insertion order
    pub fn bucket(&self, key: &IndexKey) -> &[R::Key] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a bucket exists for `key`
    pub fn contains_bucket(&self, key: &IndexKey) -> bool {
        self.buckets.contains_key(key)
    }

    /// Number of distinct keys (= number of buckets)
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total members across all buckets
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Bucket keys within `range`, sorted ascending
    pub fn keys_in_range(&self, range: &RangeInclusive<IndexKey>) -> Vec<&IndexKey> {
        let mut keys: Vec<&IndexKey> = self
            .buckets
            .keys()
            .filter(|k| range.contains(*k))
            .collect();
        keys.sort();
        keys
    }

    /// Iterate over (key, members) pairs in arbitrary order
    pub fn buckets(&self) -> impl Iterator<Item = (&IndexKey, &[R::Key])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl<R: Record> std::fmt::Debug for SecondaryIndex<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecondaryIndex")
            .field("name", &self.name())
            .field("bucket_count", &self.bucket_count())
            .field("entry_count", &self.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        id: u32,
        group: String,
    }

    impl Record for Row {
        type Key = u32;

        fn primary_key(&self) -> &u32 {
            &self.id
        }
    }

    fn index() -> SecondaryIndex<Row> {
        SecondaryIndex::new(IndexSpec::new("group", |r: &Row| IndexKey::from(&r.group)))
    }

    #[test]
    fn test_empty_index() {
        let idx = index();
        assert_eq!(idx.bucket_count(), 0);
        assert_eq!(idx.entry_count(), 0);
        assert!(idx.bucket(&IndexKey::from("x")).is_empty());
        assert!(!idx.contains_bucket(&IndexKey::from("x")));
    }

    #[test]
    fn test_file_preserves_insertion_order() {
        let mut idx = index();
        idx.file(IndexKey::from("g"), 3);
        idx.file(IndexKey::from("g"), 1);
        idx.file(IndexKey::from("g"), 2);
        assert_eq!(idx.bucket(&IndexKey::from("g")), &[3, 1, 2]);
        assert_eq!(idx.bucket_count(), 1);
        assert_eq!(idx.entry_count(), 3);
    }

    #[test]
    fn test_unfile_keeps_order_of_remaining() {
        let mut idx = index();
        for id in [1, 2, 3] {
            idx.file(IndexKey::from("g"), id);
        }
        assert!(idx.unfile(&IndexKey::from("g"), &2));
        assert_eq!(idx.bucket(&IndexKey::from("g")), &[1, 3]);
    }

    #[test]
    fn test_unfile_last_member_drops_bucket() {
        let mut idx = index();
        idx.file(IndexKey::from("g"), 1);
        assert!(idx.unfile(&IndexKey::from("g"), &1));
        assert!(!idx.contains_bucket(&IndexKey::from("g")));
        assert_eq!(idx.bucket_count(), 0);
    }

    #[test]
    fn test_unfile_missing_is_noop() {
        let mut idx = index();
        idx.file(IndexKey::from("g"), 1);
        assert!(!idx.unfile(&IndexKey::from("g"), &9));
        assert!(!idx.unfile(&IndexKey::from("h"), &1));
        assert_eq!(idx.entry_count(), 1);
    }

    #[test]
    fn test_keys_in_range_sorted() {
        let mut idx = index();
        for (id, year) in [(1, 2005), (2, 1999), (3, 2010), (4, 2001)] {
            idx.file(IndexKey::Int(year), id);
        }
        let range = IndexKey::Int(2000)..=IndexKey::Int(2010);
        let keys: Vec<i64> = idx
            .keys_in_range(&range)
            .into_iter()
            .filter_map(IndexKey::as_int)
            .collect();
        assert_eq!(keys, vec![2001, 2005, 2010]);
    }

    #[test]
    fn test_key_for_uses_spec() {
        let idx = index();
        let row = Row {
            id: 1,
            group: "admins".to_string(),
        };
        assert_eq!(idx.key_for(&row), Some(IndexKey::from("admins")));
        assert_eq!(idx.name(), "group");
    }
}
