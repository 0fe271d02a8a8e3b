//! Mutation counters and index statistics
//!
//! Counters are the hook for reporting layers: they record how many
//! mutations succeeded or were rejected, without the store knowing who
//! consumes them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Success and failure counts per mutation kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationCounters {
    /// Successful inserts
    pub inserts: u64,
    /// Inserts rejected as duplicates
    pub insert_failures: u64,
    /// Successful removes
    pub removes: u64,
    /// Removes of absent keys
    pub remove_failures: u64,
    /// Successful updates
    pub updates: u64,
    /// Updates rejected (absent key or primary key change)
    pub update_failures: u64,
}

impl MutationCounters {
    pub(crate) fn record_insert(&mut self, ok: bool) {
        if ok {
            self.inserts += 1;
        } else {
            self.insert_failures += 1;
        }
    }

    pub(crate) fn record_remove(&mut self, ok: bool) {
        if ok {
            self.removes += 1;
        } else {
            self.remove_failures += 1;
        }
    }

    pub(crate) fn record_update(&mut self, ok: bool) {
        if ok {
            self.updates += 1;
        } else {
            self.update_failures += 1;
        }
    }

    /// Total successful mutations
    pub fn successes(&self) -> u64 {
        self.inserts + self.removes + self.updates
    }

    /// Total rejected mutations
    pub fn failures(&self) -> u64 {
        self.insert_failures + self.remove_failures + self.update_failures
    }
}

/// Shape of one secondary index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStat {
    /// Index name
    pub name: String,
    /// Number of buckets
    pub distinct_keys: usize,
    /// Records filed across all buckets
    pub entries: usize,
}

/// Snapshot of store size and index shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Records in the primary index
    pub records: usize,
    /// One entry per secondary index, in declaration order
    pub indexes: Vec<IndexStat>,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Records: {}", self.records)?;
        for index in &self.indexes {
            write!(
                f,
                " | {}: {} keys / {} entries",
                index.name, index.distinct_keys, index.entries
            )?;
        }
        Ok(())
    }
}
