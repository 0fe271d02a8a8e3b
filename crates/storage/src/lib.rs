//! Storage layer for Folio
//!
//! This crate provides the multi-index record store:
//! - IndexSpec: declaration of a secondary index
//! - SecondaryIndex: buckets of primary keys per extracted key
//! - IndexedStore: primary map plus eagerly maintained secondary indices
//! - SharedStore: RwLock-guarded handle for concurrent access
//! - StoreOptions, MutationCounters, IndexStats: configuration and reporting

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod options;
pub mod shared;
pub mod spec;
pub mod stats;
pub mod store;

pub use index::SecondaryIndex;
pub use options::StoreOptions;
pub use shared::SharedStore;
pub use spec::{validate_specs, Extractor, IndexSpec, Normalizer};
pub use stats::{IndexStat, IndexStats, MutationCounters};
pub use store::IndexedStore;
