//! Public types for the Folio API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Store types
// ============================================================================

// Record abstraction and index keys
pub use folio_core::{IndexKey, Record};

// Errors
pub use folio_core::{StoreError, StoreResult};

// Store, index declarations and options
pub use folio_storage::{IndexSpec, IndexedStore, SharedStore, StoreOptions};

// Reporting
pub use folio_storage::{IndexStat, IndexStats, MutationCounters};

// ============================================================================
// Catalog types
// ============================================================================

pub use folio_primitives::{Book, Library, SearchType};

// ============================================================================
// Simulation types
// ============================================================================

pub use folio_sim::{Event, SimError, SimulationConfig, SimulationReport};
