//! Store Conformance Test Suite
//!
//! End-to-end checks of the indexed store and the catalog built on it,
//! through the public `folio` API only.
//!
//! ## Test Groups
//!
//! - **scenarios**: the canonical insert/remove/update walkthroughs
//! - **invariants**: bijection, secondary consistency, no empty buckets,
//!   atomicity of rejected mutations, under random operation sequences
//! - **catalog**: Library and simulator behavior
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test store_conformance
//! ```

mod test_utils;

mod catalog;
mod invariants;
mod scenarios;
