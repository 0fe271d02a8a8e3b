//! Core types for Folio
//!
//! This crate defines the foundational types shared by every other crate:
//! - IndexKey: value extracted from a record for secondary indexing
//! - Record: trait implemented by anything stored in an IndexedStore
//! - StoreError / StoreResult: error taxonomy for store operations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use types::{IndexKey, Record};
