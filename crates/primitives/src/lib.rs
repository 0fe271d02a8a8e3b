//! Primitives layer for Folio
//!
//! This crate implements the library catalog on top of the indexed store:
//! - Book: the catalog record, keyed by ISBN
//! - Library: catalog facade with author, year and genre indices
//! - SearchType: query dispatch for `Library::search`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod book;
pub mod library;

pub use book::Book;
pub use library::{Library, ParseSearchTypeError, SearchType};
