//! Folio: in-memory multi-index record store
//!
//! An `IndexedStore` keeps one unique primary index and any number of
//! named secondary indices consistent on every insert, remove and update.
//! `Library` builds a book catalog on top of it, and the simulator drives
//! that catalog through seeded random events.
//!
//! # Example
//!
//! ```ignore
//! use folio::{Book, Library};
//!
//! let mut library = Library::new("Main Library")?;
//! library.add_book(Book::new("Emma", "Jane Austen", 1815, "Romance", "0141439580"))?;
//! assert_eq!(library.search_by_author("Jane Austen")?.len(), 1);
//! ```

pub mod types;

pub use types::*;

pub use folio_sim::{generate_random_book, run_simulation, run_with_rng};
