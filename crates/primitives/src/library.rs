//! Library catalog
//!
//! Facade over an `IndexedStore<Book>` keyed by ISBN with three secondary
//! indices:
//! - `author`: exact author name
//! - `year`: publication year (also serves year-range queries)
//! - `genre`: lowercased genre, so genre search ignores case
//!
//! Title search has no index; it scans the catalog with a case-insensitive
//! substring match.
//!
//! # Example
//!
//! ```ignore
//! let mut library = Library::new("Main Library")?;
//! library.add_book(Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", "0441013597"))?;
//! let hits = library.search("sci-fi", SearchType::Genre)?;
//! ```

use folio_core::{IndexKey, StoreResult};
use folio_storage::{IndexSpec, IndexStats, IndexedStore, MutationCounters, StoreOptions};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::book::Book;

/// Author index name
pub const AUTHOR_INDEX: &str = "author";
/// Year index name
pub const YEAR_INDEX: &str = "year";
/// Genre index name
pub const GENRE_INDEX: &str = "genre";

// =============================================================================
// SearchType
// =============================================================================

/// Field a `Library::search` query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchType {
    /// Case-insensitive title substring
    Title,
    /// Exact author
    Author,
    /// Case-insensitive genre
    Genre,
    /// Publication year; the query must parse as an integer
    Year,
    /// Exact ISBN
    Isbn,
}

/// Error for unrecognized search type names
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown search type: {0}")]
pub struct ParseSearchTypeError(pub String);

impl FromStr for SearchType {
    type Err = ParseSearchTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SearchType::Title),
            "author" => Ok(SearchType::Author),
            "genre" => Ok(SearchType::Genre),
            "year" => Ok(SearchType::Year),
            "isbn" => Ok(SearchType::Isbn),
            _ => Err(ParseSearchTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchType::Title => "title",
            SearchType::Author => "author",
            SearchType::Genre => "genre",
            SearchType::Year => "year",
            SearchType::Isbn => "isbn",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Library
// =============================================================================

/// Book catalog with eagerly maintained indices
pub struct Library {
    name: String,
    books: IndexedStore<Book>,
}

impl Library {
    /// Create an empty catalog
    pub fn new(name: impl Into<String>) -> StoreResult<Self> {
        Self::with_options(name, StoreOptions::default())
    }

    /// Create an empty catalog with explicit store options
    pub fn with_options(name: impl Into<String>, options: StoreOptions) -> StoreResult<Self> {
        let books = IndexedStore::with_options(Self::index_specs(), options)?;
        let name = name.into();
        info!(library = %name, "library initialized");
        Ok(Self { name, books })
    }

    fn index_specs() -> Vec<IndexSpec<Book>> {
        vec![
            IndexSpec::field(AUTHOR_INDEX, "author"),
            IndexSpec::field(YEAR_INDEX, "year"),
            IndexSpec::field(GENRE_INDEX, "genre").normalized(IndexKey::to_lowercase),
        ]
    }

    /// Catalog name
    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a book; fails with `DuplicateKey` if its ISBN is already present
    pub fn add_book(&mut self, book: Book) -> StoreResult<()> {
        let title = book.title.clone();
        match self.books.insert(book) {
            Ok(()) => {
                info!(library = %self.name, title = %title, "added book");
                Ok(())
            }
            Err(e) => {
                warn!(library = %self.name, title = %title, "book already exists");
                Err(e)
            }
        }
    }

    /// Remove a book by ISBN; fails with `NotFound` if absent
    pub fn remove_book(&mut self, isbn: &str) -> StoreResult<Book> {
        let removed = self.books.remove(&isbn.to_string())?;
        info!(library = %self.name, book = %removed, "removed book");
        Ok(removed)
    }

    /// Modify a book in place; the ISBN must not change
    ///
    /// Returns the book as it was before the change.
    pub fn update_book<F>(&mut self, isbn: &str, mutator: F) -> StoreResult<Book>
    where
        F: FnOnce(&mut Book),
    {
        let previous = self.books.update(&isbn.to_string(), mutator)?;
        info!(library = %self.name, isbn = %isbn, "updated book");
        Ok(previous)
    }

    // ========================================================================
    // Searches
    // ========================================================================

    /// Book with the given ISBN
    pub fn search_by_isbn(&self, isbn: &str) -> Option<&Book> {
        let book = self.books.lookup_by_primary(&isbn.to_string());
        debug!(isbn = %isbn, found = book.is_some(), "isbn lookup");
        book
    }

    /// Books by `author`, in the order they were added
    pub fn search_by_author(&self, author: &str) -> StoreResult<Vec<&Book>> {
        let hits = self.books.lookup_by_secondary(AUTHOR_INDEX, author)?;
        debug!(author = %author, results = hits.len(), "author search");
        Ok(hits)
    }

    /// Books published in `year`
    pub fn search_by_year(&self, year: i32) -> StoreResult<Vec<&Book>> {
        let hits = self.books.lookup_by_secondary(YEAR_INDEX, year)?;
        debug!(year, results = hits.len(), "year search");
        Ok(hits)
    }

    /// Books in `genre`, ignoring case
    pub fn search_by_genre(&self, genre: &str) -> StoreResult<Vec<&Book>> {
        let hits = self.books.lookup_by_secondary(GENRE_INDEX, genre)?;
        debug!(genre = %genre, results = hits.len(), "genre search");
        Ok(hits)
    }

    /// Books whose title contains `fragment`, ignoring case
    ///
    /// Full scan; results are sorted by ISBN so the order is stable.
    pub fn search_by_title(&self, fragment: &str) -> Vec<&Book> {
        let needle = fragment.to_lowercase();
        let mut hits: Vec<&Book> = self
            .books
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .collect();
        hits.sort_by(|a, b| a.isbn.cmp(&b.isbn));
        debug!(title = %fragment, results = hits.len(), "title search");
        hits
    }

    /// Books published between `start` and `end`, inclusive, ordered by year
    pub fn books_in_year_range(&self, start: i32, end: i32) -> StoreResult<Vec<&Book>> {
        let hits = self
            .books
            .lookup_range(YEAR_INDEX, IndexKey::from(start)..=IndexKey::from(end))?;
        debug!(start, end, results = hits.len(), "year range search");
        Ok(hits)
    }

    /// Dispatch `query` to the search matching `search_type`
    ///
    /// A year query that is not an integer logs an error and yields no
    /// results.
    pub fn search(&self, query: &str, search_type: SearchType) -> StoreResult<Vec<&Book>> {
        debug!(query = %query, search_type = %search_type, "search");
        match search_type {
            SearchType::Title => Ok(self.search_by_title(query)),
            SearchType::Author => self.search_by_author(query),
            SearchType::Genre => self.search_by_genre(query),
            SearchType::Year => match query.trim().parse::<i32>() {
                Ok(year) => self.search_by_year(year),
                Err(_) => {
                    error!(query = %query, "invalid year");
                    Ok(Vec::new())
                }
            },
            SearchType::Isbn => Ok(self.search_by_isbn(query).into_iter().collect()),
        }
    }

    // ========================================================================
    // Catalog info
    // ========================================================================

    /// Number of books in the catalog
    pub fn total_books(&self) -> usize {
        self.books.len()
    }

    /// Number of distinct authors
    pub fn unique_authors(&self) -> usize {
        // one bucket per distinct author; the index is always declared
        self.books.bucket_count(AUTHOR_INDEX).unwrap_or(0)
    }

    /// All ISBNs, sorted
    pub fn isbns(&self) -> Vec<&str> {
        let mut isbns: Vec<&str> = self.books.primary_keys().map(String::as_str).collect();
        isbns.sort_unstable();
        isbns
    }

    /// One-line catalog summary
    pub fn display_info(&self) -> String {
        format!("Library '{}' contains {} books", self.name, self.books.len())
    }

    /// Index shape of the underlying store
    pub fn stats(&self) -> IndexStats {
        self.books.stats()
    }

    /// Mutation outcome counts
    pub fn counters(&self) -> MutationCounters {
        self.books.counters()
    }

    /// Verify the catalog's index invariants
    pub fn check_indices(&self) -> StoreResult<()> {
        self.books.check_invariants()
    }

    /// Underlying store, read-only
    pub fn store(&self) -> &IndexedStore<Book> {
        &self.books
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("books", &self.books.len())
            .finish()
    }
}
