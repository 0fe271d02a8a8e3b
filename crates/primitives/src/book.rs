//! Book record

use folio_core::{IndexKey, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A catalog entry, identified by ISBN.
///
/// Equality and hashing look at the ISBN only: two values with the same
/// ISBN are the same book even if their other fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publication year.
    pub year: i32,
    /// Genre label (matched case-insensitively by the catalog).
    pub genre: String,
    /// ISBN; the primary key.
    pub isbn: String,
}

impl Book {
    /// Create a new book.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            isbn: isbn.into(),
        }
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

impl Record for Book {
    type Key = String;
    const FIELDS: &'static [&'static str] = &["title", "author", "year", "genre", "isbn"];

    fn primary_key(&self) -> &String {
        &self.isbn
    }

    fn field(&self, name: &str) -> Option<IndexKey> {
        match name {
            "title" => Some(IndexKey::from(&self.title)),
            "author" => Some(IndexKey::from(&self.author)),
            "year" => Some(IndexKey::from(self.year)),
            "genre" => Some(IndexKey::from(&self.genre)),
            "isbn" => Some(IndexKey::from(&self.isbn)),
            _ => None,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {} ({})", self.title, self.author, self.year)
    }
}
