//! Simulation events

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One kind of step the simulator can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Add a freshly generated book
    AddBook,
    /// Remove a random existing book
    RemoveBook,
    /// Search by the author of a random existing book
    SearchAuthor,
    /// Search by the genre of a random existing book
    SearchGenre,
    /// Search by the year of a random existing book
    SearchYear,
    /// Move a random existing book to a random genre
    UpdateBook,
    /// Look up an ISBN that is never generated
    GetMissingBook,
    /// Run the catalog's index invariant check
    CheckIndices,
}

impl Event {
    /// Every event, in declaration order
    pub const ALL: [Event; 8] = [
        Event::AddBook,
        Event::RemoveBook,
        Event::SearchAuthor,
        Event::SearchGenre,
        Event::SearchYear,
        Event::UpdateBook,
        Event::GetMissingBook,
        Event::CheckIndices,
    ];

    /// Draw an event uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Event {
        *Self::ALL.choose(rng).unwrap_or(&Event::AddBook)
    }

    /// Snake-case event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::AddBook => "add_book",
            Event::RemoveBook => "remove_book",
            Event::SearchAuthor => "search_author",
            Event::SearchGenre => "search_genre",
            Event::SearchYear => "search_year",
            Event::UpdateBook => "update_book",
            Event::GetMissingBook => "get_missing_book",
            Event::CheckIndices => "check_indices",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
