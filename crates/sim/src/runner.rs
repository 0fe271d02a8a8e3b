//! Simulation driver
//!
//! Runs a random walk of catalog events against a fresh `Library`. The
//! random source is an explicit `StdRng` built from the config seed, so two
//! runs with the same seed execute the same events on the same books.

use folio_primitives::{Book, Library};
use folio_storage::{MutationCounters, StoreOptions};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

use crate::config::{SimError, SimulationConfig};
use crate::event::Event;
use crate::generator::{generate_random_book, pick, GENRES};

/// ISBN the generator can never produce (13 digits)
pub const MISSING_ISBN: &str = "9999999999999";

/// Outcome of a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Steps executed
    pub steps: usize,
    /// Seed the random source was built from
    pub seed: u64,
    /// How often each event was drawn
    pub events: BTreeMap<Event, usize>,
    /// Events that found the catalog empty and did nothing
    pub skipped: usize,
    /// Books in the catalog at the end
    pub final_books: usize,
    /// Distinct authors at the end
    pub unique_authors: usize,
    /// Mutation outcomes recorded by the store
    pub counters: MutationCounters,
    /// Final catalog summary line
    pub summary: String,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation completed ({} steps, seed {})", self.steps, self.seed)?;
        for (event, count) in &self.events {
            writeln!(f, "  {:<16} {}", event, count)?;
        }
        writeln!(f, "  skipped          {}", self.skipped)?;
        writeln!(
            f,
            "Mutations: {} ok, {} rejected",
            self.counters.successes(),
            self.counters.failures()
        )?;
        writeln!(f, "Final library status: {}", self.summary)?;
        write!(f, "Total unique authors: {}", self.unique_authors)
    }
}

/// Run a simulation as described by `config`
///
/// Uses `config.seed` when set, otherwise draws a seed from OS entropy and
/// records it in the report so the run can be replayed.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport, SimError> {
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, steps = config.steps, "starting simulation");
    let mut rng = StdRng::seed_from_u64(seed);
    run_with_rng(config, seed, &mut rng)
}

/// Run a simulation with a caller-supplied random source
///
/// `seed` is only recorded in the report.
pub fn run_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    seed: u64,
    rng: &mut R,
) -> Result<SimulationReport, SimError> {
    let options = StoreOptions::new().verify_invariants(config.verify_invariants);
    let mut library = Library::with_options(config.library_name.as_str(), options)?;

    let mut events = BTreeMap::new();
    let mut skipped = 0usize;

    for step in 1..=config.steps {
        let event = Event::random(rng);
        info!(step, event = %event, "executing event");
        *events.entry(event).or_insert(0usize) += 1;

        if !apply(&mut library, event, rng)? {
            skipped += 1;
        }
    }

    let report = SimulationReport {
        steps: config.steps,
        seed,
        events,
        skipped,
        final_books: library.total_books(),
        unique_authors: library.unique_authors(),
        counters: library.counters(),
        summary: library.display_info(),
    };
    info!(
        books = report.final_books,
        authors = report.unique_authors,
        "simulation completed"
    );
    Ok(report)
}

/// Pick the ISBN of a random book in the catalog
fn random_isbn<R: Rng + ?Sized>(library: &Library, rng: &mut R) -> Option<String> {
    library.isbns().choose(rng).map(|s| s.to_string())
}

/// Pick a random book in the catalog
fn random_book<R: Rng + ?Sized>(library: &Library, rng: &mut R) -> Option<Book> {
    let isbn = random_isbn(library, rng)?;
    library.search_by_isbn(&isbn).cloned()
}

/// Execute one event; returns false if it was skipped on an empty catalog
///
/// Rejected mutations (duplicate ISBN, missing book) are expected outcomes
/// and are only logged. Invariant violations abort the run.
fn apply<R: Rng + ?Sized>(library: &mut Library, event: Event, rng: &mut R) -> Result<bool, SimError> {
    match event {
        Event::AddBook => {
            let book = generate_random_book(rng);
            if let Err(e) = library.add_book(book) {
                warn!(error = %e, "failed to add book");
            }
        }
        Event::RemoveBook => {
            let Some(isbn) = random_isbn(library, rng) else {
                info!("no books to remove");
                return Ok(false);
            };
            if let Err(e) = library.remove_book(&isbn) {
                warn!(error = %e, "failed to remove book");
            }
        }
        Event::SearchAuthor => {
            let Some(book) = random_book(library, rng) else {
                info!("no books in library for author search");
                return Ok(false);
            };
            let found = library.search_by_author(&book.author)?.len();
            info!(author = %book.author, found, "searched author");
        }
        Event::SearchGenre => {
            let Some(book) = random_book(library, rng) else {
                info!("no books in library for genre search");
                return Ok(false);
            };
            let found = library.search_by_genre(&book.genre)?.len();
            info!(genre = %book.genre, found, "searched genre");
        }
        Event::SearchYear => {
            let Some(book) = random_book(library, rng) else {
                info!("no books in library for year search");
                return Ok(false);
            };
            let found = library.search_by_year(book.year)?.len();
            info!(year = book.year, found, "searched year");
        }
        Event::UpdateBook => {
            let Some(isbn) = random_isbn(library, rng) else {
                info!("no books to update");
                return Ok(false);
            };
            let genre = pick(rng, GENRES).to_string();
            if let Err(e) = library.update_book(&isbn, |b| b.genre = genre) {
                warn!(error = %e, "failed to update book");
            }
        }
        Event::GetMissingBook => match library.search_by_isbn(MISSING_ISBN) {
            None => info!(isbn = MISSING_ISBN, "missing book not found, as expected"),
            Some(book) => warn!(isbn = MISSING_ISBN, book = %book, "unexpectedly found book"),
        },
        Event::CheckIndices => {
            library.check_indices()?;
            info!(stats = %library.stats(), "indices consistent");
        }
    }
    Ok(true)
}
