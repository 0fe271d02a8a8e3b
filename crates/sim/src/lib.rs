//! Random-event simulator for the Folio library catalog
//!
//! Drives a `Library` through a seeded random walk of add, remove, update,
//! search and consistency-check events. The random source is always passed
//! explicitly; nothing here touches process-wide random state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod event;
pub mod generator;
pub mod runner;

pub use config::{SimError, SimulationConfig, DEFAULT_LIBRARY_NAME, DEFAULT_STEPS};
pub use event::Event;
pub use generator::{generate_random_book, GENRES};
pub use runner::{run_simulation, run_with_rng, SimulationReport, MISSING_ISBN};
