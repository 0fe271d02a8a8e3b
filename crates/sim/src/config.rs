//! Simulation configuration and errors.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use folio_core::StoreError;

/// Default number of simulation steps.
pub const DEFAULT_STEPS: usize = 20;

/// Default catalog name for simulated runs.
pub const DEFAULT_LIBRARY_NAME: &str = "Simulation Library";

/// Errors raised while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Store operation failed in a way the simulation does not tolerate.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for `SimulationConfig`.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parameters of one simulation run.
///
/// Every field has a default, so a config file only needs the fields it
/// overrides:
///
/// ```toml
/// steps = 100
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of random events to execute.
    pub steps: usize,
    /// Seed for the random source; None draws one from OS entropy.
    pub seed: Option<u64>,
    /// Name given to the simulated catalog.
    pub library_name: String,
    /// Verify index invariants after every mutation.
    pub verify_invariants: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            seed: None,
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
            verify_invariants: false,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Set the step count.
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Set the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the catalog name.
    pub fn library_name(mut self, name: impl Into<String>) -> Self {
        self.library_name = name.into();
        self
    }

    /// Enable or disable per-mutation invariant checks.
    pub fn verify_invariants(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }
}
