//! Errors raised while configuring or rewiring a network.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The ways a simulation can refuse to proceed.
///
/// Unreachable node pairs and exhausted rewiring candidates are not errors: the former is
/// reported through [`Distance::Unreachable`](crate::paths::Distance::Unreachable) and
/// [`AveragePathLength::Unreachable`](crate::metrics::AveragePathLength::Unreachable), the
/// latter is a silent no-op.
#[derive(Debug, Error)]
pub enum Error {
    /// The ring lattice needs at least three nodes.
    #[error("population must be at least 3, got {population}")]
    InvalidPopulation { population: usize },
    /// The rewiring probability is not a number in `[0, 1]`.
    #[error("rewiring probability must lie in [0, 1], got {probability}")]
    InvalidProbability { probability: f64 },
    /// A capped full rewire never produced a connected network.
    #[error("no connected network found after {attempts} rewiring attempts")]
    RewireAttemptsExhausted { attempts: usize },
    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
