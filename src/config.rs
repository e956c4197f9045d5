//! Simulation parameters.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The smallest population a reach-2 ring lattice can be built over.
pub const MIN_POPULATION: usize = 3;

/// The parameters of a small-world simulation.
///
/// Missing fields take their [`Default`] values when deserialising.
///
/// # Examples
///
/// ```
/// use smallworld::config::Config;
///
/// let config = Config::from_json(r#"{ "population": 12, "rewiring_probability": 0.25 }"#).unwrap();
///
/// assert_eq!(config.population, 12);
/// assert_eq!(config.max_rewire_attempts, None);
/// assert!(Config::from_json(r#"{ "population": 2 }"#).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of nodes in the ring, at least 3.
    pub population: usize,
    /// Probability in `[0, 1]` that a full rewire replaces any given lattice edge.
    pub rewiring_probability: f64,
    /// Caps the number of full-rewire attempts. `None` retries until a connected network turns
    /// up, which may never happen for pathological parameters.
    pub max_rewire_attempts: Option<NonZeroUsize>,
    /// Seeds the random choices; `None` draws a seed from system entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            population: 30,
            rewiring_probability: 0.9,
            max_rewire_attempts: None,
            seed: None,
        }
    }
}

impl Config {
    /// Creates a validated configuration with no attempt cap and an entropy seed.
    pub fn new(population: usize, rewiring_probability: f64) -> Result<Self> {
        let config = Self {
            population,
            rewiring_probability,
            ..Self::default()
        };
        config.validate()?;

        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.population < MIN_POPULATION {
            return Err(Error::InvalidPopulation {
                population: self.population,
            });
        }

        // `contains` is false for NaN as well.
        if !(0.0..=1.0).contains(&self.rewiring_probability) {
            return Err(Error::InvalidProbability {
                probability: self.rewiring_probability,
            });
        }

        Ok(())
    }
}
