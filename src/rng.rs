//! Random choice used by rewiring.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform random choice over a finite set, the only source of randomness rewiring consumes.
///
/// Implementations must pick uniformly; substituting a scripted implementation makes rewiring
/// fully deterministic.
pub trait Chooser {
    /// Picks an index in `0..len` uniformly, or `None` when `len` is zero.
    fn choose_index(&mut self, len: usize) -> Option<usize>;

    /// Returns `true` with the given probability, which is expected to lie in `[0, 1]`.
    fn chance(&mut self, probability: f64) -> bool;

    /// Picks one element of `items` uniformly.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.choose_index(items.len()).and_then(|i| items.get(i))
    }
}

/// The default [`Chooser`], a thin wrapper around `StdRng`.
///
/// Two handles built from the same seed produce the same sequence of choices.
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: StdRng,
}

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a handle seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Chooser for SimRng {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        Some(self.rng.gen_range(0..len))
    }

    fn chance(&mut self, probability: f64) -> bool {
        // `gen` samples [0, 1), so a probability of 0 never fires and 1 always does.
        self.rng.gen::<f64>() < probability
    }
}
