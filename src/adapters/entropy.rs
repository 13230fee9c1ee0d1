//! Random-source adapter.
//!
//! Implements [`EntropyPort`] on top of `rand`'s [`StdRng`].  A fixed
//! seed gives a reproducible run; the OS-seeded constructor fails fast
//! at construction when the platform cannot supply entropy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::EntropyPort;
use crate::error::{Error, Result};

/// Uniform `[0, 1)` draws from a seedable generator.
pub struct SeededEntropy {
    rng: StdRng,
}

impl SeededEntropy {
    /// Deterministic generator for reproducible simulations and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system.
    pub fn from_os() -> Result<Self> {
        let rng = StdRng::try_from_os_rng()
            .map_err(|_| Error::Entropy("OS random source unavailable"))?;
        Ok(Self { rng })
    }
}

impl EntropyPort for SeededEntropy {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
