use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG shared by one match: food placement and opponent draws both
/// pull from it, so a match replays identically from its seed.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Uniform draw in [0, 1).
    pub fn random_unit(&mut self) -> f64 {
        self.rng.random()
    }
}
