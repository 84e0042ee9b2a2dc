//! Seeded random source of an environment.
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// The single pseudorandom stream an environment draws from.
///
/// Every random decision of an episode (task, ground truth, agent pose,
/// placement) goes through this type, in a fixed order, so an episode is
/// replayable from the seed alone.
#[derive(Debug, Clone)]
pub struct EpisodeRng {
    rng: StdRng,
}

impl EpisodeRng {
    /// Creates a stream from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Restarts the stream from a seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Uniform integer in `lo..hi`.
    pub fn uniform_int(&mut self, lo: usize, hi: usize) -> usize {
        self.rng.gen_range(lo..hi)
    }

    /// A uniformly random permutation of `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut ixs = (0..n).collect::<Vec<_>>();
        ixs.shuffle(&mut self.rng);
        ixs
    }

    /// A uniformly chosen element, `None` for an empty slice.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.uniform_int(0, items.len())])
        }
    }
}
