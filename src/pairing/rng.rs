use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::errors::{NightError, NightResult};

/// Source of every random decision made while running a night.
///
/// Injected rather than ambient so that generation is reproducible under a
/// fixed seed.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform value in `0..upper`. `upper` must be non-zero.
    fn below(&mut self, upper: u32) -> u32;
}

/// Thread-local OS-seeded randomness, used by the CLI.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }

    fn index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn below(&mut self, upper: u32) -> u32 {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Deterministic randomness for tests and replays.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    fn below(&mut self, upper: u32) -> u32 {
        self.inner.gen_range(0..upper)
    }
}

/// Uniformly pick one candidate. An empty candidate list is an invariant
/// violation, reported as [`NightError::EmptyCandidates`].
pub fn choose<'a, T, R: RandomSource>(
    rng: &mut R,
    candidates: &'a [T],
    what: &'static str,
) -> NightResult<&'a T> {
    if candidates.is_empty() {
        return Err(NightError::EmptyCandidates(what));
    }
    Ok(&candidates[rng.index(candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_shuffle() {
        let mut r1 = SeededRng::from_seed(123);
        let mut r2 = SeededRng::from_seed(123);

        let mut a: Vec<u32> = (0..20).collect();
        let mut b: Vec<u32> = (0..20).collect();
        r1.shuffle(&mut a);
        r2.shuffle(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_choose_from_empty_fails() {
        let mut rng = SeededRng::from_seed(1);
        let empty: Vec<u32> = Vec::new();

        let result = choose(&mut rng, &empty, "bye");
        assert_eq!(result, Err(NightError::EmptyCandidates("bye")));
    }

    #[test]
    fn test_choose_stays_in_bounds() {
        let mut rng = SeededRng::from_seed(7);
        let items = [10, 20, 30];

        for _ in 0..50 {
            let picked = choose(&mut rng, &items, "test").unwrap();
            assert!(items.contains(picked));
        }
    }
}
