//! Random number generation
//!
//! Every level is generated from a seeded ChaCha stream so that two
//! instances built from the same seed play out identically.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Game random number generator
///
/// Wraps ChaCha8Rng. The seed is kept so the instance can be rebuilt
/// from scratch on reset.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this stream was built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1, or 0 if n is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns 1..n, or 0 if n is 0
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }

    /// Roll n dice with m sides
    pub fn dice(&mut self, n: u32, m: u32) -> u32 {
        (0..n).map(|_| self.rnd(m)).sum()
    }

    /// Uniform value in the half-open range `lo..hi`; `lo` when empty
    pub fn range(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// Returns true with probability percent/100
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rn2(100) < percent
    }
}

/// Fresh seed from the thread RNG
pub fn gen_seed() -> u64 {
    rand::random()
}

/// Fresh seed from the half-open range `lo..hi`
pub fn gen_ranged_seed(lo: u64, hi: u64) -> u64 {
    if hi <= lo {
        return lo;
    }
    rand::thread_rng().gen_range(lo..hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sided_rolls() {
        let mut rng = GameRng::new(3);
        assert_eq!(rng.rn2(0), 0);
        assert_eq!(rng.rnd(0), 0);
        assert_eq!(rng.dice(4, 0), 0);
        assert!(!rng.percent(0));
        let rolls: Vec<u32> = (0..500).map(|_| rng.dice(2, 4)).collect();
        assert!(rolls.iter().all(|n| (2..=8).contains(n)));
    }

    #[test]
    fn test_range_empty() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.range(9, 3), 9);
        for _ in 0..100 {
            assert!((3..9).contains(&rng.range(3, 9)));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GameRng::new(2024);
        let mut b = GameRng::new(a.seed());
        let xs: Vec<u32> = (0..64).map(|_| a.rnd(20)).collect();
        let ys: Vec<u32> = (0..64).map(|_| b.rnd(20)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_ranged_seed() {
        for _ in 0..50 {
            let s = gen_ranged_seed(10, 20);
            assert!((10..20).contains(&s));
        }
        assert_eq!(gen_ranged_seed(4, 4), 4);
    }
}
