use rand::{Rng as _, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[derive(Debug, Clone)]
pub struct Rng {
    rng: Xoshiro256PlusPlus,
}

impl Rng {
    #[must_use]
    pub fn from_seed(seed: u64) -> Rng {
        Rng {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Picks an index in `0..len` other than `excluded`, uniformly.
    ///
    /// `len` must be at least 2.
    pub fn index_excluding(&mut self, len: usize, excluded: usize) -> usize {
        debug_assert!(len >= 2 && excluded < len);
        let pick = self.rng.gen_range(0..len - 1);
        if pick >= excluded {
            pick + 1
        } else {
            pick
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::Rng;

    fn draw(seed: u64) -> Vec<usize> {
        let mut rng = Rng::from_seed(seed);
        (0..32).map(|i| rng.index_excluding(5, i % 5)).collect_vec()
    }

    #[test]
    fn rng_determinism() {
        assert_eq!(draw(123_497_239_457), draw(123_497_239_457));
        assert_ne!(draw(123_497_239_457), draw(123_497_239_458));
    }

    #[test]
    fn index_excluding_never_returns_excluded() {
        let mut rng = Rng::from_seed(42);
        for len in 2..7 {
            for excluded in 0..len {
                let mut seen = vec![false; len];
                for _ in 0..500 {
                    let i = rng.index_excluding(len, excluded);
                    assert_ne!(i, excluded);
                    seen[i] = true;
                }
                let hit = seen.iter().filter(|x| **x).count();
                assert_eq!(hit, len - 1, "every other index should come up");
            }
        }
    }
}
