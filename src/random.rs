//! Random number streams.
//!
//! Every stochastic routine in this crate receives its generator explicitly.
//! A search owns one master stream and derives one child stream per
//! population slot, so parallel work never shares a generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The concrete generator used by searches and generators.
pub type SearchRng = StdRng;

/// Creates a deterministic generator from a seed.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_tour::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> SearchRng {
    StdRng::seed_from_u64(seed)
}

/// Draws `count` child seeds from `rng`.
///
/// Seeds are drawn up front so that the child streams do not depend on the
/// order in which worker threads pick up their slots.
pub fn split_seeds<R: Rng>(rng: &mut R, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.random()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(42);
        let mut b = create_rng(42);
        for _ in 0..10 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }

    #[test]
    fn test_split_seeds_deterministic() {
        let first = split_seeds(&mut create_rng(1), 5);
        let second = split_seeds(&mut create_rng(1), 5);
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }
}
