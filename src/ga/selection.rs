//! Probabilistic tournament selection.
//!
//! # Algorithm
//!
//! Draws a random sample of distinct indices, ranks the sample by fitness
//! (lower first) and walks it: each entrant is accepted with probability
//! `p`, otherwise the walk moves on. The last entrant is taken if nobody was
//! accepted earlier. Entrant `k` (0-based) therefore wins with probability
//! `p (1 - p)^k`, which biases towards fitter individuals without always
//! taking the best.
//!
//! # Reference
//!
//! Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes Used
//! in Genetic Algorithms"

use rand::seq::index;
use rand::Rng;

/// Selects one index of `fitness`.
///
/// `sample_size` is clamped into `1..=fitness.len()`.
///
/// # Panics
/// Panics if `fitness` is empty.
///
/// # Examples
///
/// ```
/// use u_tour::ga::tournament;
/// use u_tour::random::create_rng;
///
/// let fitness = [5.0, 1.0, 3.0];
/// // the whole population enters and the first entrant is always accepted
/// assert_eq!(tournament(&fitness, 3, 1.0, &mut create_rng(0)), 1);
/// ```
pub fn tournament<R: Rng>(fitness: &[f64], sample_size: usize, p: f64, rng: &mut R) -> usize {
    assert!(!fitness.is_empty(), "cannot select from empty population");
    let n = fitness.len();
    let k = sample_size.clamp(1, n);

    let mut sample = index::sample(rng, n, k).into_vec();
    sample.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]).then(a.cmp(&b)));

    let Some((&last, entrants)) = sample.split_last() else {
        return 0;
    };
    for &idx in entrants {
        if rng.random_bool(p) {
            return idx;
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_certain_acceptance_takes_best() {
        let fitness = [4.0, 2.0, 9.0, 2.0, 7.0];
        let mut rng = create_rng(1);
        for _ in 0..20 {
            // ties keep the lower index
            assert_eq!(tournament(&fitness, 5, 1.0, &mut rng), 1);
        }
    }

    #[test]
    fn test_single_entrant() {
        let fitness = [4.0, 2.0, 9.0];
        let mut rng = create_rng(2);
        for _ in 0..20 {
            assert!(tournament(&fitness, 0, 0.5, &mut rng) < 3);
        }
    }

    #[test]
    fn test_bias_towards_fitter() {
        let fitness: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut rng = create_rng(3);
        let mut wins = [0usize; 10];
        for _ in 0..2000 {
            wins[tournament(&fitness, 10, 0.75, &mut rng)] += 1;
        }
        assert!(wins[0] > wins[1]);
        assert!(wins[1] > wins[5]);
        assert!(wins[0] > 1200);
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn test_empty_panics() {
        tournament(&[], 1, 0.5, &mut create_rng(0));
    }
}
