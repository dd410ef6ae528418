//! Initial tour generators.

use rand::seq::SliceRandom;

use crate::models::{Problem, Tour};
use crate::random::SearchRng;

/// Builds a starting tour for a problem.
///
/// Generators only read the problem; all randomness comes from the caller's
/// stream, so one generator instance can serve many population slots in
/// parallel.
pub trait Generator: Send + Sync {
    /// Short diagnostic label.
    fn name(&self) -> &str;

    /// Produces a valid tour of `problem`.
    fn generate(&self, problem: &Problem, rng: &mut SearchRng) -> Tour;
}

/// Uniformly random permutation of the movable visits.
///
/// # Examples
///
/// ```
/// use u_tour::constructive::{Generator, RandomGenerator};
/// use u_tour::distance::WeightMatrix;
/// use u_tour::models::Problem;
/// use u_tour::random::create_rng;
///
/// let problem = Problem::fixed(WeightMatrix::new(6), 0, 5).unwrap();
/// let tour = RandomGenerator.generate(&problem, &mut create_rng(1));
/// assert_eq!(tour.ids()[0], 0);
/// assert_eq!(tour.tail(), 5);
/// assert_eq!(tour.count(), 6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl Generator for RandomGenerator {
    fn name(&self) -> &str {
        "random"
    }

    fn generate(&self, problem: &Problem, rng: &mut SearchRng) -> Tour {
        let mut ids = Vec::with_capacity(problem.count());
        ids.push(problem.first());
        let mut movable = problem.movable_ids();
        movable.shuffle(rng);
        ids.extend(movable);
        if let Some(last) = problem.fixed_last() {
            ids.push(last);
        }
        Tour::from_sequence(problem, &ids).unwrap_or_else(|| Tour::new(problem))
    }
}
