//! Nearest-neighbor constructive heuristic.
//!
//! Builds the tour greedily: starting from `first`, repeatedly travel to one
//! of the `k` nearest unvisited visits (chosen uniformly), then append a fixed
//! last visit if the problem has one. With `k = 1` the result is the classic
//! deterministic nearest-neighbor tour.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of visits.
//!
//! # Reference
//!
//! The simplest constructive heuristic for the TSP. Tours are typically
//! 15-25% above optimal, which makes it a fast and diverse GA seed.

use rand::Rng;

use super::generator::Generator;
use crate::models::{Problem, Tour};
use crate::random::SearchRng;

/// Greedy nearest-neighbor tour, randomized among the `k` nearest.
///
/// # Examples
///
/// ```
/// use u_tour::constructive::{Generator, NearestNeighborGenerator};
/// use u_tour::distance::WeightMatrix;
/// use u_tour::models::Problem;
/// use u_tour::random::create_rng;
///
/// let wm = WeightMatrix::from_fn(4, |a, b| (a as f64 - b as f64).abs());
/// let problem = Problem::closed(wm, 0).unwrap();
///
/// let tour = NearestNeighborGenerator::greedy().generate(&problem, &mut create_rng(0));
/// assert_eq!(tour.ids(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NearestNeighborGenerator {
    k: usize,
}

impl NearestNeighborGenerator {
    /// Chooses among the `k` nearest unvisited visits (at least 1).
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }

    /// Always takes the nearest unvisited visit.
    pub fn greedy() -> Self {
        Self::new(1)
    }

    /// Size of the candidate list.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl Default for NearestNeighborGenerator {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Generator for NearestNeighborGenerator {
    fn name(&self) -> &str {
        "nearest-neighbor"
    }

    fn generate(&self, problem: &Problem, rng: &mut SearchRng) -> Tour {
        let weights = problem.weights();
        let mut unvisited = problem.movable_ids();
        let mut ids = Vec::with_capacity(problem.count());
        let mut current = problem.first();
        ids.push(current);

        while !unvisited.is_empty() {
            let nearest = weights.nearest_neighbors(current, &unvisited, self.k);
            let next = if nearest.len() > 1 {
                nearest[rng.random_range(0..nearest.len())]
            } else {
                match nearest.first() {
                    Some(&id) => id,
                    None => break,
                }
            };
            unvisited.retain(|&id| id != next);
            ids.push(next);
            current = next;
        }

        if let Some(last) = problem.fixed_last() {
            ids.push(last);
        }
        Tour::from_sequence(problem, &ids).unwrap_or_else(|| Tour::new(problem))
    }
}
