//! Ranked search individuals.

use std::cmp::Ordering;

use super::{Problem, Tour};

/// A tour together with the problem it solves and its fitness.
///
/// Candidates are ordered by fitness only, lower first, using
/// [`f64::total_cmp`] so that sorting never panics.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::models::{Candidate, Problem, Tour};
///
/// let problem = Problem::closed(WeightMatrix::new(3), 0).unwrap();
/// let a = Candidate::new(problem.clone(), Tour::new(&problem), 4.0);
/// let b = Candidate::new(problem.clone(), Tour::new(&problem), 2.5);
/// assert!(b < a);
/// ```
#[derive(Debug, Clone)]
pub struct Candidate {
    problem: Problem,
    tour: Tour,
    fitness: f64,
}

impl Candidate {
    /// Bundles a tour with its fitness.
    pub fn new(problem: Problem, tour: Tour, fitness: f64) -> Self {
        Self {
            problem,
            tour,
            fitness,
        }
    }

    /// The problem this candidate belongs to.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The visiting order.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Fitness; lower is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Consumes the candidate and returns its tour.
    pub fn into_tour(self) -> Tour {
        self.tour
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.fitness.total_cmp(&other.fitness) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::WeightMatrix;

    fn candidate(fitness: f64) -> Candidate {
        let problem = Problem::closed(WeightMatrix::new(3), 0).expect("valid");
        let tour = Tour::new(&problem);
        Candidate::new(problem, tour, fitness)
    }

    #[test]
    fn test_sorting() {
        let mut population = vec![candidate(3.0), candidate(f64::INFINITY), candidate(1.0)];
        population.sort();
        let fitness: Vec<f64> = population.iter().map(Candidate::fitness).collect();
        assert_eq!(fitness, vec![1.0, 3.0, f64::INFINITY]);
    }

    #[test]
    fn test_equality_by_fitness() {
        assert_eq!(candidate(2.0), candidate(2.0));
        assert_ne!(candidate(2.0), candidate(2.5));
    }

    #[test]
    fn test_into_tour() {
        let c = candidate(0.0);
        assert_eq!(c.tour().count(), 3);
        assert_eq!(c.into_tour().ids(), &[0, 1, 2]);
    }
}
