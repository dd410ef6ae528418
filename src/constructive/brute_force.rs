//! Exhaustive search for tiny problems.
//!
//! # Algorithm
//!
//! Enumerates every ordering of the movable visits with Heap's algorithm
//! and keeps the first ordering of lowest fitness. Works with any objective.
//!
//! # Complexity
//!
//! O(m! × n) where m = movable visits, so it is limited to
//! [`BRUTE_FORCE_LIMIT`] movable visits.
//!
//! # Reference
//!
//! Heap, B.R. (1963). "Permutations by Interchanges", *The Computer
//! Journal* 6(3), 293-294.

use log::warn;

use crate::evaluation::Objective;
use crate::models::{Candidate, Problem, Tour};
use crate::solver::Solver;

/// Largest number of movable visits [`BruteForce`] enumerates.
pub const BRUTE_FORCE_LIMIT: usize = 8;

/// Exact solver for problems with few movable visits.
///
/// # Examples
///
/// ```
/// use u_tour::constructive::BruteForce;
/// use u_tour::distance::WeightMatrix;
/// use u_tour::evaluation::MinWeight;
/// use u_tour::models::Problem;
///
/// let wm = WeightMatrix::from_fn(4, |a, b| if (a + 1) % 4 == b { 1.0 } else { 5.0 });
/// let problem = Problem::closed(wm, 0).unwrap();
///
/// let best = BruteForce::new(Box::new(MinWeight)).solve(&problem).unwrap();
/// assert_eq!(best.tour().ids(), &[0, 1, 2, 3]);
/// assert_eq!(best.fitness(), 4.0);
/// ```
pub struct BruteForce {
    objective: Box<dyn Objective>,
}

impl BruteForce {
    /// Creates the solver.
    pub fn new(objective: Box<dyn Objective>) -> Self {
        Self { objective }
    }

    /// Returns the optimum, or `None` when the problem has more than
    /// [`BRUTE_FORCE_LIMIT`] movable visits.
    pub fn solve(&self, problem: &Problem) -> Option<Candidate> {
        enumerate(problem, self.objective.as_ref())
    }
}

/// Exhaustive search with a borrowed objective.
pub(crate) fn enumerate(problem: &Problem, objective: &dyn Objective) -> Option<Candidate> {
    let mut movable = problem.movable_ids();
    if movable.len() > BRUTE_FORCE_LIMIT {
        return None;
    }
    let mut best: Option<(Tour, f64)> = None;
    let mut consider = |order: &[usize]| {
        let Some(tour) = sequence(problem, order) else {
            return;
        };
        let fitness = objective.calculate(problem, &tour);
        match &best {
            Some((_, f)) if fitness >= *f => {}
            _ => best = Some((tour, fitness)),
        }
    };

    // Heap's algorithm, iterative form
    let m = movable.len();
    let mut c = vec![0; m];
    consider(&movable);
    let mut i = 1;
    while i < m {
        if c[i] < i {
            if i % 2 == 0 {
                movable.swap(0, i);
            } else {
                movable.swap(c[i], i);
            }
            consider(&movable);
            c[i] += 1;
            i = 1;
        } else {
            c[i] = 0;
            i += 1;
        }
    }

    best.map(|(tour, fitness)| Candidate::new(problem.clone(), tour, fitness))
}

fn sequence(problem: &Problem, movable: &[usize]) -> Option<Tour> {
    let mut ids = Vec::with_capacity(problem.count());
    ids.push(problem.first());
    ids.extend_from_slice(movable);
    if let Some(last) = problem.fixed_last() {
        ids.push(last);
    }
    Tour::from_sequence(problem, &ids)
}

impl Solver for BruteForce {
    fn name(&self) -> &str {
        "brute-force"
    }

    /// Falls back to the identity tour above [`BRUTE_FORCE_LIMIT`].
    fn search(&self, problem: &Problem) -> Candidate {
        self.solve(problem).unwrap_or_else(|| {
            warn!(
                "brute force skipped: {} movable visits exceed the limit of {BRUTE_FORCE_LIMIT}",
                problem.movable_ids().len()
            );
            let tour = Tour::new(problem);
            let fitness = self.objective.calculate(problem, &tour);
            Candidate::new(problem.clone(), tour, fitness)
        })
    }
}
