//! Construction followed by local search.

use log::debug;

use super::generator::Generator;
use crate::evaluation::Objective;
use crate::local_search::{improve, Operator};
use crate::models::{Candidate, Problem, Tour};
use crate::random::{create_rng, SearchRng};
use crate::solver::Solver;

/// Wraps a generator and polishes each tour with local search.
pub struct ImprovedGenerator {
    base: Box<dyn Generator>,
    objective: Box<dyn Objective>,
    operators: Vec<Box<dyn Operator>>,
}

impl ImprovedGenerator {
    /// Creates the wrapper.
    pub fn new(
        base: Box<dyn Generator>,
        objective: Box<dyn Objective>,
        operators: Vec<Box<dyn Operator>>,
    ) -> Self {
        Self {
            base,
            objective,
            operators,
        }
    }
}

impl Generator for ImprovedGenerator {
    fn name(&self) -> &str {
        "improved"
    }

    fn generate(&self, problem: &Problem, rng: &mut SearchRng) -> Tour {
        let mut tour = self.base.generate(problem, rng);
        improve(problem, self.objective.as_ref(), &mut tour, &self.operators);
        tour
    }
}

/// One construction plus local search, as a [`Solver`].
///
/// # Examples
///
/// ```
/// use u_tour::constructive::{LocalSearchSolver, NearestNeighborGenerator};
/// use u_tour::distance::WeightMatrix;
/// use u_tour::evaluation::MinWeight;
/// use u_tour::local_search::{OneShift, TwoOpt};
/// use u_tour::models::Problem;
/// use u_tour::solver::Solver;
///
/// let wm = WeightMatrix::from_fn(6, |a, b| (a as f64 - b as f64).abs());
/// let problem = Problem::closed(wm, 0).unwrap();
/// let solver = LocalSearchSolver::new(
///     Box::new(NearestNeighborGenerator::default()),
///     Box::new(MinWeight),
///     vec![Box::new(TwoOpt), Box::new(OneShift)],
/// )
/// .with_seed(11);
///
/// assert_eq!(solver.search(&problem).fitness(), 10.0);
/// ```
pub struct LocalSearchSolver {
    generator: Box<dyn Generator>,
    objective: Box<dyn Objective>,
    operators: Vec<Box<dyn Operator>>,
    seed: Option<u64>,
}

impl LocalSearchSolver {
    /// Creates a solver with a random seed.
    pub fn new(
        generator: Box<dyn Generator>,
        objective: Box<dyn Objective>,
        operators: Vec<Box<dyn Operator>>,
    ) -> Self {
        Self {
            generator,
            objective,
            operators,
            seed: None,
        }
    }

    /// Fixes the seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Solver for LocalSearchSolver {
    fn name(&self) -> &str {
        "local-search"
    }

    fn search(&self, problem: &Problem) -> Candidate {
        let mut rng = create_rng(self.seed.unwrap_or_else(rand::random));
        let mut tour = self.generator.generate(problem, &mut rng);
        let gain = improve(problem, self.objective.as_ref(), &mut tour, &self.operators);
        let fitness = self.objective.calculate(problem, &tour);
        debug!(
            "{} from {}: fitness {fitness}, local search gain {gain}",
            self.name(),
            self.generator.name()
        );
        Candidate::new(problem.clone(), tour, fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::RandomGenerator;
    use crate::distance::WeightMatrix;
    use crate::evaluation::MinWeight;
    use crate::local_search::{OneShift, TwoOpt};
    use crate::random::create_rng;

    fn line(n: usize) -> WeightMatrix {
        WeightMatrix::from_fn(n, |a, b| (a as f64 - b as f64).abs())
    }

    #[test]
    fn test_improved_not_worse_than_base() {
        let problem = Problem::open(line(9), 0).expect("valid");
        let improved = ImprovedGenerator::new(
            Box::new(RandomGenerator),
            Box::new(MinWeight),
            vec![Box::new(TwoOpt), Box::new(OneShift)],
        );
        let raw = RandomGenerator.generate(&problem, &mut create_rng(4));
        let polished = improved.generate(&problem, &mut create_rng(4));
        assert!(MinWeight.calculate(&problem, &polished) <= MinWeight.calculate(&problem, &raw));
        assert_eq!(MinWeight.calculate(&problem, &polished), 8.0);
    }

    #[test]
    fn test_single_visit_has_zero_fitness() {
        let problem = Problem::closed(line(1), 0).expect("valid");
        let solver = LocalSearchSolver::new(
            Box::new(RandomGenerator),
            Box::new(MinWeight),
            vec![Box::new(TwoOpt)],
        )
        .with_seed(1);
        let best = solver.search(&problem);
        assert_eq!(best.fitness(), 0.0);
        assert_eq!(best.tour().ids(), &[0]);
    }
}
