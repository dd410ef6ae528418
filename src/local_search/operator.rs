//! Operator contract and the local-search driver.

use log::trace;

use crate::evaluation::Objective;
use crate::models::{Problem, Tour};

/// Smallest gain treated as a real improvement.
pub(crate) const IMPROVEMENT_EPS: f64 = 1e-9;

/// Upper bound on accepted moves in one [`improve`] call.
pub const MAX_MOVES: usize = 100_000;

/// A local-search operator: inspects one tour and applies at most one
/// structural edit.
///
/// Operators keep no state between calls, so one instance can serve many
/// threads at once.
pub trait Operator: Send + Sync {
    /// Short diagnostic label.
    fn name(&self) -> &str;

    /// Returns `true` if this operator can serve `objective`.
    fn supports(&self, objective: &dyn Objective) -> bool;

    /// Applies one move. Returns the fitness delta (positive means better)
    /// when the tour changed, `None` when no acceptable move exists.
    ///
    /// A returned delta must exceed the improvement threshold; [`improve`]
    /// relies on this to terminate.
    fn apply(&self, problem: &Problem, objective: &dyn Objective, tour: &mut Tour)
        -> Option<f64>;
}

/// Runs the compatible operators until none of them finds a move.
///
/// After every accepted move the search restarts at the first operator.
/// Returns the accumulated fitness delta.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::evaluation::{MinWeight, Objective};
/// use u_tour::local_search::{improve, OneShift, Operator, TwoOpt};
/// use u_tour::models::{Problem, Tour};
///
/// let wm = WeightMatrix::from_fn(6, |a, b| (a as f64 - b as f64).abs());
/// let problem = Problem::closed(wm, 0).unwrap();
/// let mut tour = Tour::from_sequence(&problem, &[0, 4, 2, 5, 1, 3]).unwrap();
/// let operators: Vec<Box<dyn Operator>> = vec![Box::new(TwoOpt), Box::new(OneShift)];
///
/// let before = MinWeight.calculate(&problem, &tour);
/// let gain = improve(&problem, &MinWeight, &mut tour, &operators);
/// assert!((MinWeight.calculate(&problem, &tour) - (before - gain)).abs() < 1e-9);
/// assert_eq!(MinWeight.calculate(&problem, &tour), 10.0);
/// ```
pub fn improve(
    problem: &Problem,
    objective: &dyn Objective,
    tour: &mut Tour,
    operators: &[Box<dyn Operator>],
) -> f64 {
    let active: Vec<&dyn Operator> = operators
        .iter()
        .map(|op| op.as_ref())
        .filter(|op| op.supports(objective))
        .collect();

    let mut total = 0.0;
    let mut moves = 0;
    'search: while moves < MAX_MOVES {
        for op in &active {
            if let Some(delta) = op.apply(problem, objective, tour) {
                trace!("{} applied, delta {delta}", op.name());
                total += delta;
                moves += 1;
                continue 'search;
            }
        }
        break;
    }
    total
}
