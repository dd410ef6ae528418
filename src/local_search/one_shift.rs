//! Single-visit relocation (1-shift).
//!
//! # Algorithm
//!
//! For every movable visit `c` and every other visit `b`, evaluates moving `c`
//! to sit directly after `b` through the objective's hypothetical delta. The
//! first move with a positive delta is applied.
//!
//! # Complexity
//!
//! O(n²) delta evaluations per call; O(1) each for [`MinWeight`], a full
//! re-evaluation for other objectives.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.
//!
//! [`MinWeight`]: crate::evaluation::MinWeight

use crate::evaluation::Objective;
use crate::models::{Problem, Tour};

use super::operator::{Operator, IMPROVEMENT_EPS};

/// First-improvement 1-shift; serves every objective.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::evaluation::MinWeight;
/// use u_tour::local_search::{OneShift, Operator};
/// use u_tour::models::{Problem, Tour};
///
/// let wm = WeightMatrix::from_fn(5, |a, b| if (a + 1) % 5 == b { 1.0 } else { 10.0 });
/// let problem = Problem::closed(wm, 0).unwrap();
/// let mut tour = Tour::from_sequence(&problem, &[0, 2, 3, 1, 4]).unwrap();
///
/// assert_eq!(OneShift.apply(&problem, &MinWeight, &mut tour), Some(27.0));
/// assert_eq!(tour.ids(), &[0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OneShift;

impl Operator for OneShift {
    fn name(&self) -> &str {
        "1-shift"
    }

    fn supports(&self, _objective: &dyn Objective) -> bool {
        true
    }

    fn apply(&self, problem: &Problem, objective: &dyn Objective, tour: &mut Tour) -> Option<f64> {
        let ids = tour.ids().to_vec();
        for &customer in &ids {
            for &before in &ids {
                let Some(delta) =
                    objective.hypothetical_shift_after_delta(problem, tour, customer, before)
                else {
                    continue;
                };
                if delta > IMPROVEMENT_EPS {
                    return objective.shift_after_delta(problem, tour, customer, before);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::WeightMatrix;
    use crate::evaluation::{MinWeight, TimeWindowPenalty, TurnPenalty};
    use crate::models::{TimeWindow, TurnPenalties};

    fn ring(n: usize) -> WeightMatrix {
        WeightMatrix::from_fn(n, |a, b| if (a + 1) % n == b { 1.0 } else { 10.0 })
    }

    #[test]
    fn test_misplaced_visit_moved_back() {
        let problem = Problem::closed(ring(5), 0).expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 2, 3, 1, 4]).expect("valid");
        assert_eq!(OneShift.apply(&problem, &MinWeight, &mut tour), Some(27.0));
        assert_eq!(tour.ids(), &[0, 1, 2, 3, 4]);
        assert!(tour.is_consistent());
        assert!(OneShift.apply(&problem, &MinWeight, &mut tour).is_none());
    }

    #[test]
    fn test_endpoints_never_move() {
        let wm = WeightMatrix::from_fn(5, |a, b| (a as f64 - b as f64).abs());
        let problem = Problem::fixed(wm, 0, 1).expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 4, 2, 3, 1]).expect("valid");
        while OneShift.apply(&problem, &MinWeight, &mut tour).is_some() {}
        assert_eq!(tour.first(), 0);
        assert_eq!(tour.tail(), 1);
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_delta_matches_reevaluation() {
        let windows = vec![
            None,
            TimeWindow::new(0.0, 3.0),
            TimeWindow::new(0.0, 1.0),
            None,
        ];
        let wm = WeightMatrix::from_fn(4, |a, b| (a as f64 - b as f64).abs());
        let problem = Problem::open(wm, 0)
            .and_then(|p| p.with_time_windows(windows))
            .expect("valid");
        let objective = TimeWindowPenalty::new(100.0);
        let mut tour = Tour::from_sequence(&problem, &[0, 3, 1, 2]).expect("valid");
        let before = objective.calculate(&problem, &tour);
        let delta = OneShift.apply(&problem, &objective, &mut tour).expect("improves");
        let after = objective.calculate(&problem, &tour);
        assert!((before - delta - after).abs() < 1e-9);
        assert!(after < before);
    }

    #[test]
    fn test_turn_penalty_drives_move() {
        // all weights equal, so only the turn penalty can improve
        let wm = WeightMatrix::from_fn(4, |a, b| if a == b { 0.0 } else { 1.0 });
        let mut turns = TurnPenalties::new();
        turns.set(0, 1, 2, 50.0);
        let problem = Problem::open(wm, 0)
            .and_then(|p| p.with_turn_penalties(turns))
            .expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 1, 2, 3]).expect("valid");
        let delta = OneShift.apply(&problem, &TurnPenalty, &mut tour).expect("improves");
        assert_eq!(delta, 50.0);
        assert_eq!(TurnPenalty.calculate(&problem, &tour), 3.0);
    }
}
