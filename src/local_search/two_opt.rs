//! 2-opt segment reversal.
//!
//! # Algorithm
//!
//! For each pair of edges `(e11 → e12)` and `(e21 → e22)` with at least one
//! edge strictly between them, reverse the path `e12 … e21`:
//!
//! ```text
//! before: e11 → e12 → … → e21 → e22
//! after:  e11 → e21 → … → e12 → e22
//! ```
//!
//! Weights may be asymmetric, so the gain also accounts for every interior
//! edge changing direction. Interior sums come from forward/backward prefix
//! sums, which makes each candidate O(1). The first improving reversal is
//! applied (first improvement); for a fixed start edge the longest segment is
//! tried first.
//!
//! With time windows, a reversal is only a candidate if the simulated
//! arrivals along the reversed segment (and every later visit that is
//! delayed by it) stay within their deadlines.
//!
//! # Complexity
//!
//! O(n²) per call.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::evaluation::{fitness_delta, Objective, ObjectiveKind, Schedule};
use crate::models::{Problem, Tour};

use super::operator::{Operator, IMPROVEMENT_EPS};

/// First-improvement 2-opt for weight objectives.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::evaluation::MinWeight;
/// use u_tour::local_search::{Operator, TwoOpt};
/// use u_tour::models::{Problem, Tour};
///
/// // directed ring 0→1→2→3→4→0 costs 1 per edge, everything else 10
/// let wm = WeightMatrix::from_fn(5, |a, b| if (a + 1) % 5 == b { 1.0 } else { 10.0 });
/// let problem = Problem::closed(wm, 0).unwrap();
/// let mut tour = Tour::from_sequence(&problem, &[0, 3, 2, 1, 4]).unwrap();
///
/// let delta = TwoOpt.apply(&problem, &MinWeight, &mut tour);
/// assert_eq!(delta, Some(36.0));
/// assert_eq!(tour.ids(), &[0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl Operator for TwoOpt {
    fn name(&self) -> &str {
        "2-opt"
    }

    fn supports(&self, objective: &dyn Objective) -> bool {
        matches!(
            objective.kind(),
            ObjectiveKind::MinWeight | ObjectiveKind::CappedWeight
        )
    }

    fn apply(&self, problem: &Problem, objective: &dyn Objective, tour: &mut Tour) -> Option<f64> {
        let (i, j, gain) = find_reversal(problem, tour)?;
        let weight = objective.calculate_weight(problem, tour);
        let old = objective.calculate_with_weight(problem, tour, weight);
        apply_reversal(tour, i, j);
        let new = objective.calculate_with_weight(problem, tour, weight - gain);
        Some(fitness_delta(old, new))
    }
}

/// Finds the first improving reversal of positions `i+1..=j`.
///
/// Returns `(i, j, weight gain)`.
pub(crate) fn find_reversal(problem: &Problem, tour: &Tour) -> Option<(usize, usize, f64)> {
    let ids = tour.ids();
    let n = ids.len();
    if n < 3 {
        return None;
    }
    // the fixed last never moves
    let max_j = if tour.last().is_some() && !tour.is_closed() {
        n - 2
    } else {
        n - 1
    };

    // fwd[k]: weight of ids[0] → … → ids[k]; bwd[k]: same path walked backwards
    let mut fwd = vec![0.0; n];
    let mut bwd = vec![0.0; n];
    for k in 1..n {
        fwd[k] = fwd[k - 1] + problem.weight(ids[k - 1], ids[k]);
        bwd[k] = bwd[k - 1] + problem.weight(ids[k], ids[k - 1]);
    }

    let windows = problem.has_time_windows().then(|| Windows::new(problem, tour));

    for i in 0..n.saturating_sub(2) {
        let e11 = ids[i];
        let e12 = ids[i + 1];
        for j in ((i + 2)..=max_j).rev() {
            let e21 = ids[j];
            let e22 = tour.neighbor(e21);
            if e22 == e11 {
                continue;
            }
            let removed = problem.weight(e11, e12)
                + problem.weight(e21, e22)
                + (fwd[j] - fwd[i + 1]);
            let added = problem.weight(e11, e21)
                + problem.weight(e12, e22)
                + (bwd[j] - bwd[i + 1]);
            let gain = removed - added;
            if gain <= IMPROVEMENT_EPS {
                continue;
            }
            if let Some(windows) = &windows {
                if !windows.reversal_feasible(problem, ids, i, j) {
                    continue;
                }
            }
            return Some((i, j, gain));
        }
    }
    None
}

/// Reverses positions `i+1..=j` by rewiring successors edge by edge.
fn apply_reversal(tour: &mut Tour, i: usize, j: usize) {
    let segment: Vec<usize> = tour.ids()[i + 1..=j].to_vec();
    let e11 = tour.ids()[i];
    let e22 = tour.neighbor(segment[segment.len() - 1]);

    tour.replace_edge_from(e11, segment[segment.len() - 1]);
    for k in (1..segment.len()).rev() {
        tour.replace_edge_from(segment[k], segment[k - 1]);
    }
    tour.replace_edge_from(segment[0], e22);

    let rebuilt = tour.rebuild_index();
    debug_assert!(rebuilt, "2-opt reversal produced an invalid tour");
}

/// Current service start times, used to check reversals for lateness.
struct Windows {
    starts: Vec<f64>,
    arrivals: Vec<f64>,
}

impl Windows {
    fn new(problem: &Problem, tour: &Tour) -> Self {
        let schedule = Schedule::of(problem, tour);
        let arrivals = schedule.arrivals().to_vec();
        let starts = tour
            .ids()
            .iter()
            .zip(&arrivals)
            .map(|(&id, &arrival)| {
                problem
                    .time_window(id)
                    .map_or(arrival, |tw| tw.service_start(arrival))
            })
            .collect();
        Self { starts, arrivals }
    }

    /// Simulates `ids[i] → ids[j] → … → ids[i+1] → ids[j+1] → …`.
    ///
    /// Stops early once a later visit is reached no later than before; from
    /// there on the old schedule is unchanged or improved.
    fn reversal_feasible(&self, problem: &Problem, ids: &[usize], i: usize, j: usize) -> bool {
        let mut time = self.starts[i];
        let mut prev = ids[i];
        let reversed = (i + 1..=j).rev();
        let rest = j + 1..ids.len();
        for (k, downstream) in reversed.map(|k| (k, false)).chain(rest.map(|k| (k, true))) {
            let id = ids[k];
            time += problem.weight(prev, id);
            if downstream && time <= self.arrivals[k] {
                return true;
            }
            if let Some(tw) = problem.time_window(id) {
                if tw.is_violated(time) {
                    return false;
                }
                time = tw.service_start(time);
            }
            prev = id;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::WeightMatrix;
    use crate::evaluation::{CappedWeight, MinWeight, TimeWindowPenalty};
    use crate::models::TimeWindow;

    fn ring(n: usize) -> WeightMatrix {
        WeightMatrix::from_fn(n, |a, b| if (a + 1) % n == b { 1.0 } else { 10.0 })
    }

    fn line(n: usize) -> WeightMatrix {
        WeightMatrix::from_fn(n, |a, b| (a as f64 - b as f64).abs())
    }

    #[test]
    fn test_reversed_segment_restored() {
        let problem = Problem::closed(ring(5), 0).expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 3, 2, 1, 4]).expect("valid");
        let delta = TwoOpt.apply(&problem, &MinWeight, &mut tour);
        assert_eq!(delta, Some(36.0));
        assert_eq!(tour.ids(), &[0, 1, 2, 3, 4]);
        assert!(tour.is_consistent());
        assert!(TwoOpt.apply(&problem, &MinWeight, &mut tour).is_none());
    }

    #[test]
    fn test_each_move_strictly_decreases_weight() {
        let problem = Problem::closed(line(8), 0).expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 5, 2, 7, 1, 6, 3, 4]).expect("valid");
        let mut weight = MinWeight.calculate(&problem, &tour);
        let mut moves = 0;
        while let Some(delta) = TwoOpt.apply(&problem, &MinWeight, &mut tour) {
            let next = MinWeight.calculate(&problem, &tour);
            assert!(delta > 0.0);
            assert!((weight - delta - next).abs() < 1e-9);
            assert!(next < weight);
            weight = next;
            moves += 1;
            assert!(moves < 1000, "2-opt did not terminate");
        }
        assert_eq!(weight, 14.0);
    }

    #[test]
    fn test_open_tail_reversal() {
        let problem = Problem::open(line(4), 0).expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 3, 2, 1]).expect("valid");
        let delta = TwoOpt.apply(&problem, &MinWeight, &mut tour).expect("improves");
        assert_eq!(delta, 2.0);
        assert_eq!(tour.ids(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_fixed_last_stays() {
        let problem = Problem::fixed(line(5), 0, 2).expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 4, 1, 3, 2]).expect("valid");
        while TwoOpt.apply(&problem, &MinWeight, &mut tour).is_some() {}
        assert_eq!(tour.tail(), 2);
        assert_eq!(tour.first(), 0);
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_time_windows_block_infeasible_reversal() {
        // 0,2,1,3 -> 0,1,2,3 saves 9 but reaches 2 at time 2, past its deadline
        let wm = WeightMatrix::from_fn(4, |a, b| match (a, b) {
            _ if a == b => 0.0,
            (0, 2) | (2, 1) | (0, 1) | (1, 2) | (2, 3) => 1.0,
            (1, 3) => 10.0,
            _ => 20.0,
        });
        let windows = vec![None, None, TimeWindow::new(0.0, 1.5), None];
        let problem = Problem::open(wm.clone(), 0)
            .and_then(|p| p.with_time_windows(windows))
            .expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 2, 1, 3]).expect("valid");
        assert!(find_reversal(&problem, &tour).is_none());
        assert!(TwoOpt.apply(&problem, &MinWeight, &mut tour).is_none());

        let relaxed = Problem::open(wm, 0).expect("valid");
        assert_eq!(find_reversal(&relaxed, &tour), Some((0, 2, 9.0)));
    }

    #[test]
    fn test_capped_weight_delta() {
        let problem = Problem::closed(ring(5), 0)
            .and_then(|p| p.with_weight_cap(10.0))
            .expect("valid");
        let mut tour = Tour::from_sequence(&problem, &[0, 3, 2, 1, 4]).expect("valid");
        let delta = TwoOpt.apply(&problem, &CappedWeight, &mut tour);
        assert_eq!(delta, Some(f64::INFINITY));
        assert_eq!(CappedWeight.calculate(&problem, &tour), 5.0);
    }

    #[test]
    fn test_unsupported_objective() {
        assert!(!TwoOpt.supports(&TimeWindowPenalty::default()));
    }
}
