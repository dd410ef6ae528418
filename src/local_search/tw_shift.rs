//! Violation-driven relocation for time-windowed tours.
//!
//! # Algorithm
//!
//! Works in four phases, each tried only after the previous one failed:
//!
//! 1. a late visit (not at the first movable position) moves earlier
//! 2. an on-time visit moves later
//! 3. an on-time visit moves earlier
//! 4. a late visit moves later
//!
//! Every candidate placement is scored by re-simulating the full schedule
//! (waiting at window openings) and summing `max(0, arrival - max)`. The
//! first placement that strictly lowers the total violation is chosen.
//! Travel weight is not part of the score, but [`Operator::apply`] skips
//! placements whose objective delta is not an improvement. The first visit and a fixed last
//! visit never move and are never targets.
//!
//! # Complexity
//!
//! O(n³) per call in the worst case: O(n²) placements, O(n) simulation each.

use crate::evaluation::{total_violation, Objective, ObjectiveKind, Schedule};
use crate::models::{Problem, Shift, Tour};

use super::operator::{Operator, IMPROVEMENT_EPS};

/// Search phase of [`TimeWindowShift`], in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftPhase {
    /// Late visit moves earlier.
    TryBackwardViolated,
    /// On-time visit moves later.
    TryForwardNonViolated,
    /// On-time visit moves earlier.
    TryBackwardNonViolated,
    /// Late visit moves later.
    TryForwardViolated,
    /// No phase found a move.
    Fail,
}

impl ShiftPhase {
    /// The phase tried after this one fails.
    pub fn next(self) -> Self {
        match self {
            Self::TryBackwardViolated => Self::TryForwardNonViolated,
            Self::TryForwardNonViolated => Self::TryBackwardNonViolated,
            Self::TryBackwardNonViolated => Self::TryForwardViolated,
            Self::TryForwardViolated | Self::Fail => Self::Fail,
        }
    }

    fn wants_violated(self) -> bool {
        matches!(self, Self::TryBackwardViolated | Self::TryForwardViolated)
    }

    fn is_backward(self) -> bool {
        matches!(self, Self::TryBackwardViolated | Self::TryBackwardNonViolated)
    }
}

/// Four-phase relocation that lowers total deadline violation.
///
/// Only serves the time-window objective.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::local_search::{ShiftPhase, TimeWindowShift};
/// use u_tour::models::{Problem, TimeWindow, Tour};
///
/// let wm = WeightMatrix::from_fn(4, |a, b| if a == b { 0.0 } else { 1.0 });
/// let windows = vec![None, None, None, TimeWindow::new(0.0, 1.0)];
/// let problem = Problem::open(wm, 0).unwrap().with_time_windows(windows).unwrap();
/// let tour = Tour::from_sequence(&problem, &[0, 1, 2, 3]).unwrap();
///
/// let (phase, shift) = TimeWindowShift.find_move(&problem, &tour).unwrap();
/// assert_eq!(phase, ShiftPhase::TryBackwardViolated);
/// assert_eq!((shift.customer, shift.new_before), (3, 1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeWindowShift;

impl TimeWindowShift {
    /// Finds the first violation-lowering relocation without applying it.
    pub fn find_move(&self, problem: &Problem, tour: &Tour) -> Option<(ShiftPhase, Shift)> {
        self.search(problem, tour, |_| true)
    }

    /// Walks the phases in order and returns the first violation-lowering
    /// relocation that `accept` also approves.
    fn search(
        &self,
        problem: &Problem,
        tour: &Tour,
        mut accept: impl FnMut(&Shift) -> bool,
    ) -> Option<(ShiftPhase, Shift)> {
        if !problem.has_time_windows() {
            return None;
        }
        let ids = tour.ids();
        let n = ids.len();
        let last_movable = if problem.fixed_last().is_some() {
            n.checked_sub(2)?
        } else {
            n.checked_sub(1)?
        };
        if last_movable < 2 {
            return None;
        }

        let schedule = Schedule::of(problem, tour);
        let base = schedule.total_violation();
        if base <= 0.0 {
            return None;
        }
        let mut scratch = Vec::with_capacity(n);
        let mut targets = Vec::with_capacity(n);

        let mut phase = ShiftPhase::TryBackwardViolated;
        while phase != ShiftPhase::Fail {
            for i in 1..=last_movable {
                if schedule.is_violated(i) != phase.wants_violated() {
                    continue;
                }
                if phase == ShiftPhase::TryBackwardViolated && i < 2 {
                    continue;
                }
                targets.clear();
                if phase.is_backward() {
                    targets.extend((1..i).rev());
                } else {
                    targets.extend(i + 1..=last_movable);
                }
                for &j in &targets {
                    scratch.clear();
                    scratch.extend_from_slice(ids);
                    let customer = scratch.remove(i);
                    scratch.insert(j, customer);
                    if total_violation(problem, &scratch) + IMPROVEMENT_EPS >= base {
                        continue;
                    }
                    let before = if j < i { ids[j - 1] } else { ids[j] };
                    if let Some(shift) = tour.preview_shift(customer, before) {
                        if accept(&shift) {
                            return Some((phase, shift));
                        }
                    }
                }
            }
            phase = phase.next();
        }
        None
    }
}

impl Operator for TimeWindowShift {
    fn name(&self) -> &str {
        "tw-shift"
    }

    fn supports(&self, objective: &dyn Objective) -> bool {
        objective.kind() == ObjectiveKind::TimeWindow
    }

    /// Only commits relocations that also lower the objective's fitness, so
    /// travel weight added by a move can never outweigh the lateness it saves.
    fn apply(&self, problem: &Problem, objective: &dyn Objective, tour: &mut Tour) -> Option<f64> {
        let current: &Tour = tour;
        let (_, shift) = self.search(problem, current, |shift| {
            objective
                .hypothetical_shift_after_delta(problem, current, shift.customer, shift.new_before)
                .is_some_and(|delta| delta > IMPROVEMENT_EPS)
        })?;
        objective.shift_after_delta(problem, tour, shift.customer, shift.new_before)
    }
}
