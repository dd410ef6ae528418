//! Fitness functions over tours.
//!
//! An [`Objective`] turns a tour into a fitness value (lower is better) and
//! reports the effect of a single relocation as a delta, where a positive
//! delta means the fitness went down by that amount.
//!
//! | Objective             | Fitness                                   | Shift delta    |
//! |-----------------------|-------------------------------------------|----------------|
//! | [`MinWeight`]         | sum of edge weights                       | six edges, O(1) |
//! | [`CappedWeight`]      | weight, or [`WORST_FITNESS`] above the cap | re-evaluation  |
//! | [`TimeWindowPenalty`] | weight + penalty × total lateness         | re-simulation  |
//! | [`TurnPenalty`]       | weight + turn penalties over triples      | re-evaluation  |

use crate::models::{Problem, Shift, Tour};

use super::schedule::total_violation;

/// Fitness assigned to tours that break a hard constraint.
pub const WORST_FITNESS: f64 = f64::INFINITY;

/// Capability tag used by operators to decide whether they can serve an
/// objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectiveKind {
    /// Plain weight minimization.
    MinWeight,
    /// Weight minimization under a hard cap.
    CappedWeight,
    /// Lateness repair with weight as a tie breaker.
    TimeWindow,
    /// Weight plus direction-dependent turn penalties.
    TurnPenalty,
}

/// A fitness function over `(Problem, Tour)`.
///
/// Only [`calculate_with_weight`](Objective::calculate_with_weight) is
/// required; the delta methods default to re-evaluating a clone and should be
/// overridden where a local formula exists.
pub trait Objective: Send + Sync {
    /// Short diagnostic label.
    fn name(&self) -> &str;

    /// Capability tag.
    fn kind(&self) -> ObjectiveKind;

    /// Travel weight, ignoring any feasibility bookkeeping.
    fn calculate_weight(&self, problem: &Problem, tour: &Tour) -> f64 {
        tour_weight(problem, tour)
    }

    /// Fitness when the weight is already known.
    fn calculate_with_weight(&self, problem: &Problem, tour: &Tour, weight: f64) -> f64;

    /// Fitness of `tour`.
    fn calculate(&self, problem: &Problem, tour: &Tour) -> f64 {
        let weight = self.calculate_weight(problem, tour);
        self.calculate_with_weight(problem, tour, weight)
    }

    /// Fitness delta of `shift_after(customer, before)` without performing it.
    ///
    /// Returns `None` when the move is invalid.
    fn hypothetical_shift_after_delta(
        &self,
        problem: &Problem,
        tour: &Tour,
        customer: usize,
        before: usize,
    ) -> Option<f64> {
        let mut probe = tour.clone();
        probe.shift_after(customer, before)?;
        Some(fitness_delta(
            self.calculate(problem, tour),
            self.calculate(problem, &probe),
        ))
    }

    /// Performs `shift_after(customer, before)` and returns its fitness delta.
    ///
    /// Returns `None` and leaves the tour untouched when the move is invalid.
    fn shift_after_delta(
        &self,
        problem: &Problem,
        tour: &mut Tour,
        customer: usize,
        before: usize,
    ) -> Option<f64> {
        tour.preview_shift(customer, before)?;
        let old = self.calculate(problem, tour);
        tour.shift_after(customer, before)?;
        Some(fitness_delta(old, self.calculate(problem, tour)))
    }
}

/// `old - new`, treating two equal (possibly infinite) values as no change.
pub fn fitness_delta(old: f64, new: f64) -> f64 {
    if old == new {
        0.0
    } else {
        old - new
    }
}

/// Sum of edge weights over [`Tour::pairs`].
pub fn tour_weight(problem: &Problem, tour: &Tour) -> f64 {
    tour.pairs().map(|(from, to)| problem.weight(from, to)).sum()
}

/// Weight gain of a relocation, from the six edges it touches.
///
/// Removed: `old_before → customer`, `customer → old_after`,
/// `new_before → new_after`. Added: `old_before → old_after`,
/// `new_before → customer`, `customer → new_after`. Edges with a
/// [`NOT_SET`](crate::models::NOT_SET) end weigh nothing.
pub fn shift_weight_delta(problem: &Problem, shift: &Shift) -> f64 {
    let w = |a, b| problem.weight(a, b);
    let removed = w(shift.old_before, shift.customer)
        + w(shift.customer, shift.old_after)
        + w(shift.new_before, shift.new_after);
    let added = w(shift.old_before, shift.old_after)
        + w(shift.new_before, shift.customer)
        + w(shift.customer, shift.new_after);
    removed - added
}

/// Minimizes total travel weight.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::evaluation::{MinWeight, Objective};
/// use u_tour::models::{Problem, Tour};
///
/// let wm = WeightMatrix::from_fn(4, |a, b| (a as f64 - b as f64).abs());
/// let problem = Problem::closed(wm, 0).unwrap();
/// let mut tour = Tour::from_sequence(&problem, &[0, 2, 1, 3]).unwrap();
/// assert_eq!(MinWeight.calculate(&problem, &tour), 8.0);
///
/// let delta = MinWeight.shift_after_delta(&problem, &mut tour, 1, 0).unwrap();
/// assert_eq!(delta, 2.0);
/// assert_eq!(MinWeight.calculate(&problem, &tour), 6.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MinWeight;

impl Objective for MinWeight {
    fn name(&self) -> &str {
        "min-weight"
    }

    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::MinWeight
    }

    fn calculate_with_weight(&self, _problem: &Problem, _tour: &Tour, weight: f64) -> f64 {
        weight
    }

    fn hypothetical_shift_after_delta(
        &self,
        problem: &Problem,
        tour: &Tour,
        customer: usize,
        before: usize,
    ) -> Option<f64> {
        let shift = tour.preview_shift(customer, before)?;
        Some(shift_weight_delta(problem, &shift))
    }

    fn shift_after_delta(
        &self,
        problem: &Problem,
        tour: &mut Tour,
        customer: usize,
        before: usize,
    ) -> Option<f64> {
        let shift = tour.shift_after(customer, before)?;
        Some(shift_weight_delta(problem, &shift))
    }
}

/// Minimizes weight; tours above the problem's weight cap score
/// [`WORST_FITNESS`].
///
/// Without a cap on the problem this behaves like [`MinWeight`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CappedWeight;

impl Objective for CappedWeight {
    fn name(&self) -> &str {
        "capped-weight"
    }

    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::CappedWeight
    }

    fn calculate_with_weight(&self, problem: &Problem, _tour: &Tour, weight: f64) -> f64 {
        match problem.weight_cap() {
            Some(cap) if weight > cap => WORST_FITNESS,
            _ => weight,
        }
    }
}

/// Penalizes lateness on top of travel weight.
///
/// `fitness = weight + penalty × Σ max(0, arrival − window.max)`.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindowPenalty {
    penalty: f64,
}

impl TimeWindowPenalty {
    /// Default weight of one unit of lateness.
    pub const DEFAULT_PENALTY: f64 = 1_000.0;

    /// Creates the objective with a custom lateness weight.
    pub fn new(penalty: f64) -> Self {
        Self { penalty }
    }

    /// Weight of one unit of lateness.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}

impl Default for TimeWindowPenalty {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PENALTY)
    }
}

impl Objective for TimeWindowPenalty {
    fn name(&self) -> &str {
        "time-window-penalty"
    }

    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::TimeWindow
    }

    fn calculate_with_weight(&self, problem: &Problem, tour: &Tour, weight: f64) -> f64 {
        weight + self.penalty * total_violation(problem, tour.ids())
    }
}

/// Adds the problem's turn penalties over every [`Tour::triples`] entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnPenalty;

impl Objective for TurnPenalty {
    fn name(&self) -> &str {
        "turn-penalty"
    }

    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::TurnPenalty
    }

    fn calculate_with_weight(&self, problem: &Problem, tour: &Tour, weight: f64) -> f64 {
        let turns: f64 = tour
            .triples()
            .map(|(prev, cur, next)| problem.turn_penalty(prev, cur, next))
            .sum();
        weight + turns
    }
}
