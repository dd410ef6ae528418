//! Fitness evaluation.
//!
//! - [`Objective`] — pluggable fitness with incremental relocation deltas
//! - [`Schedule`] — arrival-time simulation with window waiting and lateness

mod objective;
mod schedule;

pub use objective::{
    fitness_delta, shift_weight_delta, tour_weight, CappedWeight, MinWeight, Objective,
    ObjectiveKind, TimeWindowPenalty, TurnPenalty, WORST_FITNESS,
};
pub use schedule::{total_violation, Schedule};
