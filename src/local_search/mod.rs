//! Local search operators for improving a single tour.
//!
//! - [`TwoOpt`] — segment reversal, weight objectives only
//! - [`OneShift`] — single-visit relocation, any objective
//! - [`TimeWindowShift`] — four-phase relocation that lowers deadline violation
//!
//! [`improve`] chains operators until none of them finds a move.

mod one_shift;
mod operator;
mod tw_shift;
mod two_opt;

pub use one_shift::OneShift;
pub use operator::{improve, Operator, MAX_MOVES};
pub use tw_shift::{ShiftPhase, TimeWindowShift};
pub use two_opt::TwoOpt;

pub(crate) use operator::IMPROVEMENT_EPS;
