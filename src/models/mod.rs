//! Domain model types for tour problems.
//!
//! Provides the immutable [`Problem`] (weights, endpoints, visit scope, time
//! windows, turn penalties), the mutable [`Tour`] every algorithm edits, and
//! the [`Candidate`] ranked during genetic search.

mod candidate;
mod problem;
mod time_window;
mod tour;
mod turn;

pub use candidate::Candidate;
pub use problem::{Problem, NOT_SET};
pub use time_window::TimeWindow;
pub use tour::{Pairs, Shift, Tour, Triples};
pub use turn::TurnPenalties;
