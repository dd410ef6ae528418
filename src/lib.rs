//! # u-tour
//!
//! Tour optimization library for single-vehicle routing: closed, open and
//! fixed-endpoint TSP variants, optionally with time windows, turn penalties
//! or a hard weight cap.
//!
//! ## Modules
//!
//! - [`models`] — Problem definition, mutable tour, ranked candidates
//! - [`distance`] — Weight matrix and nearest-neighbor lists
//! - [`evaluation`] — Objectives with incremental deltas, schedule simulation
//! - [`local_search`] — Local search operators (2-opt, 1-shift, time-window shift)
//! - [`cycles`] — Sub-tour and AB-cycle decomposition
//! - [`constructive`] — Initial tour generators and exact search for tiny problems
//! - [`ga`] — Genetic algorithm with edge-assembly crossover
//! - [`solver`] — Solver trait, cancellation and champion notification
//! - [`random`] — Seeded random streams
//! - [`error`] — Construction and configuration errors

pub mod constructive;
pub mod cycles;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod local_search;
pub mod models;
pub mod random;
pub mod solver;
