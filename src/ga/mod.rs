//! Genetic algorithm components for tour optimization.
//!
//! - [`GaConfig`] / [`EaxConfig`] — Search and crossover parameters
//! - [`tournament`] — Probabilistic tournament selection
//! - [`mutate`] — Random shift or segment reversal
//! - [`EaxCrossover`] — Edge-assembly crossover (Nagata & Kobayashi, 2013)
//! - [`GaStrategy`] — Generational loop with elitism and stagnation control

mod config;
mod eax;
mod mutation;
mod runner;
mod selection;

pub use config::{EaxConfig, EaxStrategy, GaConfig, MULTIPLE_RANDOM_PROBABILITY};
pub use eax::EaxCrossover;
pub use mutation::mutate;
pub use runner::{GaReport, GaStrategy, MIN_HEURISTIC_SIZE};
pub use selection::tournament;
