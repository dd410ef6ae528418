//! Error types for problem construction and configuration.
//!
//! Search operators never fail with an error: an impossible move is reported
//! as `None`. Errors only arise while building a [`Problem`](crate::models::Problem)
//! or validating a configuration.

use thiserror::Error;

/// Reasons a [`Problem`](crate::models::Problem) cannot be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProblemError {
    /// The weight matrix has no rows.
    #[error("weight matrix is empty")]
    EmptyMatrix,
    /// The flat weight data does not describe a square matrix.
    #[error("weight data of length {len} is not a {size}x{size} matrix")]
    NotSquare { size: usize, len: usize },
    /// A weight is NaN.
    #[error("weight from {from} to {to} is NaN")]
    NanWeight { from: usize, to: usize },
    /// The first visit lies outside the matrix.
    #[error("first visit {first} is outside a problem of size {size}")]
    FirstOutOfRange { first: usize, size: usize },
    /// The fixed last visit lies outside the matrix.
    #[error("last visit {last} is outside a problem of size {size}")]
    LastOutOfRange { last: usize, size: usize },
    /// A restricted visit id lies outside the matrix.
    #[error("visit {id} is outside a problem of size {size}")]
    VisitOutOfRange { id: usize, size: usize },
    /// The restricted visit set omits the first or the fixed last visit.
    #[error("visit set does not contain endpoint {id}")]
    MissingEndpoint { id: usize },
    /// The time-window table does not have one slot per matrix row.
    #[error("expected {expected} time-window slots, got {actual}")]
    TimeWindowCount { expected: usize, actual: usize },
    /// A hard weight cap that is NaN or negative.
    #[error("weight cap {cap} must be a non-negative number")]
    InvalidWeightCap { cap: f64 },
}

/// Reasons a search configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The population must hold at least two individuals.
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    /// Elitism would keep the whole population and leave no slot for offspring.
    #[error("elite band of {elite} covers the whole population of {population}")]
    EliteCoversPopulation { elite: usize, population: usize },
    /// The tournament acceptance probability must lie in `(0, 1]`.
    #[error("tournament probability {0} must be in (0, 1]")]
    TournamentProbability(f64),
    /// EAX needs at least one offspring attempt.
    #[error("max_offspring must be at least 1")]
    NoOffspring,
}
