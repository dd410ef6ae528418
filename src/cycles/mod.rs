//! Cycle decomposition over integer successor arrays.
//!
//! - [`AsymmetricCycles`] — sub-tours of a successor array
//! - [`AsymmetricAlternatingCycles`] — AB-cycles between two parents, used by
//!   edge-assembly crossover

mod alternating;
mod asymmetric;

pub use alternating::AsymmetricAlternatingCycles;
pub use asymmetric::AsymmetricCycles;
