//! Constructive heuristics for building initial tours.
//!
//! - [`RandomGenerator`] — Uniform random permutation, O(n)
//! - [`NearestNeighborGenerator`] — Greedy nearest neighbor, randomized among the k nearest, O(n² log n)
//! - [`ImprovedGenerator`] — Any generator followed by local search
//! - [`BruteForce`] — Exact enumeration for tiny problems, O(m!)
//! - [`LocalSearchSolver`] — One construction plus local search

mod brute_force;
mod generator;
mod improved;
mod nearest_neighbor;

pub use brute_force::{BruteForce, BRUTE_FORCE_LIMIT};
pub use generator::{Generator, RandomGenerator};
pub use improved::{ImprovedGenerator, LocalSearchSolver};
pub use nearest_neighbor::NearestNeighborGenerator;

pub(crate) use brute_force::enumerate;
