//! Travel-cost matrices.
//!
//! Provides a dense, possibly asymmetric, weight matrix.

mod matrix;

pub use matrix::WeightMatrix;
