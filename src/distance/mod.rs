//! Distance matrices.
//!
//! Provides a dense distance matrix and the Euclidean materialization used
//! before compression.

mod matrix;

pub use matrix::DistanceMatrix;
