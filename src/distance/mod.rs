//! Distance matrix.
//!
//! Precomputes rounded Euclidean distances between every pair of cities.

mod matrix;

pub use matrix::{DistanceMatrix, MAX_CITY_ID};
