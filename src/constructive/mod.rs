//! Constructive heuristics for building an initial tour.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor, in place, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor;
