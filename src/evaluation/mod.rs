//! Tour evaluation: O(1) 2-opt delta, segment reversal, full recomputation,
//! and permutation checks.

mod delta;

pub(crate) use delta::check_search_input;
pub use delta::{apply_swap, delta_length, tour_length, validate_tour, verify_length};
