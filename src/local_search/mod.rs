//! Local search for improving a tour.
//!
//! - [`two_opt`] — First-improvement 2-opt descent to a local optimum

mod two_opt;

pub use two_opt::{two_opt, two_opt_with_cancel};
