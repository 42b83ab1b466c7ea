//! Simulated annealing over 2-opt moves.
//!
//! Random segment reversals are evaluated in O(1) and accepted with the
//! Metropolis rule. The run ends after a fixed number of consecutive
//! rejections rather than at a target temperature; the temperature only
//! cools to a floor.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::{AnnealConfig, LINEAR_STEP_FRACTION};
pub use runner::{anneal, anneal_then_two_opt, anneal_with_cancel, metropolis_accept};
