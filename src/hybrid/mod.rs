//! Hybrid search: deterministic 2-opt sweeps filtered through Metropolis
//! acceptance, with a quench after progress and a growing heat boost while
//! the search stagnates.
//!
//! At the base temperature the sweeps behave like 2-opt descent. When a sweep
//! accepts nothing, the temperature is raised in proportion to how close the
//! run is to giving up, letting the next sweeps climb out of the current
//! local optimum. Any new best quenches the temperature back to the base.

mod config;
mod runner;

pub use config::HybridConfig;
pub use runner::{hybrid, hybrid_with_cancel};
