//! Result of a search run.

use super::Tour;

/// Final state of a 2-opt, annealing, or hybrid run.
///
/// `tour` is the search's current tour when it stopped. It is not necessarily
/// the best one seen; read the [`BestSolution`](super::BestSolution) tracker
/// for that.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Tour held by the search when it stopped.
    pub tour: Tour,

    /// Length of `tour`.
    pub length: i64,

    /// Number of candidate moves evaluated.
    pub evaluations: usize,

    /// Number of moves applied (improving or not).
    pub accepted_moves: usize,

    /// Number of times the tracked best was improved.
    pub improvements: usize,

    /// Outer iterations: restarts for 2-opt, single moves for annealing,
    /// full sweeps for the hybrid search.
    pub iterations: usize,

    /// Temperature when the search stopped (0 for 2-opt).
    pub final_temperature: f64,

    /// Whether the run stopped because its cancel flag was raised.
    pub cancelled: bool,
}

impl SearchOutcome {
    pub(crate) fn new(tour: Tour, length: i64) -> Self {
        Self {
            tour,
            length,
            evaluations: 0,
            accepted_moves: 0,
            improvements: 0,
            iterations: 0,
            final_temperature: 0.0,
            cancelled: false,
        }
    }
}
