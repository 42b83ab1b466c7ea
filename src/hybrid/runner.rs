//! Sweep loop for the hybrid search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use rand::Rng;
use u_numflow::random::create_rng;

use super::config::HybridConfig;
use crate::anneal::metropolis_accept;
use crate::distance::DistanceMatrix;
use crate::error::TspResult;
use crate::evaluation::{apply_swap, check_search_input, delta_length, tour_length};
use crate::models::{BestSolution, CityId, SearchOutcome};

/// Runs the hybrid search from `tour`.
///
/// Each sweep visits every 2-opt move `(i, j)`, `1 <= i <= j < n`, in order
/// and filters it through the Metropolis rule at the current temperature.
/// Accepted moves are applied and the sweep continues. An accepted move that
/// beats the tracked best updates `best` and clears the stagnation count.
///
/// After a sweep:
/// - improved the best: quench back to `base_temperature`
/// - otherwise the stagnation count grows; a sweep that still accepted moves
///   cools back to `base_temperature`, and a sweep that accepted nothing
///   boosts the temperature (see [`HybridConfig::boost`])
///
/// Boosts therefore grow with the stagnation count: each one is followed by
/// cooling until the tour settles, and the next boost starts hotter.
///
/// The run ends once `max_stagnant_sweeps` sweeps in a row failed to improve
/// the best.
///
/// # Errors
///
/// - [`TspError::Config`](crate::error::TspError::Config) for an invalid config
/// - [`TspError::InsufficientInput`](crate::error::TspError::InsufficientInput)
///   for tours of fewer than two cities
/// - [`TspError::InvariantViolation`](crate::error::TspError::InvariantViolation)
///   if `tour` or `length` is inconsistent with the matrix
///
/// # Examples
///
/// ```
/// use u_tsp::models::{BestSolution, City};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::nearest_neighbor;
/// use u_tsp::hybrid::{hybrid, HybridConfig};
///
/// let cities: Vec<City> = (0..15)
///     .map(|k| City::new(k, (k as i32 * 29) % 40, (k as i32 * 13) % 31))
///     .collect();
/// let dm = DistanceMatrix::build(&cities).unwrap();
/// let (tour, length) = nearest_neighbor(dm.ids(), &dm).unwrap();
/// let best = BestSolution::seeded(&tour, length);
///
/// let config = HybridConfig::default().with_max_stagnant_sweeps(30).with_seed(9);
/// hybrid(&tour, length, &dm, &best, &config).unwrap();
/// assert!(best.length() <= length);
/// ```
pub fn hybrid(
    tour: &[CityId],
    length: i64,
    distances: &DistanceMatrix,
    best: &BestSolution,
    config: &HybridConfig,
) -> TspResult<SearchOutcome> {
    hybrid_with_cancel(tour, length, distances, best, config, None)
}

/// Runs [`hybrid`] with an optional cancellation flag, checked before each
/// sweep.
pub fn hybrid_with_cancel(
    tour: &[CityId],
    length: i64,
    distances: &DistanceMatrix,
    best: &BestSolution,
    config: &HybridConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> TspResult<SearchOutcome> {
    config.validate()?;
    check_search_input(tour, length, distances)?;

    let mut rng = match config.seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    };

    let mut outcome = SearchOutcome::new(tour.to_vec(), length);
    let mut best_length = best.length();
    let mut temperature = config.base_temperature;
    let mut stagnation = 0usize;
    debug!("hybrid: {} cities, start length {}", tour.len(), length);

    while stagnation < config.max_stagnant_sweeps {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                outcome.cancelled = true;
                break;
            }
        }
        if config.max_sweeps > 0 && outcome.iterations >= config.max_sweeps {
            break;
        }
        outcome.iterations += 1;

        let pass = sweep(&mut outcome, distances, temperature, &mut rng, best, &mut best_length);
        if pass.improved {
            stagnation = 0;
            temperature = config.base_temperature;
            trace!("hybrid: sweep {} improved best to {}", outcome.iterations, best_length);
        } else {
            stagnation += 1;
            temperature = if pass.accepted {
                config.base_temperature
            } else {
                config.boost(stagnation)
            };
        }
    }

    outcome.final_temperature = temperature;
    debug!(
        "hybrid: done after {} sweeps, length {}, best {}",
        outcome.iterations, outcome.length, best_length
    );
    Ok(outcome)
}

struct Sweep {
    accepted: bool,
    improved: bool,
}

/// One full pass over all moves. Publishes every new best to the tracker as
/// soon as it is reached.
fn sweep<R: Rng>(
    outcome: &mut SearchOutcome,
    distances: &DistanceMatrix,
    temperature: f64,
    rng: &mut R,
    best: &BestSolution,
    best_length: &mut i64,
) -> Sweep {
    let n = outcome.tour.len();
    let mut result = Sweep {
        accepted: false,
        improved: false,
    };

    for i in 1..n {
        for j in i..n {
            outcome.evaluations += 1;
            let candidate = delta_length(outcome.length, i, j, &outcome.tour, distances);
            if !metropolis_accept(candidate, outcome.length, temperature, rng) {
                continue;
            }
            apply_swap(i, j, &mut outcome.tour);
            outcome.length = candidate;
            outcome.accepted_moves += 1;
            result.accepted = true;
            debug_assert_eq!(outcome.length, tour_length(&outcome.tour, distances));

            if outcome.length < *best_length {
                *best_length = outcome.length;
                best.update(outcome.length, &outcome.tour);
                outcome.improvements += 1;
                result.improved = true;
            }
        }
    }
    result
}
