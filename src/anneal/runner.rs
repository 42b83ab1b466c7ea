//! Annealing loop over random 2-opt moves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use rand::Rng;
use u_numflow::random::create_rng;

use super::config::AnnealConfig;
use crate::distance::DistanceMatrix;
use crate::error::TspResult;
use crate::evaluation::{apply_swap, check_search_input, delta_length, tour_length};
use crate::local_search::two_opt_with_cancel;
use crate::models::{BestSolution, CityId, SearchOutcome};

/// Metropolis acceptance for moving from `current` to `candidate` length.
///
/// Equal lengths are rejected. Otherwise one uniform draw `u` in `[0, 1)` is
/// taken and the move is accepted iff `u < exp((current - candidate) / T)`,
/// which always holds for a shorter candidate.
pub fn metropolis_accept<R: Rng>(candidate: i64, current: i64, temperature: f64, rng: &mut R) -> bool {
    if candidate == current {
        return false;
    }
    let probability = ((current - candidate) as f64 / temperature).exp();
    rng.random_range(0.0..1.0) < probability
}

/// Runs simulated annealing from `tour`.
///
/// Each iteration draws `i` uniformly in `[1, n-1]` and `j` uniformly in
/// `[i, n-1]`, evaluates the 2-opt move in O(1), and applies it if the
/// Metropolis rule accepts. Accepted moves reset the rejection counter and,
/// when they beat the tracked best, update `best`. The temperature starts at
/// `average_distance × initial_temperature_scale` and cools after every
/// iteration. The run ends after `max_consecutive_rejections` rejections in a
/// row.
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
/// use u_tsp::anneal::{anneal, AnnealConfig};
///
/// let cities: Vec<City> = (0..20)
///     .map(|k| City::new(k, (k as i32 * 37) % 50, (k as i32 * 11) % 43))
///     .collect();
/// let dm = DistanceMatrix::build(&cities).unwrap();
/// let (tour, length) = nearest_neighbor(dm.ids(), &dm).unwrap();
/// let best = BestSolution::seeded(&tour, length);
///
/// let config = AnnealConfig::default()
///     .with_max_consecutive_rejections(1_000)
///     .with_seed(42);
/// anneal(&tour, length, &dm, &best, &config).unwrap();
/// assert!(best.length() <= length);
/// ```
pub fn anneal(
    tour: &[CityId],
    length: i64,
    distances: &DistanceMatrix,
    best: &BestSolution,
    config: &AnnealConfig,
) -> TspResult<SearchOutcome> {
    anneal_with_cancel(tour, length, distances, best, config, None)
}

/// Runs [`anneal`] with an optional cancellation flag, checked before every
/// iteration.
pub fn anneal_with_cancel(
    tour: &[CityId],
    length: i64,
    distances: &DistanceMatrix,
    best: &BestSolution,
    config: &AnnealConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> TspResult<SearchOutcome> {
    config.validate()?;
    check_search_input(tour, length, distances)?;

    let mut rng = match config.seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    };

    let n = tour.len();
    let mut outcome = SearchOutcome::new(tour.to_vec(), length);
    let mut best_length = best.length();

    let initial = config.initial_temperature(distances.average_distance());
    let mut temperature = initial;
    let mut rejections = 0usize;
    debug!(
        "anneal: {} cities, start length {}, initial temperature {:.4}",
        n, length, initial
    );

    while rejections < config.max_consecutive_rejections {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                outcome.cancelled = true;
                break;
            }
        }
        if config.max_iterations > 0 && outcome.iterations >= config.max_iterations {
            break;
        }
        outcome.iterations += 1;
        outcome.evaluations += 1;

        let i = rng.random_range(1..n);
        let j = rng.random_range(i..n);
        let candidate = delta_length(outcome.length, i, j, &outcome.tour, distances);

        if metropolis_accept(candidate, outcome.length, temperature, &mut rng) {
            if candidate > outcome.length {
                trace!(
                    "anneal: T {:.4}, uphill {} -> {}",
                    temperature,
                    outcome.length,
                    candidate
                );
            }
            apply_swap(i, j, &mut outcome.tour);
            outcome.length = candidate;
            outcome.accepted_moves += 1;
            debug_assert_eq!(outcome.length, tour_length(&outcome.tour, distances));

            if outcome.length < best_length {
                best_length = outcome.length;
                best.update(best_length, &outcome.tour);
                outcome.improvements += 1;
            }
            rejections = 0;
        } else {
            rejections += 1;
        }

        temperature = config.cool(temperature, initial);
    }

    outcome.final_temperature = temperature;
    debug!(
        "anneal: done after {} iterations ({} accepted), length {}, best {}",
        outcome.iterations, outcome.accepted_moves, outcome.length, best_length
    );
    Ok(outcome)
}

/// Anneals, then restarts from the tracked best tour and descends with 2-opt.
///
/// Counters in the returned outcome cover both phases; `tour` and `length`
/// are the 2-opt result.
pub fn anneal_then_two_opt(
    tour: &[CityId],
    length: i64,
    distances: &DistanceMatrix,
    best: &BestSolution,
    config: &AnnealConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> TspResult<SearchOutcome> {
    let annealed = anneal_with_cancel(tour, length, distances, best, config, cancel.clone())?;
    let start = best.snapshot();
    let mut outcome = two_opt_with_cancel(&start.tour, start.length, distances, best, cancel)?;

    outcome.evaluations += annealed.evaluations;
    outcome.accepted_moves += annealed.accepted_moves;
    outcome.improvements += annealed.improvements;
    outcome.iterations += annealed.iterations;
    outcome.final_temperature = annealed.final_temperature;
    outcome.cancelled |= annealed.cancelled;
    Ok(outcome)
}
