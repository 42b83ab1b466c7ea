//! 2-opt descent over a closed tour.
//!
//! # Algorithm
//!
//! Scan moves `(i, j)` with `1 <= i <= j < n` in lexicographic order. The
//! first move whose [`delta_length`] is strictly shorter than the current
//! length is applied, and the scan restarts at `i = 1` (first-improvement).
//! The search stops after a full scan finds nothing, i.e. at a 2-opt local
//! optimum. Worsening or neutral moves are never taken.
//!
//! # Complexity
//!
//! O(n²) per scan, each move evaluated in O(1).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};

use crate::distance::DistanceMatrix;
use crate::error::TspResult;
use crate::evaluation::{apply_swap, check_search_input, delta_length, tour_length};
use crate::models::{BestSolution, CityId, SearchOutcome};

/// Improves `tour` with 2-opt until no improving move remains.
///
/// `length` must be the length of `tour`. Whenever the running length drops
/// below the tracker's best, the tracker is updated, so its length never
/// increases during the run.
///
/// # Errors
///
/// - [`TspError::InsufficientInput`](crate::error::TspError::InsufficientInput)
///   for tours of fewer than two cities
/// - [`TspError::InvariantViolation`](crate::error::TspError::InvariantViolation)
///   if `tour` is not a permutation of the matrix's cities or `length` is wrong
///
/// # Examples
///
/// ```
/// use u_tsp::models::{BestSolution, City};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::two_opt;
///
/// let cities = vec![
///     City::new(0, 0, 0),
///     City::new(1, 0, 10),
///     City::new(2, 10, 10),
///     City::new(3, 10, 0),
/// ];
/// let dm = DistanceMatrix::build(&cities).unwrap();
///
/// // 0→2 and 1→3 cross
/// let tour = vec![0, 2, 1, 3];
/// let best = BestSolution::seeded(&tour, 48);
///
/// let outcome = two_opt(&tour, 48, &dm, &best).unwrap();
/// assert_eq!(outcome.tour, vec![0, 1, 2, 3]);
/// assert_eq!(best.length(), 40);
/// ```
pub fn two_opt(
    tour: &[CityId],
    length: i64,
    distances: &DistanceMatrix,
    best: &BestSolution,
) -> TspResult<SearchOutcome> {
    two_opt_with_cancel(tour, length, distances, best, None)
}

/// Runs [`two_opt`] with an optional cancellation flag, checked before each
/// scan. A cancelled run returns the tour reached so far.
pub fn two_opt_with_cancel(
    tour: &[CityId],
    length: i64,
    distances: &DistanceMatrix,
    best: &BestSolution,
    cancel: Option<Arc<AtomicBool>>,
) -> TspResult<SearchOutcome> {
    check_search_input(tour, length, distances)?;

    let n = tour.len();
    let mut outcome = SearchOutcome::new(tour.to_vec(), length);
    let mut best_length = best.length();
    debug!("2-opt: {} cities, start length {}", n, length);

    loop {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                outcome.cancelled = true;
                break;
            }
        }
        outcome.iterations += 1;

        match first_improvement(&mut outcome, distances) {
            Some((i, j)) => {
                trace!("2-opt: move ({}, {}) -> length {}", i, j, outcome.length);
                if outcome.length < best_length {
                    best_length = outcome.length;
                    best.update(best_length, &outcome.tour);
                    outcome.improvements += 1;
                }
            }
            None => break,
        }
    }

    debug!(
        "2-opt: done after {} scans, length {}",
        outcome.iterations, outcome.length
    );
    Ok(outcome)
}

/// Applies the first strictly improving move and returns it, or `None` at a
/// local optimum.
fn first_improvement(outcome: &mut SearchOutcome, distances: &DistanceMatrix) -> Option<(usize, usize)> {
    let n = outcome.tour.len();
    for i in 1..n {
        for j in i..n {
            outcome.evaluations += 1;
            let candidate = delta_length(outcome.length, i, j, &outcome.tour, distances);
            if candidate < outcome.length {
                apply_swap(i, j, &mut outcome.tour);
                outcome.length = candidate;
                outcome.accepted_moves += 1;
                debug_assert_eq!(outcome.length, tour_length(&outcome.tour, distances));
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor;
    use crate::error::TspError;
    use crate::evaluation::validate_tour;
    use crate::models::City;
    use std::thread;

    fn square10() -> DistanceMatrix {
        DistanceMatrix::build(&[
            City::new(0, 0, 0),
            City::new(1, 0, 10),
            City::new(2, 10, 10),
            City::new(3, 10, 0),
        ])
        .expect("valid")
    }

    fn scattered(n: u32) -> DistanceMatrix {
        let cities: Vec<City> = (0..n)
            .map(|k| {
                let k = k as i32;
                City::new(k as u32, (k * 7919) % 1009, (k * 104_729) % 997)
            })
            .collect();
        DistanceMatrix::build(&cities).expect("valid")
    }

    /// A 2-opt local optimum has no strictly improving move.
    fn is_local_optimum(tour: &[CityId], length: i64, dm: &DistanceMatrix) -> bool {
        let n = tour.len();
        (1..n).all(|i| (i..n).all(|j| delta_length(length, i, j, tour, dm) >= length))
    }

    #[test]
    fn test_fixes_crossing() {
        let dm = square10();
        let tour = vec![0, 2, 1, 3];
        let best = BestSolution::seeded(&tour, 48);

        let outcome = two_opt(&tour, 48, &dm, &best).expect("valid");
        assert_eq!(outcome.tour, vec![0, 1, 2, 3]);
        assert_eq!(outcome.length, 40);
        assert_eq!(outcome.accepted_moves, 1);
        assert_eq!(outcome.improvements, 1);
        assert_eq!(best.snapshot().length, 40);
        assert_eq!(best.snapshot().tour, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_already_optimal() {
        let dm = square10();
        let tour = vec![0, 1, 2, 3];
        let best = BestSolution::seeded(&tour, 40);
        let outcome = two_opt(&tour, 40, &dm, &best).expect("valid");
        assert_eq!(outcome.tour, tour);
        assert_eq!(outcome.accepted_moves, 0);
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn test_two_cities_terminates() {
        let dm = DistanceMatrix::build(&[City::new(0, 0, 0), City::new(1, 3, 4)]).expect("valid");
        let best = BestSolution::seeded(&[0, 1], 10);
        let outcome = two_opt(&[0, 1], 10, &dm, &best).expect("valid");
        assert_eq!(outcome.length, 10);
        assert_eq!(outcome.evaluations, 1);
        assert_eq!(best.length(), 10);
    }

    #[test]
    fn test_reaches_local_optimum() {
        let dm = scattered(60);
        let (tour, length) = nearest_neighbor(dm.ids(), &dm).expect("valid");
        let best = BestSolution::seeded(&tour, length);

        let outcome = two_opt(&tour, length, &dm, &best).expect("valid");
        assert!(validate_tour(&outcome.tour, &dm).is_ok());
        assert_eq!(outcome.length, tour_length(&outcome.tour, &dm));
        assert!(outcome.length <= length);
        assert!(is_local_optimum(&outcome.tour, outcome.length, &dm));
        assert_eq!(best.length(), outcome.length);
        assert_eq!(best.tour(), outcome.tour);
    }

    #[test]
    fn test_worse_start_never_raises_tracker() {
        let dm = scattered(30);
        let (nn_tour, nn_length) = nearest_neighbor(dm.ids(), &dm).expect("valid");
        let best = BestSolution::seeded(&nn_tour, nn_length);

        // Identity order is much worse than nearest neighbor
        let start: Vec<CityId> = dm.ids().to_vec();
        let start_length = tour_length(&start, &dm);
        assert!(start_length > nn_length);

        two_opt(&start, start_length, &dm, &best).expect("valid");
        assert!(best.length() <= nn_length);
        assert_eq!(best.length(), tour_length(&best.tour(), &dm));
    }

    #[test]
    fn test_tracker_monotonic_under_observer() {
        let dm = scattered(150);
        let start: Vec<CityId> = dm.ids().to_vec();
        let start_length = tour_length(&start, &dm);
        let best = Arc::new(BestSolution::seeded(&start, start_length));
        let done = Arc::new(AtomicBool::new(false));

        let observer = {
            let best = Arc::clone(&best);
            let done = Arc::clone(&done);
            let dm = dm.clone();
            thread::spawn(move || {
                let mut last = i64::MAX;
                while !done.load(Ordering::Relaxed) {
                    let snap = best.snapshot();
                    assert!(snap.length <= last, "best length rose from {last} to {}", snap.length);
                    assert_eq!(snap.length, tour_length(&snap.tour, &dm));
                    last = snap.length;
                }
            })
        };

        two_opt(&start, start_length, &dm, &best).expect("valid");
        done.store(true, Ordering::Relaxed);
        observer.join().expect("observer thread panicked");
    }

    #[test]
    fn test_cancelled_before_start() {
        let dm = square10();
        let tour = vec![0, 2, 1, 3];
        let best = BestSolution::seeded(&tour, 48);
        let cancel = Arc::new(AtomicBool::new(true));

        let outcome = two_opt_with_cancel(&tour, 48, &dm, &best, Some(cancel)).expect("valid");
        assert!(outcome.cancelled);
        assert_eq!(outcome.tour, tour);
        assert_eq!(best.length(), 48);
    }

    #[test]
    fn test_rejects_bad_input() {
        let dm = square10();
        let best = BestSolution::seeded(&[0, 1, 2, 3], 40);
        assert!(matches!(
            two_opt(&[0], 0, &dm, &best),
            Err(TspError::InsufficientInput { found: 1 })
        ));
        assert!(matches!(
            two_opt(&[0, 1, 2, 3], 41, &dm, &best),
            Err(TspError::InvariantViolation { .. })
        ));
    }
}
