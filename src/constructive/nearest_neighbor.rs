//! Nearest-neighbor constructive heuristic.
//!
//! Starting from the first city, repeatedly moves the unplaced city nearest to
//! the last placed one into the next position. The working array is
//! partitioned in place (placed prefix, unplaced suffix), so no visited set is
//! needed.
//!
//! # Complexity
//!
//! O(n²) time, O(1) extra space.
//!
//! # Reference
//!
//! Rosenkrantz, Stearns & Lewis (1977). "An analysis of several heuristics
//! for the traveling salesman problem", *SIAM J. Computing* 6(3), 563-581.

use log::debug;

use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};
use crate::evaluation::validate_tour;
use crate::models::{CityId, Tour};

/// Builds a tour greedily from `city_ids`, starting at `city_ids[0]`.
///
/// Returns the tour and its length, closing edge included. Ties go to the
/// first candidate encountered in the unplaced suffix.
///
/// # Errors
///
/// - [`TspError::InsufficientInput`] with fewer than two ids
/// - [`TspError::InvariantViolation`] if `city_ids` is not a permutation of
///   the matrix's cities
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::nearest_neighbor;
///
/// let cities = vec![
///     City::new(0, 0, 0),
///     City::new(1, 3, 0),
///     City::new(2, 1, 0),
///     City::new(3, 2, 0),
/// ];
/// let dm = DistanceMatrix::build(&cities).unwrap();
///
/// let (tour, length) = nearest_neighbor(dm.ids(), &dm).unwrap();
/// assert_eq!(tour, vec![0, 2, 3, 1]);
/// assert_eq!(length, 6); // 1 + 1 + 1 + 3
/// ```
pub fn nearest_neighbor(city_ids: &[CityId], distances: &DistanceMatrix) -> TspResult<(Tour, i64)> {
    let n = city_ids.len();
    if n < 2 {
        return Err(TspError::InsufficientInput { found: n });
    }
    validate_tour(city_ids, distances)?;

    let mut tour = city_ids.to_vec();
    let mut length = 0;

    for placed in 0..n - 1 {
        let current = tour[placed];
        let offset = distances
            .nearest(current, &tour[placed + 1..])
            .ok_or_else(|| TspError::invariant("empty unplaced suffix"))?;
        tour.swap(placed + 1, placed + 1 + offset);
        length += distances.distance(current, tour[placed + 1]);
    }
    length += distances.distance(tour[n - 1], tour[0]);

    debug!("nearest neighbor: {} cities, length {}", n, length);
    Ok((tour, length))
}
