//! Incremental 2-opt move evaluation.
//!
//! # Move
//!
//! A 2-opt move `(i, j)` with `1 <= i <= j < n` reverses `tour[i..=j]`. Only
//! the two edges at the segment boundary change:
//!
//! ```text
//! removed: (t[i-1], t[i])  and  (t[j], t[(j+1) % n])
//! added:   (t[i-1], t[j])  and  (t[i], t[(j+1) % n])
//! ```
//!
//! The segment interior is traversed backwards, which costs nothing on a
//! symmetric matrix. The new length is therefore computed in O(1).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};
use crate::models::CityId;

/// Returns the length `tour` would have after [`apply_swap`]`(i, j, tour)`,
/// given that its current length is `old_length`.
///
/// When `j == n - 1` the edge after the segment wraps to `tour[0]`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::{apply_swap, delta_length, tour_length};
///
/// // Unit square visited in a crossing order
/// let cities = vec![
///     City::new(0, 0, 0),
///     City::new(1, 0, 1),
///     City::new(2, 1, 1),
///     City::new(3, 1, 0),
/// ];
/// let dm = DistanceMatrix::build(&cities).unwrap();
/// let mut tour = vec![0, 2, 1, 3];
/// let len = tour_length(&tour, &dm);
///
/// let new_len = delta_length(len, 1, 2, &tour, &dm);
/// apply_swap(1, 2, &mut tour);
/// assert_eq!(tour, vec![0, 1, 2, 3]);
/// assert_eq!(new_len, tour_length(&tour, &dm));
/// assert_eq!(new_len, 4);
/// ```
pub fn delta_length(
    old_length: i64,
    i: usize,
    j: usize,
    tour: &[CityId],
    distances: &DistanceMatrix,
) -> i64 {
    let n = tour.len();
    debug_assert!(1 <= i && i <= j && j < n, "invalid 2-opt move ({i}, {j}) for n = {n}");

    let before = tour[i - 1];
    let first = tour[i];
    let last = tour[j];
    let after = if j == n - 1 { tour[0] } else { tour[j + 1] };

    old_length - (distances.distance(before, first) + distances.distance(last, after))
        + (distances.distance(before, last) + distances.distance(first, after))
}

/// Reverses `tour[i..=j]` in place.
pub fn apply_swap(mut i: usize, mut j: usize, tour: &mut [CityId]) {
    while i < j {
        tour.swap(i, j);
        i += 1;
        j -= 1;
    }
}

/// Computes the full length of a closed tour, including the edge from the
/// last city back to the first.
pub fn tour_length(tour: &[CityId], distances: &DistanceMatrix) -> i64 {
    if tour.len() < 2 {
        return 0;
    }
    let closing = distances.distance(tour[tour.len() - 1], tour[0]);
    tour.windows(2)
        .map(|w| distances.distance(w[0], w[1]))
        .sum::<i64>()
        + closing
}

/// Checks that `tour` visits every city of `distances` exactly once.
///
/// # Errors
///
/// [`TspError::InvariantViolation`] describing the first problem found.
pub fn validate_tour(tour: &[CityId], distances: &DistanceMatrix) -> TspResult<()> {
    if tour.len() != distances.len() {
        return Err(TspError::invariant(format!(
            "tour has {} cities, expected {}",
            tour.len(),
            distances.len()
        )));
    }
    if let Some(&unknown) = tour.iter().find(|&&c| !distances.contains(c)) {
        return Err(TspError::invariant(format!("tour contains unknown city {unknown}")));
    }
    let mut sorted = tour.to_vec();
    sorted.sort_unstable();
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(TspError::invariant(format!("tour visits city {} twice", w[0])));
    }
    Ok(())
}

/// Checks that `length` equals the full recomputation of `tour`'s length.
///
/// # Errors
///
/// [`TspError::InvariantViolation`] if the two disagree.
pub fn verify_length(tour: &[CityId], length: i64, distances: &DistanceMatrix) -> TspResult<()> {
    let actual = tour_length(tour, distances);
    if actual != length {
        return Err(TspError::invariant(format!(
            "cached tour length {length} differs from recomputed {actual}"
        )));
    }
    Ok(())
}

/// Validates the starting point of a search: at least two cities, a
/// permutation of the matrix's cities, and a length matching the tour.
pub(crate) fn check_search_input(
    tour: &[CityId],
    length: i64,
    distances: &DistanceMatrix,
) -> TspResult<()> {
    if tour.len() < 2 {
        return Err(TspError::InsufficientInput { found: tour.len() });
    }
    validate_tour(tour, distances)?;
    verify_length(tour, length, distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::City;

    fn square() -> DistanceMatrix {
        DistanceMatrix::build(&[
            City::new(0, 0, 0),
            City::new(1, 0, 1),
            City::new(2, 1, 1),
            City::new(3, 1, 0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_tour_length() {
        let dm = square();
        assert_eq!(tour_length(&[0, 1, 2, 3], &dm), 4);
        // 0→2 and 1→3 are diagonals (round(1.414) = 1)
        assert_eq!(tour_length(&[0, 2, 1, 3], &dm), 4);
        assert_eq!(tour_length(&[0], &dm), 0);
    }

    #[test]
    fn test_apply_swap() {
        let mut tour = vec![0, 1, 2, 3, 4, 5];
        apply_swap(1, 4, &mut tour);
        assert_eq!(tour, vec![0, 4, 3, 2, 1, 5]);
        apply_swap(2, 2, &mut tour);
        assert_eq!(tour, vec![0, 4, 3, 2, 1, 5]);
        apply_swap(1, 5, &mut tour);
        assert_eq!(tour, vec![0, 5, 1, 2, 3, 4]);
    }

    #[test]
    fn test_delta_wraparound() {
        let dm = DistanceMatrix::build(&[
            City::new(0, 0, 0),
            City::new(1, 10, 0),
            City::new(2, 10, 10),
            City::new(3, 0, 10),
            City::new(4, 5, 20),
        ])
        .expect("valid");
        let mut tour = vec![0, 2, 1, 4, 3];
        let len = tour_length(&tour, &dm);
        let predicted = delta_length(len, 3, 4, &tour, &dm);
        apply_swap(3, 4, &mut tour);
        assert_eq!(predicted, tour_length(&tour, &dm));
    }

    #[test]
    fn test_delta_identity_moves() {
        let dm = square();
        let tour = vec![0, 2, 3, 1];
        let len = tour_length(&tour, &dm);
        // Single-element segment and full reversal of tour[1..] leave the cycle unchanged
        assert_eq!(delta_length(len, 2, 2, &tour, &dm), len);
        assert_eq!(delta_length(len, 1, 3, &tour, &dm), len);
    }

    #[test]
    fn test_two_city_tour() {
        let dm = DistanceMatrix::build(&[City::new(4, 0, 0), City::new(9, 3, 4)]).expect("valid");
        let tour = vec![4, 9];
        assert_eq!(tour_length(&tour, &dm), 10);
        assert_eq!(delta_length(10, 1, 1, &tour, &dm), 10);
    }

    #[test]
    fn test_validate_tour() {
        let dm = square();
        assert!(validate_tour(&[2, 0, 3, 1], &dm).is_ok());
        assert!(matches!(
            validate_tour(&[0, 1, 2], &dm),
            Err(TspError::InvariantViolation { .. })
        ));
        assert!(matches!(
            validate_tour(&[0, 1, 2, 2], &dm),
            Err(TspError::InvariantViolation { .. })
        ));
        assert!(matches!(
            validate_tour(&[0, 1, 2, 7], &dm),
            Err(TspError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_check_search_input() {
        let dm = square();
        assert!(check_search_input(&[0, 1, 2, 3], 4, &dm).is_ok());
        assert_eq!(
            check_search_input(&[0], 0, &dm).unwrap_err(),
            TspError::InsufficientInput { found: 1 }
        );
        assert!(check_search_input(&[0, 1, 2, 3], 3, &dm).is_err());
    }

    #[test]
    fn test_verify_length() {
        let dm = square();
        assert!(verify_length(&[0, 1, 2, 3], 4, &dm).is_ok());
        assert!(verify_length(&[0, 1, 2, 3], 5, &dm).is_err());
    }
}
