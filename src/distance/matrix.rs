//! Packed symmetric distance matrix.

use log::debug;

use crate::error::{TspError, TspResult};
use crate::models::{City, CityId};

/// Largest city id accepted by [`DistanceMatrix::build`].
pub const MAX_CITY_ID: CityId = 32_767;

const NO_SLOT: u32 = u32::MAX;

/// Rounded Euclidean distances between every pair of cities.
///
/// Cities are remapped to dense slots in input order, and only the upper
/// triangle (`slot(a) < slot(b)`) is stored, packed row by row. Storage is
/// therefore `n(n-1)/2` entries for `n` cities no matter how sparse the ids
/// are. Always query through [`distance`](Self::distance), which picks the
/// stored orientation.
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
/// use u_tsp::distance::DistanceMatrix;
///
/// let cities = vec![
///     City::new(0, 0, 0),
///     City::new(10, 3, 4),
///     City::new(20, 6, 8),
/// ];
/// let dm = DistanceMatrix::build(&cities).unwrap();
/// assert_eq!(dm.distance(0, 10), 5);
/// assert_eq!(dm.distance(20, 10), 5);
/// assert_eq!(dm.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    ids: Vec<CityId>,
    slot_of: Vec<u32>,
    data: Vec<i64>,
    average_distance: f64,
    max_id: CityId,
}

impl DistanceMatrix {
    /// Computes the matrix for the given cities.
    ///
    /// Also computes the average-distance proxy used to scale annealing
    /// temperatures: the sum of all stored entries divided by `max_id²`.
    ///
    /// # Errors
    ///
    /// - [`TspError::InsufficientInput`] with fewer than two cities
    /// - [`TspError::IdentifierOutOfRange`] for an id above [`MAX_CITY_ID`]
    /// - [`TspError::DuplicateIdentifier`] if an id repeats
    pub fn build(cities: &[City]) -> TspResult<Self> {
        let n = cities.len();
        if n < 2 {
            return Err(TspError::InsufficientInput { found: n });
        }

        let mut max_id = 0;
        for city in cities {
            if city.id() > MAX_CITY_ID {
                return Err(TspError::IdentifierOutOfRange {
                    id: city.id(),
                    max: MAX_CITY_ID,
                });
            }
            max_id = max_id.max(city.id());
        }

        let mut slot_of = vec![NO_SLOT; max_id as usize + 1];
        for (slot, city) in cities.iter().enumerate() {
            let entry = &mut slot_of[city.id() as usize];
            if *entry != NO_SLOT {
                return Err(TspError::DuplicateIdentifier { id: city.id() });
            }
            *entry = slot as u32;
        }

        let mut data = Vec::with_capacity(n * (n - 1) / 2);
        let mut sum: i64 = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                sum += d;
                data.push(d);
            }
        }

        let average_distance = sum as f64 / f64::from(max_id).powi(2);
        debug!(
            "distance matrix: {} cities, max id {}, average distance {:.3}",
            n, max_id, average_distance
        );

        Ok(Self {
            ids: cities.iter().map(City::id).collect(),
            slot_of,
            data,
            average_distance,
            max_id,
        })
    }

    /// Returns the distance between cities `a` and `b`. Order does not matter;
    /// `distance(a, a)` is 0.
    ///
    /// # Panics
    ///
    /// Panics if either id is not part of this matrix.
    pub fn distance(&self, a: CityId, b: CityId) -> i64 {
        let sa = self.slot(a);
        let sb = self.slot(b);
        if sa == sb {
            return 0;
        }
        let (lo, hi) = if sa < sb { (sa, sb) } else { (sb, sa) };
        let n = self.ids.len();
        self.data[lo * n - lo * (lo + 1) / 2 + (hi - lo - 1)]
    }

    /// Sum of stored distances divided by `max_id²`.
    ///
    /// A cheap scale for temperature schedules, not the true mean
    /// inter-city distance.
    pub fn average_distance(&self) -> f64 {
        self.average_distance
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the matrix holds no cities. [`build`](Self::build) rejects
    /// fewer than two, so a built matrix is never empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// City ids in input order.
    pub fn ids(&self) -> &[CityId] {
        &self.ids
    }

    /// Largest city id.
    pub fn max_id(&self) -> CityId {
        self.max_id
    }

    /// Returns `true` if `id` is one of this matrix's cities.
    pub fn contains(&self, id: CityId) -> bool {
        self.slot_of
            .get(id as usize)
            .is_some_and(|&slot| slot != NO_SLOT)
    }

    /// Returns the position in `candidates` of the city nearest to `from`.
    ///
    /// The first minimum wins ties. Returns `None` if `candidates` is empty.
    pub fn nearest(&self, from: CityId, candidates: &[CityId]) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (pos, &c) in candidates.iter().enumerate() {
            let d = self.distance(from, c);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((pos, d));
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn slot(&self, id: CityId) -> usize {
        match self.slot_of.get(id as usize) {
            Some(&slot) if slot != NO_SLOT => slot as usize,
            _ => panic!("city id {id} is not in the distance matrix"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cities() -> Vec<City> {
        vec![City::new(0, 0, 0), City::new(1, 3, 4), City::new(2, 0, 8)]
    }

    #[test]
    fn test_build() {
        let dm = DistanceMatrix::build(&sample_cities()).expect("valid");
        assert_eq!(dm.len(), 3);
        assert_eq!(dm.distance(0, 1), 5);
        assert_eq!(dm.distance(0, 2), 8);
        assert_eq!(dm.distance(1, 2), 5);
        assert_eq!(dm.distance(0, 0), 0);
        assert_eq!(dm.ids(), &[0, 1, 2]);
        assert_eq!(dm.max_id(), 2);
    }

    #[test]
    fn test_symmetric() {
        let cities = vec![
            City::new(5, 10, -3),
            City::new(2, 0, 7),
            City::new(9, -4, -4),
            City::new(0, 22, 1),
        ];
        let dm = DistanceMatrix::build(&cities).expect("valid");
        for a in &cities {
            for b in &cities {
                assert_eq!(dm.distance(a.id(), b.id()), dm.distance(b.id(), a.id()));
                assert_eq!(dm.distance(a.id(), b.id()), a.distance_to(b));
            }
        }
    }

    #[test]
    fn test_average_distance_uses_max_id() {
        // sum = 5 + 8 + 5 = 18, max id = 2
        let dm = DistanceMatrix::build(&sample_cities()).expect("valid");
        assert!((dm.average_distance() - 18.0 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_sparse_ids() {
        let cities = vec![City::new(30_000, 0, 0), City::new(7, 3, 4)];
        let dm = DistanceMatrix::build(&cities).expect("valid");
        assert_eq!(dm.distance(7, 30_000), 5);
        assert_eq!(dm.len(), 2);
        assert!(!dm.is_empty());
        assert!(dm.contains(7));
        assert!(!dm.contains(8));
        assert!(!dm.contains(40_000));
    }

    #[test]
    fn test_insufficient_input() {
        assert_eq!(
            DistanceMatrix::build(&[]).unwrap_err(),
            TspError::InsufficientInput { found: 0 }
        );
        assert_eq!(
            DistanceMatrix::build(&[City::new(0, 1, 1)]).unwrap_err(),
            TspError::InsufficientInput { found: 1 }
        );
    }

    #[test]
    fn test_identifier_out_of_range() {
        let cities = vec![City::new(0, 0, 0), City::new(MAX_CITY_ID + 1, 1, 1)];
        assert_eq!(
            DistanceMatrix::build(&cities).unwrap_err(),
            TspError::IdentifierOutOfRange {
                id: MAX_CITY_ID + 1,
                max: MAX_CITY_ID
            }
        );
    }

    #[test]
    fn test_duplicate_identifier() {
        let cities = vec![City::new(3, 0, 0), City::new(1, 1, 1), City::new(3, 2, 2)];
        assert_eq!(
            DistanceMatrix::build(&cities).unwrap_err(),
            TspError::DuplicateIdentifier { id: 3 }
        );
    }

    #[test]
    fn test_nearest() {
        let dm = DistanceMatrix::build(&sample_cities()).expect("valid");
        // From (0,0): city 1 at (3,4) is 5 away, city 2 at (0,8) is 8 away
        assert_eq!(dm.nearest(0, &[2, 1]), Some(1));
        assert_eq!(dm.nearest(0, &[2]), Some(0));
        assert_eq!(dm.nearest(0, &[]), None);
    }

    #[test]
    fn test_nearest_first_minimum_wins() {
        let dm = DistanceMatrix::build(&sample_cities()).expect("valid");
        // From city 1, both 0 and 2 are 5 away
        assert_eq!(dm.nearest(1, &[2, 0]), Some(0));
        assert_eq!(dm.nearest(1, &[0, 2]), Some(0));
    }

    #[test]
    #[should_panic(expected = "not in the distance matrix")]
    fn test_unknown_id_panics() {
        let dm = DistanceMatrix::build(&sample_cities()).expect("valid");
        dm.distance(0, 99);
    }
}
