//! Best-solution tracker shared between a search and its observers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::{CityId, Tour};

/// A consistent copy of the best solution: a length and the tour it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourSnapshot {
    /// Total tour length.
    pub length: i64,
    /// Ordered city ids; the last city connects back to the first.
    pub tour: Vec<CityId>,
}

/// Holds the best `(length, tour)` pair observed across all searches of a run.
///
/// Length and tour live behind one lock, so [`update`](Self::update) is a
/// critical section: a reader on another thread (for example a termination
/// handler) never observes a length paired with a half-copied tour. Share it
/// with `Arc<BestSolution>`.
///
/// `update` overwrites unconditionally. Callers decide whether a length is an
/// improvement.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_tsp::models::BestSolution;
///
/// let best = Arc::new(BestSolution::seeded(&[0, 1, 2], 12));
/// let observer = Arc::clone(&best);
///
/// best.update(10, &[0, 2, 1]);
/// let snap = observer.snapshot();
/// assert_eq!(snap.length, 10);
/// assert_eq!(snap.tour, vec![0, 2, 1]);
/// ```
#[derive(Debug)]
pub struct BestSolution {
    inner: Mutex<TourSnapshot>,
}

impl BestSolution {
    /// Creates a tracker seeded with an initial solution.
    pub fn seeded(tour: &[CityId], length: i64) -> Self {
        Self {
            inner: Mutex::new(TourSnapshot {
                length,
                tour: tour.to_vec(),
            }),
        }
    }

    /// Replaces the tracked best with `length` and a copy of `tour`.
    pub fn update(&self, length: i64, tour: &[CityId]) {
        let mut guard = self.lock();
        guard.length = length;
        guard.tour.clear();
        guard.tour.extend_from_slice(tour);
    }

    /// Tracked best length.
    pub fn length(&self) -> i64 {
        self.lock().length
    }

    /// Returns a consistent copy of the tracked best. Safe to call from any
    /// thread at any time.
    pub fn snapshot(&self) -> TourSnapshot {
        self.lock().clone()
    }

    /// Copy of the tracked best tour.
    pub fn tour(&self) -> Tour {
        self.lock().tour.clone()
    }

    // Writers always leave the pair whole, so a poisoned lock still holds a
    // consistent value.
    fn lock(&self) -> MutexGuard<'_, TourSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
