//! City type.

use serde::{Deserialize, Serialize};

/// City identifier. Ids need not be contiguous.
pub type CityId = u32;

/// A city with integer coordinates.
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
///
/// let a = City::new(0, 0, 0);
/// let b = City::new(1, 3, 4);
/// assert_eq!(a.distance_to(&b), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    id: CityId,
    x: i32,
    y: i32,
}

impl City {
    /// Creates a new city.
    pub fn new(id: CityId, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    /// City ID.
    pub fn id(&self) -> CityId {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Euclidean distance to another city, rounded to the nearest integer
    /// (halves round away from zero).
    pub fn distance_to(&self, other: &City) -> i64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt().round() as i64
    }
}
