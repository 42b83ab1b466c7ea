//! Domain model types for the traveling salesman problem.
//!
//! Cities with integer coordinates, tours as ordered id sequences, the
//! shared best-solution tracker, and the outcome record every search returns.

mod best;
mod city;
mod outcome;

pub use best::{BestSolution, TourSnapshot};
pub use city::{City, CityId};
pub use outcome::SearchOutcome;

/// A closed tour: every city id exactly once, the last connecting back to the
/// first.
pub type Tour = Vec<CityId>;
