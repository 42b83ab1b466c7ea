//! # u-tsp
//!
//! Heuristics for the Euclidean traveling salesman problem on integer
//! coordinates, with every edge rounded to the nearest integer.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (City, Tour, BestSolution tracker, SearchOutcome)
//! - [`distance`] — Packed symmetric distance matrix
//! - [`evaluation`] — O(1) 2-opt delta evaluation and tour checks
//! - [`constructive`] — Nearest-neighbor construction
//! - [`local_search`] — First-improvement 2-opt
//! - [`anneal`] — Simulated annealing over random 2-opt moves
//! - [`hybrid`] — Metropolis-filtered 2-opt sweeps with adaptive heating
//! - [`error`] — Error taxonomy
//!
//! ## Flow
//!
//! ```
//! use u_tsp::models::{BestSolution, City};
//! use u_tsp::distance::DistanceMatrix;
//! use u_tsp::constructive::nearest_neighbor;
//! use u_tsp::local_search::two_opt;
//!
//! let cities = vec![
//!     City::new(1, 0, 0),
//!     City::new(2, 10, 10),
//!     City::new(3, 0, 10),
//!     City::new(4, 10, 0),
//! ];
//! let dm = DistanceMatrix::build(&cities)?;
//! let (tour, length) = nearest_neighbor(dm.ids(), &dm)?;
//! let best = BestSolution::seeded(&tour, length);
//!
//! two_opt(&tour, length, &dm, &best)?;
//! let snap = best.snapshot();
//! assert_eq!(snap.length, 40);
//! # Ok::<(), u_tsp::error::TspError>(())
//! ```

pub mod anneal;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod hybrid;
pub mod local_search;
pub mod models;
