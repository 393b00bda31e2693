//! Spanning trees and closed tours over 2D integer points.
//! Spanning trees respect land/sea/coast terrain; tours come from cheapest
//! insertion or an exact branch-and-bound search seeded by it.

mod algo;
mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
mod point;
mod tour;

pub(crate) use geo::geometry;
pub(crate) use io::options;

pub use algo::branch_bound::{BranchAndBound, SearchStats};
pub use algo::insertion::cheapest_insertion_tour;
pub use algo::solver::{Solution, solve};
pub use algo::spanning::SpanningTree;
pub use error::{Error, Result};
pub use io::input::PointSet;
pub use io::options::{LogFormat, LogLevel, Mode, SolverOptions};
pub use io::output::write_solution;
pub use point::{Category, Point};
pub use tour::{Tour, TourMetrics};
