/// Smallest point count that forms a closed tour.
pub(crate) const MIN_CYCLE_POINTS: usize = 3;

/// Below this many unplaced points the completion bound costs more than the
/// branches it could cut, so the exact search skips it.
pub(crate) const BOUND_MIN_UNPLACED: usize = 5;

/// Spanning trees are grown from this point; tours start and end here.
pub(crate) const ROOT: usize = 0;
