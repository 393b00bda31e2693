pub(crate) mod branch_bound;
pub(crate) mod insertion;
pub(crate) mod solver;
pub(crate) mod spanning;
