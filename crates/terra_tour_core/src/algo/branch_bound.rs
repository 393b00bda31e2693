//! Exact tour search by branch and bound.
//!
//! The search permutes point indices in place. Positions `[0, placed)` hold
//! the fixed prefix of the tour under construction and position 0 never
//! moves, so each distinct cycle is explored from one anchor instead of `n`
//! rotations. Positions `[placed, n)` hold the unplaced points in no
//! particular order.
//!
//! A branch is cut when the prefix weight plus an admissible estimate of the
//! cheapest completion cannot beat the incumbent. The estimate adds
//!
//! - the minimum spanning tree weight over the unplaced points,
//! - the cheapest edge from any unplaced point back to the tour start,
//! - the cheapest edge from the prefix tail to any unplaced point.
//!
//! Any completion walks from the tail into the unplaced set, threads a path
//! through all of it and returns to the start, so it pays at least each of
//! those three terms.

use terra_tour_derive::KvDisplay;

use crate::{
    Point, Tour,
    algo::spanning,
    constants::{BOUND_MIN_UNPLACED, ROOT},
    geometry::DistanceMatrix,
};

/// Counters gathered over one search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, KvDisplay)]
pub struct SearchStats {
    /// Calls into the recursion, leaves included.
    pub nodes: u64,
    pub pruned: u64,
    #[kv(name = "bounds")]
    pub bounds_computed: u64,
    pub improvements: u64,
}

/// One exact search session. Owns the working permutation and the incumbent.
pub struct BranchAndBound<'a> {
    points: &'a [Point],
    matrix: DistanceMatrix,
    order: Vec<usize>,
    best_order: Vec<usize>,
    best_length: f64,
    scratch: Vec<(usize, f64)>,
    stats: SearchStats,
}

impl<'a> BranchAndBound<'a> {
    /// `seed` must be a complete tour over `points` starting at point 0. Its
    /// length is the initial upper bound and its order is reported when no
    /// strictly shorter tour exists.
    pub fn new(points: &'a [Point], seed: &Tour) -> Self {
        debug_assert_eq!(seed.len(), points.len());
        debug_assert_eq!(seed.order().first().copied(), Some(ROOT));

        Self {
            points,
            matrix: DistanceMatrix::new(points),
            order: (0..points.len()).collect(),
            best_order: seed.order().to_vec(),
            best_length: seed.length(),
            scratch: Vec::with_capacity(points.len()),
            stats: SearchStats::default(),
        }
    }

    #[terra_tour_derive::timer("branch_bound")]
    pub fn solve(mut self) -> (Tour, SearchStats) {
        log::info!(
            "branch_bound: start n={} upper_bound={:.2}",
            self.points.len(),
            self.best_length
        );

        if !self.matrix.is_empty() {
            self.extend(1, 0.0);
        }

        log::info!(
            "branch_bound: complete length={:.2} {}",
            self.best_length,
            self.stats
        );
        (Tour::new(self.best_order, self.best_length), self.stats)
    }

    /// Explores every completion of the prefix `order[..placed]`, whose
    /// weight is `weight`.
    fn extend(&mut self, placed: usize, weight: f64) {
        self.stats.nodes += 1;
        let n = self.matrix.len();

        if placed == n {
            let length = weight + self.matrix.get(self.order[n - 1], self.order[ROOT]);
            if length < self.best_length {
                self.best_length = length;
                self.best_order.copy_from_slice(&self.order);
                self.stats.improvements += 1;
                log::debug!(
                    "branch_bound: improved length={length:.2} nodes={}",
                    self.stats.nodes
                );
            }
            return;
        }

        if !self.promising(placed, weight) {
            self.stats.pruned += 1;
            return;
        }

        let tail = self.order[placed - 1];
        for candidate in placed..n {
            self.order.swap(placed, candidate);
            let step = self.matrix.get(tail, self.order[placed]);
            self.extend(placed + 1, weight + step);
            self.order.swap(placed, candidate);
        }
    }

    /// Whether some completion of the current prefix could still be strictly
    /// shorter than the incumbent.
    fn promising(&mut self, placed: usize, weight: f64) -> bool {
        if weight >= self.best_length {
            return false;
        }
        if self.matrix.len() - placed < BOUND_MIN_UNPLACED {
            return true;
        }

        self.stats.bounds_computed += 1;
        let bound = weight + completion_bound(&self.matrix, &self.order, placed, &mut self.scratch);
        bound < self.best_length
    }
}

/// Lower bound on the cost of closing the tour from the prefix
/// `order[..placed]` through every point in `order[placed..]`.
///
/// Never exceeds the true cheapest completion. `placed` must be at least 1.
pub(crate) fn completion_bound(
    matrix: &DistanceMatrix,
    order: &[usize],
    placed: usize,
    scratch: &mut Vec<(usize, f64)>,
) -> f64 {
    let unplaced = &order[placed..];
    if unplaced.is_empty() {
        return 0.0;
    }

    let start = order[ROOT];
    let tail = order[placed - 1];
    let (to_start, from_tail) = unplaced
        .iter()
        .fold((f64::INFINITY, f64::INFINITY), |(s, t), &v| {
            (s.min(matrix.get(v, start)), t.min(matrix.get(tail, v)))
        });

    spanning::bound_weight(matrix, unplaced, scratch) + to_start + from_tail
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::{BranchAndBound, completion_bound};
    use crate::{
        Point, Tour,
        algo::insertion::cheapest_insertion_tour,
        geometry::{self, DistanceMatrix},
    };

    const EPS: f64 = 1e-9;

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn random_points(rng: &mut StdRng, n: usize) -> Vec<Point> {
        (0..n)
            .map(|_| Point::new(rng.random_range(-50..=50), rng.random_range(-50..=50)))
            .collect()
    }

    fn solve(pts: &[Point]) -> (Tour, super::SearchStats) {
        let seed = cheapest_insertion_tour(pts);
        BranchAndBound::new(pts, &seed).solve()
    }

    /// Cheapest way to finish `prefix` by visiting `rest` in any order and
    /// returning to `prefix[0]`.
    fn brute_force_completion(
        matrix: &DistanceMatrix,
        prefix: &[usize],
        rest: &mut [usize],
    ) -> f64 {
        fn walk(
            matrix: &DistanceMatrix,
            start: usize,
            tail: usize,
            rest: &mut [usize],
            k: usize,
        ) -> f64 {
            if k == rest.len() {
                return matrix.get(tail, start);
            }
            let mut best = f64::INFINITY;
            for i in k..rest.len() {
                rest.swap(k, i);
                let cost = matrix.get(tail, rest[k]) + walk(matrix, start, rest[k], rest, k + 1);
                best = best.min(cost);
                rest.swap(k, i);
            }
            best
        }

        let tail = prefix[prefix.len() - 1];
        walk(matrix, prefix[0], tail, rest, 0)
    }

    fn brute_force_optimum(pts: &[Point]) -> f64 {
        let matrix = DistanceMatrix::new(pts);
        let mut rest: Vec<usize> = (1..pts.len()).collect();
        brute_force_completion(&matrix, &[0], &mut rest)
    }

    #[test]
    fn right_triangle_matches_heuristic() {
        let pts = points(&[(0, 0), (10, 0), (0, 10)]);
        let (tour, _) = solve(&pts);
        assert_eq!(format!("{:.2}", tour.length()), "34.14");
        assert_eq!(tour.order()[0], 0);
        assert_eq!(tour.len(), 3);
    }

    #[test]
    fn coincident_points_have_zero_length() {
        let pts = points(&[(0, 0); 4]);
        let (tour, _) = solve(&pts);
        assert_eq!(format!("{:.2}", tour.length()), "0.00");
    }

    #[test]
    fn many_coincident_points_are_pruned_immediately() {
        let pts = points(&[(3, 3); 12]);
        let (tour, stats) = solve(&pts);
        assert_eq!(tour.length(), 0.0);
        assert_eq!(stats.improvements, 0);
        assert!(stats.nodes < 100);
    }

    #[test]
    fn finds_the_convex_order_of_a_scrambled_polygon() {
        let pts = points(&[
            (0, 0),
            (10, 10),
            (10, 0),
            (0, 10),
            (5, -3),
            (13, 5),
            (5, 13),
            (-3, 5),
        ]);
        let (tour, _) = solve(&pts);
        let hull = [0, 4, 2, 5, 1, 6, 3, 7];
        let expected = geometry::tour_length(&pts, &hull);
        assert!((tour.length() - expected).abs() < EPS);
    }

    #[test]
    fn reported_order_realizes_reported_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 3..=9 {
            let pts = random_points(&mut rng, n);
            let (tour, _) = solve(&pts);

            assert_eq!(tour.order()[0], 0);
            let mut sorted = tour.order().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..n).collect::<Vec<_>>());

            let measured = geometry::tour_length(&pts, tour.order());
            assert!((tour.length() - measured).abs() < EPS);
        }
    }

    #[test]
    fn matches_brute_force_and_never_loses_to_its_seed() {
        let mut rng = StdRng::seed_from_u64(2024);
        for round in 0..24 {
            let n = 3 + round % 7;
            let pts = random_points(&mut rng, n);
            let seed = cheapest_insertion_tour(&pts);
            let (tour, _) = BranchAndBound::new(&pts, &seed).solve();

            assert!(tour.length() <= seed.length() + EPS);
            assert!(
                (tour.length() - brute_force_optimum(&pts)).abs() < EPS,
                "round={round} n={n}"
            );
        }
    }

    #[test]
    fn bound_never_exceeds_the_cheapest_completion() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..40 {
            let n = rng.random_range(4..=8);
            let pts = random_points(&mut rng, n);
            let matrix = DistanceMatrix::new(&pts);

            let mut order: Vec<usize> = (0..n).collect();
            let tail_len = n - 1;
            for i in (1..tail_len).rev() {
                let j = rng.random_range(1..=i);
                order.swap(i, j);
            }
            let placed = rng.random_range(1..n);

            let bound = completion_bound(&matrix, &order, placed, &mut Vec::new());
            let mut rest = order[placed..].to_vec();
            let exact = brute_force_completion(&matrix, &order[..placed], &mut rest);
            assert!(bound <= exact + EPS, "bound={bound} exact={exact}");
        }
    }

    #[test]
    fn bound_of_a_full_prefix_is_zero() {
        let pts = points(&[(0, 0), (1, 0), (1, 1)]);
        let matrix = DistanceMatrix::new(&pts);
        assert_eq!(completion_bound(&matrix, &[0, 1, 2], 3, &mut Vec::new()), 0.0);
    }

    #[test]
    fn stats_count_work_done() {
        let mut rng = StdRng::seed_from_u64(11);
        let pts = random_points(&mut rng, 9);
        let (_, stats) = solve(&pts);
        assert!(stats.nodes > 0);
        assert!(stats.bounds_computed > 0);
        assert!(stats.to_string().starts_with("nodes="));
    }

    #[test]
    fn solving_twice_gives_identical_results() {
        let mut rng = StdRng::seed_from_u64(5);
        let pts = random_points(&mut rng, 8);
        let first = solve(&pts);
        let second = solve(&pts);
        assert_eq!(first, second);
    }
}
