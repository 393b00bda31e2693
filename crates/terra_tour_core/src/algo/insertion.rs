use crate::{Point, Tour, geometry::distance};

/// Builds a tour by cheapest insertion.
///
/// Starts from the cycle `0 -> 1 -> 2 -> 0` and inserts the remaining points
/// in input order, each after the cycle position whose edge grows the least.
/// Ties keep the earliest edge in current cycle order. Point 0 never moves,
/// so the returned order always starts at 0.
///
/// Callers guarantee at least three points.
#[terra_tour_derive::timer("insertion")]
pub fn cheapest_insertion_tour(points: &[Point]) -> Tour {
    let n = points.len();
    let mut cycle: Vec<usize> = Vec::with_capacity(n);
    cycle.extend(0..n.min(3));

    for next in cycle.len()..n {
        let p = points[next];
        let mut best_pos = 0;
        let mut best_cost = f64::INFINITY;

        for pos in 0..cycle.len() {
            let a = points[cycle[pos]];
            let b = points[cycle[(pos + 1) % cycle.len()]];
            let cost = distance(a, p) + distance(p, b) - distance(a, b);
            if cost < best_cost {
                best_cost = cost;
                best_pos = pos;
            }
        }

        cycle.insert(best_pos + 1, next);
        log::trace!("insertion: point={next} after_pos={best_pos} cost={best_cost:.2}");
    }

    let tour = Tour::from_order(points, cycle);
    log::info!("insertion: complete n={n} length={:.2}", tour.length());
    tour
}

#[cfg(test)]
mod tests {
    use super::cheapest_insertion_tour;
    use crate::Point;

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn triangle_is_returned_as_is() {
        let tour = cheapest_insertion_tour(&points(&[(0, 0), (10, 0), (0, 10)]));
        assert_eq!(tour.order(), &[0, 1, 2]);
        assert_eq!(format!("{:.2}", tour.length()), "34.14");
    }

    #[test]
    fn inserts_each_point_at_its_cheapest_edge() {
        // Square corners given out of order; 3 belongs between 2 and 0.
        let tour = cheapest_insertion_tour(&points(&[(0, 0), (0, 4), (4, 4), (4, 0)]));
        assert_eq!(tour.order(), &[0, 1, 2, 3]);
        assert!((tour.length() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_the_earliest_edge() {
        // All points coincide, so every edge costs nothing; insert after position 0.
        let tour = cheapest_insertion_tour(&points(&[(1, 1); 5]));
        assert_eq!(tour.order(), &[0, 4, 3, 1, 2]);
        assert_eq!(tour.length(), 0.0);
    }

    #[test]
    fn order_is_a_permutation_starting_at_zero() {
        let pts = points(&[
            (5, 9),
            (-3, 2),
            (8, -1),
            (0, 0),
            (12, 7),
            (-6, -6),
            (4, 4),
            (9, 3),
        ]);
        let tour = cheapest_insertion_tour(&pts);
        assert_eq!(tour.order()[0], 0);

        let mut sorted = tour.order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..pts.len()).collect::<Vec<_>>());

        let expected = crate::geometry::tour_length(&pts, tour.order());
        assert!((tour.length() - expected).abs() < 1e-9);
    }

    #[test]
    fn building_twice_gives_identical_tours() {
        let pts = points(&[(0, 0), (9, 2), (-4, 7), (3, -6), (5, 5), (-8, -1), (1, 3)]);
        let first = cheapest_insertion_tour(&pts);
        let second = cheapest_insertion_tour(&pts);
        assert_eq!(first, second);
    }
}
