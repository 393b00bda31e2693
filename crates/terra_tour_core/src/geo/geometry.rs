use crate::point::Point;

/// Squared Euclidean distance between two points.
///
/// Differences are taken in `i64` so extreme `i32` coordinates cannot
/// overflow before the conversion to `f64`.
#[inline]
pub fn squared_distance(a: Point, b: Point) -> f64 {
    let dx = (i64::from(a.x) - i64::from(b.x)) as f64;
    let dy = (i64::from(a.y) - i64::from(b.y)) as f64;
    dx * dx + dy * dy
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Squared distance when the terrain of both endpoints allows an edge,
/// `f64::INFINITY` otherwise.
#[inline]
pub fn connection_cost(a: Point, b: Point) -> f64 {
    if a.category().connects(b.category()) {
        squared_distance(a, b)
    } else {
        f64::INFINITY
    }
}

/// Length of the closed cycle visiting `points[order[0]], points[order[1]], ...`.
pub fn tour_length(points: &[Point], order: &[usize]) -> f64 {
    let n = order.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| distance(points[order[i]], points[order[(i + 1) % n]]))
        .sum()
}

/// Dense symmetric table of true distances, row-major.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    pub fn new(points: &[Point]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(points[i], points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}
