use terra_tour_derive::{KvDisplay, New};

use crate::{Point, geometry};

/// A closed tour: `order` visits every point once and returns to `order[0]`.
#[derive(Clone, Debug, PartialEq, New)]
pub struct Tour {
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    /// Builds a tour from a visiting order, measuring its closed length.
    pub fn from_order(points: &[Point], order: Vec<usize>) -> Self {
        let length = geometry::tour_length(points, &order);
        Self { order, length }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn metrics(&self, points: &[Point]) -> TourMetrics {
        let n = self.len();

        if n < 2 {
            log::info!("metrics: n < 2 so there's nothing to report");
            return TourMetrics::default();
        }

        let (total, longest) = (0..n)
            .map(|i| geometry::distance(points[self.order[i]], points[self.order[(i + 1) % n]]))
            .fold((0.0, 0.0_f64), |(sum, max), d| (sum + d, max.max(d)));
        let metrics = TourMetrics::new(total, longest, total / n as f64);

        log::info!("metrics: n={n} {metrics}");
        metrics
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, New, KvDisplay)]
pub struct TourMetrics {
    #[kv(fmt = "fixed2")]
    pub total: f64,
    #[kv(fmt = "fixed2")]
    pub longest: f64,
    #[kv(fmt = "fixed2")]
    pub average: f64,
}
