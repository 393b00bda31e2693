//! Prim's minimum spanning tree, in two flavors.
//!
//! [`SpanningTree::build`] honors terrain: land and sea points only connect
//! through coast points, and a point that cannot be reached is an error.
//! [`bound_weight`] ignores terrain and returns only the weight over an
//! arbitrary subset; the exact tour search uses it as a completion bound.

use crate::{
    Error, Point, Result,
    constants::ROOT,
    geometry::{self, DistanceMatrix},
};

/// Per-point Prim state, alive for one build.
#[derive(Clone, Copy, Debug)]
struct PrimNode {
    visited: bool,
    /// Squared length of the cheapest known edge into the tree.
    distance: f64,
    parent: Option<usize>,
}

impl Default for PrimNode {
    fn default() -> Self {
        Self {
            visited: false,
            distance: f64::INFINITY,
            parent: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpanningTree {
    weight: f64,
    /// `parents[v]` is the tree neighbor of `v` toward the root; `None` only
    /// for the root.
    parents: Vec<Option<usize>>,
}

impl SpanningTree {
    #[terra_tour_derive::timer("spanning")]
    pub fn build(points: &[Point]) -> Result<Self> {
        let n = points.len();
        let mut nodes = vec![PrimNode::default(); n];
        if let Some(root) = nodes.get_mut(ROOT) {
            root.distance = 0.0;
        }

        for _ in 0..n {
            let mut current = None;
            let mut min_distance = f64::INFINITY;
            for (idx, node) in nodes.iter().enumerate() {
                if !node.visited && node.distance < min_distance {
                    min_distance = node.distance;
                    current = Some(idx);
                }
            }

            let Some(current) = current else {
                let point = nodes.iter().position(|node| !node.visited).unwrap_or(ROOT);
                log::warn!(
                    "spanning: unreachable point={point} category={:?}",
                    points[point].category()
                );
                return Err(Error::Unreachable { point });
            };

            nodes[current].visited = true;
            let from = points[current];
            for (idx, node) in nodes.iter_mut().enumerate() {
                if node.visited {
                    continue;
                }
                let cost = geometry::connection_cost(from, points[idx]);
                if cost < node.distance {
                    node.distance = cost;
                    node.parent = Some(current);
                }
            }
        }

        let weight = nodes.iter().map(|node| node.distance.sqrt()).sum();
        let parents = nodes.into_iter().map(|node| node.parent).collect();

        log::info!("spanning: complete n={n} weight={weight:.2}");
        Ok(Self { weight, parents })
    }

    /// Sum of true edge lengths.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.parents[idx]
    }

    /// One `(smaller, larger)` pair per non-root point, in point order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(child, parent)| parent.map(|p| (p.min(child), p.max(child))))
    }
}

/// Weight of a minimum spanning tree over `subset`, without terrain limits.
///
/// `scratch` is reused between calls so the search does not allocate per
/// node; its contents on entry are ignored.
pub(crate) fn bound_weight(
    matrix: &DistanceMatrix,
    subset: &[usize],
    scratch: &mut Vec<(usize, f64)>,
) -> f64 {
    let Some((&first, rest)) = subset.split_first() else {
        return 0.0;
    };

    scratch.clear();
    scratch.extend(rest.iter().map(|&v| (v, matrix.get(first, v))));

    let mut total = 0.0;
    while !scratch.is_empty() {
        let mut pos = 0;
        for (idx, entry) in scratch.iter().enumerate().skip(1) {
            if entry.1 < scratch[pos].1 {
                pos = idx;
            }
        }

        let (joined, cost) = scratch.swap_remove(pos);
        total += cost;
        for entry in scratch.iter_mut() {
            let candidate = matrix.get(joined, entry.0);
            if candidate < entry.1 {
                entry.1 = candidate;
            }
        }
    }
    total
}
