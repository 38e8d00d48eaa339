//! k-nearest-neighbor graph over sphere points, by angular distance.
//!
//! Queries go through [`NeighborQuery`] so the brute-force O(N²) scan can be
//! swapped for a spatial index without touching the renderer.

use crate::constants::MIN_NEIGHBORS;
use crate::geometry::SpherePoint;
use fnv::FnvHashSet;
use glam::Vec3;
use smallvec::SmallVec;
use std::time::Duration;

/// Neighbor indices, nearest first.
pub type Neighbors = SmallVec<[usize; 8]>;

/// Undirected edge in canonical form (`a < b`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    /// Canonical edge between `i` and `j`, or `None` for a self-loop.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
            std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Angle in radians between two direction vectors. The cosine is clamped so
/// floating-point drift never leaves the domain of `acos`.
#[inline]
pub fn angular_distance(u: Vec3, v: Vec3) -> f32 {
    let denom = u.length() * v.length();
    if denom <= f32::EPSILON {
        return std::f32::consts::PI;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0).acos()
}

pub trait NeighborQuery {
    /// Up to `k` points within `max_angle` of `target`, nearest first.
    /// `exclude` removes one index from consideration (the query point itself).
    fn nearest(&self, target: Vec3, k: usize, max_angle: f32, exclude: Option<usize>) -> Neighbors;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of point `index` as seen by this query structure.
    fn position(&self, index: usize) -> Vec3;
}

/// Linear scan over every point. Fine for a few hundred points at a
/// multi-hundred-millisecond rebuild interval.
pub struct BruteForce<'a> {
    points: &'a [SpherePoint],
}

impl<'a> BruteForce<'a> {
    pub fn new(points: &'a [SpherePoint]) -> Self {
        Self { points }
    }
}

impl NeighborQuery for BruteForce<'_> {
    fn nearest(&self, target: Vec3, k: usize, max_angle: f32, exclude: Option<usize>) -> Neighbors {
        let mut candidates: Vec<(f32, usize)> = self
            .points
            .iter()
            .enumerate()
            .filter(|(j, _)| Some(*j) != exclude)
            .map(|(j, p)| (angular_distance(target, p.position), j))
            .filter(|(angle, _)| *angle <= max_angle)
            .collect();
        candidates.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));
        candidates.into_iter().take(k).map(|(_, j)| j).collect()
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn position(&self, index: usize) -> Vec3 {
        self.points[index].position
    }
}

/// Rebuild the full edge list: every point links to its `k` nearest
/// neighbors within `max_angle`. Edges are deduplicated, so a point may end up
/// with more than `k` incident edges when others pick it too.
pub fn build_edges<Q: NeighborQuery + ?Sized>(query: &Q, k: usize, max_angle: f32) -> Vec<Edge> {
    let k = k.max(MIN_NEIGHBORS);
    let mut seen: FnvHashSet<Edge> = FnvHashSet::default();
    for i in 0..query.len() {
        for j in query.nearest(query.position(i), k, max_angle, Some(i)) {
            if let Some(edge) = Edge::new(i, j) {
                seen.insert(edge);
            }
        }
    }
    let mut edges: Vec<Edge> = seen.into_iter().collect();
    edges.sort_unstable();
    edges
}

/// Rate limiter for edge rebuilds, driven by the scene clock.
#[derive(Clone, Debug, Default)]
pub struct EdgeSchedule {
    last_rebuild: Option<Duration>,
}

impl EdgeSchedule {
    /// A rebuild is due when there are no edges yet or `interval` has elapsed.
    pub fn due(&self, now: Duration, interval: Duration, have_edges: bool) -> bool {
        if !have_edges {
            return true;
        }
        match self.last_rebuild {
            None => true,
            Some(t) => now.saturating_sub(t) >= interval,
        }
    }

    pub fn mark(&mut self, now: Duration) {
        self.last_rebuild = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_rebuild = None;
    }
}
