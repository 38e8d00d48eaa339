// Host-side tests for the k-nearest-neighbor graph.

use glam::Vec3;
use mesh_core::geometry::{fibonacci_sphere, SpherePoint};
use mesh_core::neighbors::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::f32::consts::PI;
use std::time::Duration;

fn sphere(n: usize) -> Vec<SpherePoint> {
    fibonacci_sphere(n, 100.0, &mut StdRng::seed_from_u64(n as u64))
}

#[test]
fn edge_new_is_canonical_and_rejects_self_loops() {
    assert_eq!(Edge::new(5, 2), Some(Edge { a: 2, b: 5 }));
    assert_eq!(Edge::new(2, 5), Edge::new(5, 2));
    assert_eq!(Edge::new(3, 3), None);
}

#[test]
fn angular_distance_handles_parallel_and_opposite() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert!(angular_distance(v, v * 7.0).abs() < 1e-3);
    assert!((angular_distance(v, -v) - PI).abs() < 1e-3);
    let d = angular_distance(Vec3::X, Vec3::Y);
    assert!((d - PI / 2.0).abs() < 1e-5);
    assert!(!angular_distance(Vec3::ZERO, Vec3::X).is_nan());
}

#[test]
fn no_duplicates_or_self_loops() {
    for n in [8usize, 13, 50, 120] {
        for k in 1..=6 {
            let pts = sphere(n);
            let edges = build_edges(&BruteForce::new(&pts), k, PI);
            let unique: HashSet<_> = edges.iter().copied().collect();
            assert_eq!(unique.len(), edges.len(), "duplicate edge n={n} k={k}");
            for e in &edges {
                assert!(e.a < e.b, "non-canonical or self-loop {e:?}");
                assert!(e.b < n);
            }
        }
    }
}

#[test]
fn edges_respect_max_angle() {
    let pts = sphere(100);
    let max_angle = 0.3;
    let edges = build_edges(&BruteForce::new(&pts), 4, max_angle);
    assert!(!edges.is_empty());
    for e in &edges {
        let d = angular_distance(pts[e.a].position, pts[e.b].position);
        assert!(d <= max_angle + 1e-6, "edge {e:?} spans {d}");
    }
}

#[test]
fn small_graph_every_point_connected() {
    let pts = sphere(8);
    let edges = build_edges(&BruteForce::new(&pts), 1, PI);
    assert!(!edges.is_empty());
    for i in 0..pts.len() {
        assert!(
            edges.iter().any(|e| e.a == i || e.b == i),
            "point {i} has no edge"
        );
    }
}

#[test]
fn zero_k_is_treated_as_one() {
    let pts = sphere(8);
    let edges = build_edges(&BruteForce::new(&pts), 0, PI);
    assert!(!edges.is_empty());
}

#[test]
fn tiny_threshold_yields_no_edges() {
    let pts = sphere(20);
    assert!(build_edges(&BruteForce::new(&pts), 3, 1e-4).is_empty());
}

#[test]
fn degree_may_exceed_k() {
    // One hub with several satellites: each satellite's nearest is the hub.
    let hub = SpherePoint::new(0.0, 0.0, 0.0, 0.0, 1.0);
    let mut pts = vec![hub];
    for i in 0..5 {
        pts.push(SpherePoint::new(0.2, i as f32 * 1.25, 0.0, 0.0, 1.0));
    }
    let edges = build_edges(&BruteForce::new(&pts), 1, PI);
    let hub_degree = edges.iter().filter(|e| e.a == 0).count();
    assert!(hub_degree > 1, "hub degree {hub_degree}");
}

#[test]
fn nearest_is_sorted_and_excludes_self() {
    let pts = sphere(60);
    let q = BruteForce::new(&pts);
    let got = q.nearest(pts[10].position, 5, PI, Some(10));
    assert_eq!(got.len(), 5);
    assert!(!got.contains(&10));
    let angles: Vec<f32> = got
        .iter()
        .map(|&j| angular_distance(pts[10].position, pts[j].position))
        .collect();
    assert!(angles.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn schedule_rate_limits_rebuilds() {
    let mut s = EdgeSchedule::default();
    let interval = Duration::from_millis(400);
    assert!(s.due(Duration::ZERO, interval, true));
    s.mark(Duration::from_millis(100));
    assert!(!s.due(Duration::from_millis(300), interval, true));
    assert!(s.due(Duration::from_millis(300), interval, false));
    assert!(s.due(Duration::from_millis(500), interval, true));
    s.reset();
    assert!(s.due(Duration::from_millis(501), interval, true));
}
