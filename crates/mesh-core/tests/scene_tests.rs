// Host-side tests for the owned scene state and its per-frame update.

use mesh_core::constants::{MAX_POINTS, MIN_POINTS};
use mesh_core::{EventQueue, MeshConfig, MeshEvent, MeshOptions, MeshScene, Viewport};
use std::f32::consts::PI;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn scene_with(opts: &str) -> MeshScene {
    let mut config = MeshConfig::default();
    config.merge(&MeshOptions::from_json(opts).unwrap()).unwrap();
    MeshScene::new(config, Viewport::new(400.0, 300.0, 2.0), 42)
}

#[test]
fn new_scene_has_configured_points_and_no_edges() {
    let scene = scene_with(r#"{"pointCount": 64}"#);
    assert_eq!(scene.point_count(), 64);
    assert_eq!(scene.edge_count(), 0);
    assert!((scene.radius() - 300.0 * scene.config().radius_fraction).abs() < 1e-3);
}

#[test]
fn first_step_builds_edges_immediately() {
    let mut scene =
        scene_with(r#"{"pointCount": 8, "neighborCount": 1, "maxNeighborAngle": 3.14159}"#);
    let frame = scene.step(FRAME);
    assert_eq!(frame.projected.len(), 8);
    assert!(scene.edge_count() > 0);
}

#[test]
fn edges_rebuild_only_after_interval() {
    let mut scene = scene_with(r#"{"edgeIntervalMs": 1000, "maxNeighborAngle": 3.14}"#);
    scene.step(FRAME);
    let first = scene.edges().to_vec();
    // Scramble drift so a rebuild would likely differ, but stay inside the interval.
    for _ in 0..10 {
        scene.step(FRAME);
    }
    assert_eq!(scene.edges(), first.as_slice());
}

#[test]
fn phi_stays_valid_through_long_run() {
    let mut scene = scene_with(r#"{"driftSpeed": 40}"#);
    for _ in 0..2_000 {
        scene.step(FRAME);
    }
    for p in scene.points() {
        assert!(p.phi >= 0.0 && p.phi <= PI);
        assert!((p.position.length() - scene.radius()).abs() < 1e-2);
    }
}

#[test]
fn resize_regenerates_geometry() {
    let mut scene = scene_with("{}");
    scene.step(FRAME);
    assert!(scene.edge_count() > 0);
    scene.apply_event(MeshEvent::Resize {
        width: 1000.0,
        height: 800.0,
        pixel_ratio: 1.0,
    });
    assert_eq!(scene.edge_count(), 0);
    assert!((scene.radius() - 800.0 * scene.config().radius_fraction).abs() < 1e-3);
    for p in scene.points() {
        assert!((p.position.length() - scene.radius()).abs() < 1e-2);
    }
}

#[test]
fn huge_point_count_builds_capped_scene() {
    let mut scene = scene_with(r#"{"pointCount": 1e20}"#);
    assert_eq!(scene.point_count(), MAX_POINTS);
    scene.step(FRAME);
    assert_eq!(scene.step(FRAME).projected.len(), MAX_POINTS);
}

#[test]
fn same_size_resize_keeps_geometry() {
    let mut scene = scene_with("{}");
    scene.step(FRAME);
    let edges = scene.edge_count();
    let vp = scene.viewport();
    scene.apply_event(MeshEvent::Resize {
        width: vp.width,
        height: vp.height,
        pixel_ratio: vp.pixel_ratio,
    });
    assert_eq!(scene.edge_count(), edges);
}

#[test]
fn set_options_merges_and_regenerates() {
    let mut scene = scene_with("{}");
    scene.step(FRAME);
    let opts = MeshOptions::from_json(r#"{"pointCount": 3, "neighborCount": 0}"#).unwrap();
    scene.set_options(&opts).unwrap();
    assert_eq!(scene.point_count(), MIN_POINTS);
    assert_eq!(scene.config().neighbor_count, 1);
    assert_eq!(scene.edge_count(), 0);
}

#[test]
fn bad_options_leave_scene_untouched() {
    let mut scene = scene_with(r#"{"pointCount": 30}"#);
    let opts = MeshOptions::from_json(r#"{"pointCount": 90, "edgeColor": "blue"}"#).unwrap();
    assert!(scene.set_options(&opts).is_err());
    assert_eq!(scene.point_count(), 30);
}

#[test]
fn reduced_motion_freezes_auto_rotation_and_drift() {
    let mut scene = scene_with("{}");
    scene.step(FRAME);
    let mut q = EventQueue::new();
    q.push(MeshEvent::ReducedMotion(true));
    scene.apply_events(&mut q);
    assert!(q.is_empty());

    let before_rot = scene.rotation();
    let before_pts: Vec<_> = scene.points().iter().map(|p| (p.phi, p.theta)).collect();
    scene.step(FRAME);
    assert_eq!(scene.rotation().angle_x, before_rot.angle_x);
    assert_eq!(scene.rotation().angle_y, before_rot.angle_y);
    let after_pts: Vec<_> = scene.points().iter().map(|p| (p.phi, p.theta)).collect();
    assert_eq!(before_pts, after_pts);
}

#[test]
fn drag_inertia_still_applies_under_reduced_motion() {
    let mut scene = scene_with("{}");
    scene.apply_event(MeshEvent::ReducedMotion(true));
    scene.apply_event(MeshEvent::PointerDown { x: 100.0, y: 100.0 });
    scene.apply_event(MeshEvent::PointerMove { x: 160.0, y: 100.0 });
    scene.apply_event(MeshEvent::PointerUp);
    let before = scene.rotation().angle_y;
    scene.step(FRAME);
    assert!(scene.rotation().angle_y > before);
}

#[test]
fn pointer_outside_bounds_has_no_interactive_node() {
    let mut scene = scene_with("{}");
    scene.apply_event(MeshEvent::PointerCapability { fine: true });
    scene.apply_event(MeshEvent::PointerMove { x: -5.0, y: 20.0 });
    assert!(scene.step(FRAME).interactive.is_none());
    scene.apply_event(MeshEvent::PointerMove { x: 200.0, y: 900.0 });
    assert!(scene.step(FRAME).interactive.is_none());
}

#[test]
fn interactive_node_needs_fine_pointer_and_clears_on_leave() {
    let mut scene = scene_with(r#"{"maxNeighborAngle": 1.0}"#);
    scene.apply_event(MeshEvent::PointerMove { x: 200.0, y: 150.0 });
    assert!(scene.step(FRAME).interactive.is_none());

    scene.apply_event(MeshEvent::PointerCapability { fine: true });
    let node = scene.step(FRAME).interactive.expect("active node");
    assert!(!node.neighbors.is_empty());

    scene.apply_event(MeshEvent::PointerLeave);
    assert!(scene.step(FRAME).interactive.is_none());
}

#[test]
fn large_gaps_are_clamped() {
    let mut a = scene_with("{}");
    let mut b = scene_with("{}");
    a.step(Duration::from_secs(60));
    b.step(a.config().max_frame_delta);
    assert_eq!(a.rotation(), b.rotation());
}

#[test]
fn queued_events_apply_in_arrival_order() {
    let mut scene = scene_with("{}");
    let mut q = EventQueue::new();
    q.push(MeshEvent::Resize { width: 1000.0, height: 800.0, pixel_ratio: 1.0 });
    q.push(MeshEvent::PointerCapability { fine: true });
    q.push(MeshEvent::Resize { width: 500.0, height: 200.0, pixel_ratio: 3.0 });
    assert_eq!(q.len(), 3);
    scene.apply_events(&mut q);
    assert!(q.is_empty());
    assert_eq!(scene.viewport(), Viewport::new(500.0, 200.0, 3.0));
    assert!(scene.pointer().fine);
}
