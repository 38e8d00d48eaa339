//! Owned per-instance scene state and the pure per-frame update.
//!
//! `MeshScene::step` advances rotation, drift and the neighbor graph and
//! returns the projected frame; drawing is a separate pass over that result
//! (see `render`), so the update can be exercised without a canvas.

use crate::config::{ConfigError, MeshConfig, MeshOptions};
use crate::events::{EventQueue, MeshEvent};
use crate::geometry::{fibonacci_sphere, sphere_radius, SpherePoint};
use crate::interactive::{interactive_node, InteractiveNode, InteractiveParams};
use crate::motion::{clamp_frame_delta, drift_points, reference_frames, RotationState};
use crate::neighbors::{build_edges, BruteForce, Edge, EdgeSchedule};
use crate::projection::{project, Projected};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// CSS pixels.
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
                pixel_ratio
            } else {
                1.0
            },
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub position: Option<Vec2>,
    pub fine: bool,
    pub dragging: bool,
    last_drag: Option<Vec2>,
}

/// Projected output of one `step`.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub projected: Vec<Projected>,
    pub interactive: Option<InteractiveNode>,
}

pub struct MeshScene {
    config: MeshConfig,
    viewport: Viewport,
    radius: f32,
    points: Vec<SpherePoint>,
    edges: Vec<Edge>,
    rotation: RotationState,
    schedule: EdgeSchedule,
    clock: Duration,
    reduced_motion: bool,
    pointer: PointerState,
    rng: StdRng,
}

impl MeshScene {
    pub fn new(config: MeshConfig, viewport: Viewport, seed: u64) -> Self {
        let mut scene = Self {
            config,
            viewport,
            radius: 0.0,
            points: Vec::new(),
            edges: Vec::new(),
            rotation: RotationState::default(),
            schedule: EdgeSchedule::default(),
            clock: Duration::ZERO,
            reduced_motion: false,
            pointer: PointerState::default(),
            rng: StdRng::seed_from_u64(seed),
        };
        scene.regenerate();
        scene
    }

    /// Rebuild the sphere for the current config and viewport. Prior
    /// positions and edges are discarded; rotation is kept.
    pub fn regenerate(&mut self) {
        self.radius = sphere_radius(
            self.viewport.width,
            self.viewport.height,
            self.config.radius_fraction,
        );
        self.points = fibonacci_sphere(self.config.point_count, self.radius, &mut self.rng);
        self.edges.clear();
        self.schedule.reset();
        log::info!(
            "[mesh] regenerated points={} radius={:.1} viewport={:.0}x{:.0}",
            self.points.len(),
            self.radius,
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Merge host-supplied options and regenerate geometry.
    pub fn set_options(&mut self, opts: &MeshOptions) -> Result<(), ConfigError> {
        self.config.merge(opts)?;
        self.regenerate();
        Ok(())
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.regenerate();
    }

    pub fn apply_event(&mut self, ev: MeshEvent) {
        match ev {
            MeshEvent::Resize {
                width,
                height,
                pixel_ratio,
            } => self.resize(Viewport::new(width, height, pixel_ratio)),
            MeshEvent::ReducedMotion(r) => self.reduced_motion = r,
            MeshEvent::PointerCapability { fine } => self.pointer.fine = fine,
            MeshEvent::PointerMove { x, y } => {
                let p = Vec2::new(x, y);
                if self.pointer.dragging {
                    if let Some(last) = self.pointer.last_drag {
                        let d = p - last;
                        self.rotation
                            .add_drag(d.x, d.y, self.config.drag_sensitivity);
                    }
                    self.pointer.last_drag = Some(p);
                }
                self.pointer.position = Some(p);
            }
            MeshEvent::PointerDown { x, y } => {
                let p = Vec2::new(x, y);
                self.pointer.dragging = true;
                self.pointer.last_drag = Some(p);
                self.pointer.position = Some(p);
            }
            MeshEvent::PointerUp => {
                self.pointer.dragging = false;
                self.pointer.last_drag = None;
            }
            MeshEvent::PointerLeave => {
                self.pointer.position = None;
                self.pointer.dragging = false;
                self.pointer.last_drag = None;
            }
        }
    }

    /// Apply every queued event in arrival order.
    pub fn apply_events(&mut self, queue: &mut EventQueue) {
        for ev in queue.drain() {
            self.apply_event(ev);
        }
    }

    /// Advance the scene by `dt` (clamped) and project it.
    pub fn step(&mut self, dt: Duration) -> Frame {
        let dt = clamp_frame_delta(dt, self.config.max_frame_delta);
        self.clock += dt;
        let frames = reference_frames(dt);

        let auto = (!self.reduced_motion)
            .then_some((self.config.rotation_speed_x, self.config.rotation_speed_y));
        self.rotation.advance(frames, auto, self.config.damping);
        if !self.reduced_motion {
            drift_points(&mut self.points, frames, self.config.drift_speed, self.radius);
        }

        if self
            .schedule
            .due(self.clock, self.config.edge_interval, !self.edges.is_empty())
        {
            self.rebuild_edges();
        }

        let center = self.viewport.center();
        let projected = self
            .points
            .iter()
            .map(|p| {
                project(
                    p.position,
                    self.rotation.angle_x,
                    self.rotation.angle_y,
                    self.config.depth,
                    center,
                )
            })
            .collect();

        Frame {
            projected,
            interactive: self.interactive(),
        }
    }

    pub fn rebuild_edges(&mut self) {
        self.edges = build_edges(
            &BruteForce::new(&self.points),
            self.config.neighbor_count,
            self.config.max_neighbor_angle,
        );
        self.schedule.mark(self.clock);
        log::debug!("[mesh] edges rebuilt count={}", self.edges.len());
    }

    /// The pointer-driven node, when a fine pointer is inside the canvas.
    pub fn interactive(&self) -> Option<InteractiveNode> {
        if !self.pointer.fine {
            return None;
        }
        let pointer = self.pointer.position.filter(|p| self.viewport.contains(*p))?;
        let params = InteractiveParams {
            radius: self.radius,
            center: self.viewport.center(),
            depth: self.config.depth,
            neighbor_count: self.config.neighbor_count,
            max_angle: self.config.max_neighbor_angle,
        };
        Some(interactive_node(
            &BruteForce::new(&self.points),
            pointer,
            &self.rotation,
            &params,
        ))
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn points(&self) -> &[SpherePoint] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}
