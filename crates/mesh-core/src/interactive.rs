//! Pointer-driven ephemeral node on the sphere surface.

use crate::motion::RotationState;
use crate::neighbors::{NeighborQuery, Neighbors};
use crate::projection::{project, unrotate, Projected};
use glam::{Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct InteractiveNode {
    /// Object-space position on the sphere.
    pub position: Vec3,
    pub projected: Projected,
    pub neighbors: Neighbors,
}

/// Map a canvas-space pointer to an object-space point on the sphere.
///
/// The pointer is taken onto the unit disk around `center` (clamped to the
/// rim), lifted onto the near hemisphere with `z = -sqrt(1 - x² - y²)`, then
/// un-rotated by the current rotation.
pub fn pointer_to_sphere(
    pointer: Vec2,
    center: Vec2,
    radius: f32,
    rotation: &RotationState,
) -> Vec3 {
    let mut d = if radius > 0.0 {
        (pointer - center) / radius
    } else {
        Vec2::ZERO
    };
    let len = d.length();
    if len > 1.0 {
        d /= len;
    }
    let z = -(1.0 - d.length_squared()).max(0.0).sqrt();
    let camera = Vec3::new(d.x, d.y, z);
    unrotate(camera, rotation.angle_x, rotation.angle_y) * radius
}

#[derive(Clone, Copy, Debug)]
pub struct InteractiveParams {
    pub radius: f32,
    pub center: Vec2,
    pub depth: f32,
    pub neighbor_count: usize,
    pub max_angle: f32,
}

/// Build this frame's interactive node for a pointer at `pointer`.
pub fn interactive_node<Q: NeighborQuery + ?Sized>(
    query: &Q,
    pointer: Vec2,
    rotation: &RotationState,
    params: &InteractiveParams,
) -> InteractiveNode {
    let position = pointer_to_sphere(pointer, params.center, params.radius, rotation);
    let projected = project(
        position,
        rotation.angle_x,
        rotation.angle_y,
        params.depth,
        params.center,
    );
    let neighbors = query.nearest(position, params.neighbor_count.max(1), params.max_angle, None);
    InteractiveNode {
        position,
        projected,
        neighbors,
    }
}
