use crate::constants::MIN_DEPTH_FRACTION;
use glam::{Mat3, Vec2, Vec3};

/// Screen-space result of projecting one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Rotated (camera-space) depth; smaller is nearer.
    pub z: f32,
    pub scale: f32,
}

#[inline]
fn rotation_matrix(angle_x: f32, angle_y: f32) -> Mat3 {
    Mat3::from_rotation_x(angle_x) * Mat3::from_rotation_y(angle_y)
}

/// Rotate about Y by `angle_y`, then about X by `angle_x`.
#[inline]
pub fn rotate(p: Vec3, angle_x: f32, angle_y: f32) -> Vec3 {
    rotation_matrix(angle_x, angle_y) * p
}

/// Exact inverse of [`rotate`]: undo the X rotation first, then Y.
#[inline]
pub fn unrotate(p: Vec3, angle_x: f32, angle_y: f32) -> Vec3 {
    Mat3::from_rotation_y(-angle_y) * (Mat3::from_rotation_x(-angle_x) * p)
}

/// Perspective scale `depth / (depth + z)`. The denominator is floored at a
/// small fraction of `depth` so points behind the eye never blow up or flip.
#[inline]
pub fn perspective_scale(depth: f32, z: f32) -> f32 {
    let floor = depth * MIN_DEPTH_FRACTION;
    depth / (depth + z).max(floor)
}

/// Rotate `p`, apply the perspective divide and offset by `center`.
#[inline]
pub fn project(p: Vec3, angle_x: f32, angle_y: f32, depth: f32, center: Vec2) -> Projected {
    let r = rotate(p, angle_x, angle_y);
    let scale = perspective_scale(depth, r.z);
    Projected {
        x: center.x + r.x * scale,
        y: center.y + r.y * scale,
        z: r.z,
        scale,
    }
}
