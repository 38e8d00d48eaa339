use crate::constants::{DRIFT_RATE_MAX, GOLDEN_ANGLE, MAX_POINTS, MIN_POINTS};
use glam::Vec3;
use rand::Rng;

/// A point on the sphere. Spherical angles are the canonical state; the
/// Cartesian `position` is derived from them after every update.
#[derive(Clone, Debug)]
pub struct SpherePoint {
    pub phi: f32,
    pub theta: f32,
    pub drift_phi: f32,
    pub drift_theta: f32,
    pub position: Vec3,
}

impl SpherePoint {
    pub fn new(phi: f32, theta: f32, drift_phi: f32, drift_theta: f32, radius: f32) -> Self {
        let mut p = Self {
            phi,
            theta,
            drift_phi,
            drift_theta,
            position: Vec3::ZERO,
        };
        p.refresh_position(radius);
        p
    }

    #[inline]
    pub fn refresh_position(&mut self, radius: f32) {
        self.position = spherical_to_cartesian(self.phi, self.theta, radius);
    }
}

/// `phi` is the polar angle from +Y, `theta` the azimuth around Y.
#[inline]
pub fn spherical_to_cartesian(phi: f32, theta: f32, radius: f32) -> Vec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    )
}

/// Sphere radius for a viewport: a fraction of its smaller side.
#[inline]
pub fn sphere_radius(width: f32, height: f32, fraction: f32) -> f32 {
    (width.min(height) * fraction).max(0.0)
}

/// Place `count` points evenly on a sphere using the golden-angle spiral and
/// give each a small random drift on both angles.
///
/// `count` is clamped to `MIN_POINTS..=MAX_POINTS`.
pub fn fibonacci_sphere<R: Rng>(count: usize, radius: f32, rng: &mut R) -> Vec<SpherePoint> {
    let n = count.clamp(MIN_POINTS, MAX_POINTS);
    (0..n)
        .map(|i| {
            let t = 1.0 - 2.0 * (i as f32 + 0.5) / n as f32;
            let phi = t.clamp(-1.0, 1.0).acos();
            let theta = i as f32 * GOLDEN_ANGLE;
            let drift_phi = rng.gen_range(-DRIFT_RATE_MAX..=DRIFT_RATE_MAX);
            let drift_theta = rng.gen_range(-DRIFT_RATE_MAX..=DRIFT_RATE_MAX);
            SpherePoint::new(phi, theta, drift_phi, drift_theta, radius)
        })
        .collect()
}
