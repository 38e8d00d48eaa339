//! Per-frame motion: global rotation with drag inertia and per-point drift.
//!
//! All rates are defined per 60 Hz reference frame and scaled by the number of
//! reference frames elapsed, so motion speed does not depend on display refresh
//! rate. Elapsed time is clamped first so that a backgrounded tab resumes
//! without a jump.

use crate::constants::{DRIFT_MODULATION, REFERENCE_FRAME_SEC};
use crate::geometry::SpherePoint;
use std::f32::consts::PI;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub angle_x: f32,
    pub angle_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl RotationState {
    /// Advance by `frames` reference frames. `auto` carries the auto-rotation
    /// rates and is `None` while reduced motion is requested; drag inertia is
    /// applied either way and then decays by `damping` per reference frame.
    pub fn advance(&mut self, frames: f32, auto: Option<(f32, f32)>, damping: f32) {
        if let Some((rate_x, rate_y)) = auto {
            self.angle_x += rate_x * frames;
            self.angle_y += rate_y * frames;
        }
        self.angle_x += self.velocity_x * frames;
        self.angle_y += self.velocity_y * frames;
        let decay = damping.clamp(0.0, 1.0).powf(frames);
        self.velocity_x *= decay;
        self.velocity_y *= decay;
    }

    /// Feed a pointer-drag delta (CSS pixels) into the angular velocity.
    /// Horizontal motion spins around Y, vertical motion tilts around X.
    pub fn add_drag(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.velocity_y += dx * sensitivity;
        self.velocity_x += dy * sensitivity;
    }
}

#[inline]
pub fn clamp_frame_delta(dt: Duration, max: Duration) -> Duration {
    dt.min(max)
}

/// Number of 60 Hz reference frames covered by `dt`.
#[inline]
pub fn reference_frames(dt: Duration) -> f32 {
    dt.as_secs_f32() / REFERENCE_FRAME_SEC
}

/// Per-index speed factor so neighbouring points do not drift in lockstep.
#[inline]
pub fn drift_modulation(index: usize) -> f32 {
    1.0 + DRIFT_MODULATION * (index as f32 * 0.618).sin()
}

/// Reflect `phi` back into [0, π]. Returns true when a reflection happened.
#[inline]
pub fn reflect_phi(phi: &mut f32) -> bool {
    if *phi < 0.0 {
        *phi = (-*phi).min(PI);
        true
    } else if *phi > PI {
        *phi = (2.0 * PI - *phi).max(0.0);
        true
    } else {
        false
    }
}

/// Advance every point's spherical angles and refresh its Cartesian position.
pub fn drift_points(points: &mut [SpherePoint], frames: f32, speed: f32, radius: f32) {
    for (i, p) in points.iter_mut().enumerate() {
        let step = speed * drift_modulation(i) * frames;
        p.phi += p.drift_phi * step;
        p.theta += p.drift_theta * step;
        if reflect_phi(&mut p.phi) {
            p.drift_phi = -p.drift_phi;
        }
        p.refresh_position(radius);
    }
}
