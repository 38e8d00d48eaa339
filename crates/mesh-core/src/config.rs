//! Mesh configuration and the bulk "set properties" merge.
//!
//! The host page passes a loose mapping of named options; every field is
//! optional and unknown keys are ignored. Values are clamped into their valid
//! ranges on merge so that a `MeshConfig` is always usable as-is.

use crate::color::Rgb;
use crate::constants::*;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid color literal {0:?} (expected #rgb or #rrggbb)")]
    InvalidColor(String),
    #[error("malformed options: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshConfig {
    pub point_count: usize,
    pub neighbor_count: usize,
    pub max_neighbor_angle: f32,
    pub rotation_speed_x: f32,
    pub rotation_speed_y: f32,
    pub drift_speed: f32,
    pub drag_sensitivity: f32,
    pub damping: f32,
    pub depth: f32,
    pub radius_fraction: f32,
    pub edge_interval: Duration,
    pub max_frame_delta: Duration,
    pub point_size: f32,
    pub line_width: f32,
    pub edge_opacity: f32,
    pub point_color: Rgb,
    pub edge_color: Rgb,
    pub background_color: Rgb,
    pub interactive_color: Rgb,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            max_neighbor_angle: DEFAULT_MAX_NEIGHBOR_ANGLE,
            rotation_speed_x: DEFAULT_ROTATION_SPEED_X,
            rotation_speed_y: DEFAULT_ROTATION_SPEED_Y,
            drift_speed: DEFAULT_DRIFT_SPEED,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            damping: DEFAULT_DAMPING,
            depth: DEFAULT_DEPTH,
            radius_fraction: DEFAULT_RADIUS_FRACTION,
            edge_interval: DEFAULT_EDGE_INTERVAL,
            max_frame_delta: MAX_FRAME_DELTA,
            point_size: DEFAULT_POINT_SIZE,
            line_width: DEFAULT_LINE_WIDTH,
            edge_opacity: DEFAULT_EDGE_OPACITY,
            point_color: DEFAULT_POINT_COLOR,
            edge_color: DEFAULT_EDGE_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            interactive_color: DEFAULT_INTERACTIVE_COLOR,
        }
    }
}

/// Partial configuration as supplied by the host page.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeshOptions {
    pub point_count: Option<f64>,
    pub neighbor_count: Option<f64>,
    pub max_neighbor_angle: Option<f32>,
    pub rotation_speed_x: Option<f32>,
    pub rotation_speed_y: Option<f32>,
    pub drift_speed: Option<f32>,
    pub drag_sensitivity: Option<f32>,
    pub damping: Option<f32>,
    pub depth: Option<f32>,
    pub radius_fraction: Option<f32>,
    pub edge_interval_ms: Option<f64>,
    pub max_frame_delta_ms: Option<f64>,
    pub point_size: Option<f32>,
    pub line_width: Option<f32>,
    pub edge_opacity: Option<f32>,
    pub point_color: Option<String>,
    pub edge_color: Option<String>,
    pub background_color: Option<String>,
    pub interactive_color: Option<String>,
}

impl MeshOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn finite<T: Into<f64> + Copy>(v: Option<T>) -> Option<T> {
    v.filter(|x| (*x).into().is_finite())
}

fn millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

impl MeshConfig {
    /// Merge `opts` into this configuration.
    ///
    /// Colors are validated before anything is written, so a bad color leaves
    /// the configuration untouched. Non-finite numbers are ignored.
    pub fn merge(&mut self, opts: &MeshOptions) -> Result<(), ConfigError> {
        let parse = |c: &Option<String>| c.as_deref().map(str::parse::<Rgb>).transpose();
        let point_color = parse(&opts.point_color)?;
        let edge_color = parse(&opts.edge_color)?;
        let background_color = parse(&opts.background_color)?;
        let interactive_color = parse(&opts.interactive_color)?;

        if let Some(n) = finite(opts.point_count) {
            self.point_count = (n.max(0.0) as usize).clamp(MIN_POINTS, MAX_POINTS);
        }
        if let Some(k) = finite(opts.neighbor_count) {
            self.neighbor_count = (k.max(0.0) as usize).max(MIN_NEIGHBORS);
        }
        if let Some(a) = finite(opts.max_neighbor_angle) {
            self.max_neighbor_angle = a.clamp(0.0, MAX_ANGLE);
        }
        if let Some(v) = finite(opts.rotation_speed_x) {
            self.rotation_speed_x = v;
        }
        if let Some(v) = finite(opts.rotation_speed_y) {
            self.rotation_speed_y = v;
        }
        if let Some(v) = finite(opts.drift_speed) {
            self.drift_speed = v.max(0.0);
        }
        if let Some(v) = finite(opts.drag_sensitivity) {
            self.drag_sensitivity = v;
        }
        if let Some(v) = finite(opts.damping) {
            self.damping = v.clamp(0.0, 0.999);
        }
        if let Some(v) = finite(opts.depth) {
            self.depth = v.max(1.0);
        }
        if let Some(v) = finite(opts.radius_fraction) {
            self.radius_fraction = v.clamp(0.01, 1.0);
        }
        if let Some(ms) = finite(opts.edge_interval_ms) {
            self.edge_interval = millis(ms);
        }
        if let Some(ms) = finite(opts.max_frame_delta_ms) {
            self.max_frame_delta = millis(ms.max(1.0));
        }
        if let Some(v) = finite(opts.point_size) {
            self.point_size = v.max(0.0);
        }
        if let Some(v) = finite(opts.line_width) {
            self.line_width = v.max(0.0);
        }
        if let Some(v) = finite(opts.edge_opacity) {
            self.edge_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(c) = point_color {
            self.point_color = c;
        }
        if let Some(c) = edge_color {
            self.edge_color = c;
        }
        if let Some(c) = background_color {
            self.background_color = c;
        }
        if let Some(c) = interactive_color {
            self.interactive_color = c;
        }
        Ok(())
    }
}
