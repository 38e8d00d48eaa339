use crate::color::Rgb;
use std::f32::consts::PI;
use std::time::Duration;

// Default tuning for the point mesh. Angles are radians; per-frame rates are
// expressed against a 60 Hz reference frame.

// Geometry
pub const MIN_POINTS: usize = 8;
pub const MAX_POINTS: usize = 2_000; // edge rebuild is O(N²)
pub const DEFAULT_POINT_COUNT: usize = 110;
pub const DEFAULT_RADIUS_FRACTION: f32 = 0.38; // sphere radius / min(viewport w, h)
pub const GOLDEN_ANGLE: f32 = 2.399_963_2; // π(3 - √5)
pub const DRIFT_RATE_MAX: f32 = 0.0025; // per-point angular drift, radians per reference frame

// Neighbor graph
pub const MIN_NEIGHBORS: usize = 1;
pub const DEFAULT_NEIGHBOR_COUNT: usize = 3;
pub const DEFAULT_MAX_NEIGHBOR_ANGLE: f32 = 0.55;
pub const DEFAULT_EDGE_INTERVAL: Duration = Duration::from_millis(400);

// Motion
pub const REFERENCE_FRAME_SEC: f32 = 1.0 / 60.0;
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);
pub const DEFAULT_ROTATION_SPEED_X: f32 = 0.0009;
pub const DEFAULT_ROTATION_SPEED_Y: f32 = 0.0021;
pub const DEFAULT_DRIFT_SPEED: f32 = 1.0;
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 0.00012;
pub const DEFAULT_DAMPING: f32 = 0.94; // velocity multiplier per reference frame
pub const DRIFT_MODULATION: f32 = 0.35; // per-index desync amplitude

// Projection
pub const DEFAULT_DEPTH: f32 = 600.0;
pub const MIN_DEPTH_FRACTION: f32 = 0.05; // floor for (depth + z) as a fraction of depth

// Drawing
pub const DEFAULT_POINT_SIZE: f32 = 2.2;
pub const DEFAULT_LINE_WIDTH: f32 = 0.8;
pub const DEFAULT_EDGE_OPACITY: f32 = 0.35;
pub const POINT_OPACITY_MIN: f32 = 0.25;
pub const INTERACTIVE_SIZE_MULTIPLIER: f32 = 1.8;
pub const DEFAULT_POINT_COLOR: Rgb = Rgb::new(0xcf, 0xe7, 0xff);
pub const DEFAULT_EDGE_COLOR: Rgb = Rgb::new(0x6e, 0x8f, 0xb4);
pub const DEFAULT_BACKGROUND_COLOR: Rgb = Rgb::new(0x0a, 0x0e, 0x18);
pub const DEFAULT_INTERACTIVE_COLOR: Rgb = Rgb::new(0xff, 0xd2, 0x7a);

pub const MAX_ANGLE: f32 = PI;
