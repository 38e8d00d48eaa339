//! Painter's-algorithm draw pass over a projected [`Frame`].

use crate::constants::{INTERACTIVE_SIZE_MULTIPLIER, POINT_OPACITY_MIN};
use crate::neighbors::Edge;
use crate::projection::{perspective_scale, Projected};
use crate::state::{Frame, MeshScene};
use glam::Vec2;
use std::cmp::Ordering;

/// Minimal 2D drawing target. Coordinates are CSS pixels.
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str);
    fn circle(&mut self, center: Vec2, radius: f32, color: &str);
}

#[inline]
fn screen(p: &Projected) -> Vec2 {
    Vec2::new(p.x, p.y)
}

#[inline]
fn drawable(p: &Projected) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.scale.is_finite()
}

/// Normalized nearness in [0, 1]: 0 at the back of the sphere, 1 at the front.
fn depth_cue(scale: f32, far: f32, near: f32) -> f32 {
    if near - far <= f32::EPSILON {
        return 1.0;
    }
    ((scale - far) / (near - far)).clamp(0.0, 1.0)
}

/// Far-to-near order by camera-space depth (larger z is farther).
fn far_first(a: f32, b: f32) -> Ordering {
    b.total_cmp(&a)
}

pub fn draw_frame<S: Surface + ?Sized>(scene: &MeshScene, frame: &Frame, surface: &mut S) {
    let cfg = scene.config();
    let vp = scene.viewport();
    surface.clear(vp.width, vp.height);
    surface.fill_rect(0.0, 0.0, vp.width, vp.height, &cfg.background_color.rgba(1.0));

    let far = perspective_scale(cfg.depth, scene.radius());
    let near = perspective_scale(cfg.depth, -scene.radius());
    let pts = &frame.projected;

    // Graph edges, back to front by mean endpoint depth.
    let mut edges: Vec<(f32, Edge)> = scene
        .edges()
        .iter()
        .filter(|e| e.a < pts.len() && e.b < pts.len())
        .map(|e| ((pts[e.a].z + pts[e.b].z) * 0.5, *e))
        .collect();
    edges.sort_by(|x, y| far_first(x.0, y.0));
    for (_, e) in &edges {
        let (pa, pb) = (&pts[e.a], &pts[e.b]);
        if !drawable(pa) || !drawable(pb) {
            continue;
        }
        let cue = depth_cue((pa.scale + pb.scale) * 0.5, far, near);
        let alpha = cfg.edge_opacity * (0.3 + 0.7 * cue);
        surface.line(screen(pa), screen(pb), cfg.line_width, &cfg.edge_color.rgba(alpha));
    }

    // Live connections from the pointer node sit on top of the graph.
    if let Some(node) = &frame.interactive {
        if drawable(&node.projected) {
            let color = cfg.interactive_color.rgba((cfg.edge_opacity * 2.0).min(1.0));
            for &j in node.neighbors.iter().filter(|&&j| j < pts.len()) {
                if drawable(&pts[j]) {
                    surface.line(screen(&node.projected), screen(&pts[j]), cfg.line_width, &color);
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..pts.len()).collect();
    order.sort_by(|&a, &b| far_first(pts[a].z, pts[b].z));
    for i in order {
        let p = &pts[i];
        let size = cfg.point_size * p.scale;
        if !drawable(p) || !size.is_finite() || size <= 0.0 {
            continue;
        }
        let cue = depth_cue(p.scale, far, near);
        let alpha = POINT_OPACITY_MIN + (1.0 - POINT_OPACITY_MIN) * cue;
        surface.circle(screen(p), size, &cfg.point_color.rgba(alpha));
    }

    if let Some(node) = &frame.interactive {
        let p = &node.projected;
        let size = cfg.point_size * INTERACTIVE_SIZE_MULTIPLIER * p.scale;
        if drawable(p) && size.is_finite() && size > 0.0 {
            surface.circle(screen(p), size, &cfg.interactive_color.rgba(1.0));
        }
    }
}
