//! Platform-free core of the point mesh: geometry, neighbor graph,
//! projection, per-frame update and draw-list generation.
//!
//! Nothing here touches the DOM; the web crate feeds environment events in
//! through [`EventQueue`] and implements [`Surface`] for a 2D canvas.

pub mod color;
pub mod config;
pub mod constants;
pub mod events;
pub mod geometry;
pub mod interactive;
pub mod lifecycle;
pub mod motion;
pub mod neighbors;
pub mod projection;
pub mod render;
pub mod state;

pub use color::Rgb;
pub use config::{ConfigError, MeshConfig, MeshOptions};
pub use events::{EventQueue, MeshEvent};
pub use lifecycle::{Animator, FrameScheduler, RunState};
pub use neighbors::{build_edges, BruteForce, Edge, NeighborQuery};
pub use render::{draw_frame, Surface};
pub use state::{Frame, MeshScene, Viewport};
