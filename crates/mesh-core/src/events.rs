use std::collections::VecDeque;

/// Environment notifications, queued from callbacks and applied to the scene
/// once per frame boundary in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshEvent {
    /// Canvas CSS size and device pixel ratio.
    Resize { width: f32, height: f32, pixel_ratio: f32 },
    ReducedMotion(bool),
    /// Whether a fine pointer (mouse, pen) is available.
    PointerCapability { fine: bool },
    /// Pointer position in canvas CSS pixels.
    PointerMove { x: f32, y: f32 },
    PointerDown { x: f32, y: f32 },
    PointerUp,
    PointerLeave,
}

#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<MeshEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ev: MeshEvent) {
        self.events.push_back(ev);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = MeshEvent> + '_ {
        self.events.drain(..)
    }
}
