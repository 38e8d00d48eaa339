use crate::canvas::CanvasSurface;
use instant::Instant;
use mesh_core::{draw_frame, Animator, EventQueue, FrameScheduler, MeshEvent, MeshScene};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame`-backed scheduler. The callback is installed after
/// the owning instance exists because it holds a weak handle back to it.
#[derive(Default)]
pub struct RafScheduler {
    callback: Option<Closure<dyn FnMut()>>,
}

impl RafScheduler {
    pub fn set_callback(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }

    pub fn release(&mut self) {
        self.callback = None;
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request(&mut self) -> Option<i32> {
        let cb = self.callback.as_ref()?;
        web::window()?
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel(&mut self, handle: i32) {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(handle);
        }
    }
}

/// Everything one mounted mesh owns. Environment callbacks only push onto
/// `queue` (or start/stop the animator); the scene is mutated inside `frame`.
pub struct MeshInstance {
    pub scene: RefCell<MeshScene>,
    pub queue: RefCell<EventQueue>,
    pub animator: RefCell<Animator<RafScheduler>>,
    surface: RefCell<CanvasSurface>,
    last_instant: Cell<Option<Instant>>,
}

impl MeshInstance {
    pub fn new(scene: MeshScene, surface: CanvasSurface) -> Rc<Self> {
        let instance = Rc::new(Self {
            scene: RefCell::new(scene),
            queue: RefCell::new(EventQueue::new()),
            animator: RefCell::new(Animator::new(RafScheduler::default())),
            surface: RefCell::new(surface),
            last_instant: Cell::new(None),
        });
        let weak: Weak<Self> = Rc::downgrade(&instance);
        let tick = Closure::wrap(Box::new(move || {
            if let Some(inst) = weak.upgrade() {
                inst.tick();
            }
        }) as Box<dyn FnMut()>);
        instance
            .animator
            .borrow_mut()
            .scheduler_mut()
            .set_callback(tick);
        instance
    }

    pub fn push(&self, ev: MeshEvent) {
        self.queue.borrow_mut().push(ev);
    }

    pub fn start(&self) {
        self.last_instant.set(None);
        self.animator.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.animator.borrow_mut().stop();
    }

    /// Stop for good and drop the frame callback.
    pub fn detach(&self) {
        let mut animator = self.animator.borrow_mut();
        animator.detach();
        animator.scheduler_mut().release();
    }

    fn tick(&self) {
        if !self.animator.borrow_mut().begin_frame() {
            return;
        }
        self.frame();
        self.animator.borrow_mut().end_frame();
    }

    fn frame(&self) {
        let now = Instant::now();
        let dt = self
            .last_instant
            .replace(Some(now))
            .map(|prev| now - prev)
            .unwrap_or_default();

        let mut scene = self.scene.borrow_mut();
        scene.apply_events(&mut self.queue.borrow_mut());
        let frame = scene.step(dt);

        let mut surface = self.surface.borrow_mut();
        surface.sync(scene.viewport());
        draw_frame(&scene, &frame, &mut *surface);
    }
}
