use crate::dom;
use crate::frame::MeshInstance;
use crate::input::{self, FINE_POINTER_QUERY, REDUCED_MOTION_QUERY};
use mesh_core::MeshEvent;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

enum ObserverKind {
    Intersection(web::IntersectionObserver),
    Resize(web::ResizeObserver),
}

struct Observer {
    kind: ObserverKind,
    _closure: Closure<dyn FnMut(js_sys::Array)>,
}

/// Every DOM listener and observer a mounted mesh registers. Cleared on
/// detach and on drop so nothing outlives the component.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Listener>,
    observers: Vec<Observer>,
}

impl Listeners {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<()> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind, e))?;
        self.entries.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.entries.len() + self.observers.len()
    }

    pub fn clear(&mut self) {
        for l in self.entries.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
        for o in self.observers.drain(..) {
            match o.kind {
                ObserverKind::Intersection(obs) => obs.disconnect(),
                ObserverKind::Resize(obs) => obs.disconnect(),
            }
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Register resize, preference, pointer and visibility sources for `inst`.
/// Handlers hold only weak references to the instance.
pub fn wire_all(
    listeners: &mut Listeners,
    inst: &Rc<MeshInstance>,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<()> {
    let window = dom::window()?;

    {
        let weak = Rc::downgrade(inst);
        let canvas = canvas.clone();
        listeners.add(&window, "resize", move |_| {
            let vp = dom::canvas_viewport(&canvas);
            push(&weak, MeshEvent::Resize {
                width: vp.width,
                height: vp.height,
                pixel_ratio: vp.pixel_ratio,
            });
        })?;
    }

    if let Some(mql) = dom::media_query(REDUCED_MOTION_QUERY) {
        let weak = Rc::downgrade(inst);
        let mql_for_cb = mql.clone();
        listeners.add(&mql, "change", move |_| {
            push(&weak, MeshEvent::ReducedMotion(mql_for_cb.matches()));
        })?;
    }

    if let Some(mql) = dom::media_query(FINE_POINTER_QUERY) {
        let weak = Rc::downgrade(inst);
        let mql_for_cb = mql.clone();
        listeners.add(&mql, "change", move |_| {
            push(&weak, MeshEvent::PointerCapability {
                fine: mql_for_cb.matches(),
            });
        })?;
    }

    wire_container_resize(listeners, inst, canvas)?;
    wire_pointer(listeners, inst, canvas)?;
    wire_visibility(listeners, inst, canvas)?;
    Ok(())
}

fn push(weak: &Weak<MeshInstance>, ev: MeshEvent) {
    if let Some(inst) = weak.upgrade() {
        inst.push(ev);
    }
}

fn wire_pointer(
    listeners: &mut Listeners,
    inst: &Rc<MeshInstance>,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<()> {
    {
        let weak = Rc::downgrade(inst);
        let c = canvas.clone();
        listeners.add(canvas, "pointermove", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                let p = input::pointer_canvas_css(ev, &c);
                push(&weak, MeshEvent::PointerMove { x: p.x, y: p.y });
            }
        })?;
    }
    {
        let weak = Rc::downgrade(inst);
        let c = canvas.clone();
        listeners.add(canvas, "pointerdown", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                // Capture is best-effort; failure only affects drags leaving the canvas.
                _ = c.set_pointer_capture(ev.pointer_id());
                let p = input::pointer_canvas_css(ev, &c);
                push(&weak, MeshEvent::PointerDown { x: p.x, y: p.y });
            }
        })?;
    }
    for kind in ["pointerup", "pointercancel"] {
        let weak = Rc::downgrade(inst);
        let c = canvas.clone();
        listeners.add(canvas, kind, move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                _ = c.release_pointer_capture(ev.pointer_id());
            }
            push(&weak, MeshEvent::PointerUp);
        })?;
    }
    {
        let weak = Rc::downgrade(inst);
        listeners.add(canvas, "pointerleave", move |_| {
            push(&weak, MeshEvent::PointerLeave);
        })?;
    }
    Ok(())
}

fn wire_visibility(
    listeners: &mut Listeners,
    inst: &Rc<MeshInstance>,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<()> {
    let weak = Rc::downgrade(inst);
    let on_intersect = move |entries: js_sys::Array| {
        let Some(inst) = weak.upgrade() else {
            return;
        };
        let visible = entries
            .iter()
            .filter_map(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
            .last()
            .map(|e| e.is_intersecting());
        if let Some(visible) = visible {
            if visible {
                inst.start();
            } else {
                inst.stop();
            }
        }
    };
    let closure = Closure::wrap(Box::new(on_intersect) as Box<dyn FnMut(js_sys::Array)>);
    let observer = web::IntersectionObserver::new(closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
    observer.observe(canvas);
    listeners.observers.push(Observer {
        kind: ObserverKind::Intersection(observer),
        _closure: closure,
    });
    Ok(())
}

/// Container-driven size changes that never fire a window `resize`.
fn wire_container_resize(
    listeners: &mut Listeners,
    inst: &Rc<MeshInstance>,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<()> {
    let weak = Rc::downgrade(inst);
    let c = canvas.clone();
    let on_resize = move |_entries: js_sys::Array| {
        let vp = dom::canvas_viewport(&c);
        push(&weak, MeshEvent::Resize {
            width: vp.width,
            height: vp.height,
            pixel_ratio: vp.pixel_ratio,
        });
    };
    let closure = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut(js_sys::Array)>);
    let observer = web::ResizeObserver::new(closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("ResizeObserver: {:?}", e))?;
    observer.observe(canvas);
    listeners.observers.push(Observer {
        kind: ObserverKind::Resize(observer),
        _closure: closure,
    });
    Ok(())
}
