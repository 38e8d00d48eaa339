#![cfg(target_arch = "wasm32")]
//! WebAssembly binding for the point mesh: a `PointMesh` handle mounts the
//! mesh on a canvas and owns every listener it registers.

use crate::canvas::CanvasSurface;
use crate::events::Listeners;
use crate::frame::MeshInstance;
use crate::input::{FINE_POINTER_QUERY, REDUCED_MOTION_QUERY};
use mesh_core::{MeshConfig, MeshEvent, MeshOptions, MeshScene};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod canvas;
mod dom;
mod events;
mod frame;
mod input;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("point-mesh-web loaded");
    Ok(())
}

#[inline]
fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

/// Read a host options object. `undefined`/`null` mean "no changes".
fn options_from_js(props: &JsValue) -> anyhow::Result<MeshOptions> {
    if props.is_undefined() || props.is_null() {
        return Ok(MeshOptions::default());
    }
    let json: String = js_sys::JSON::stringify(props)
        .map_err(|e| anyhow::anyhow!("options not serializable: {:?}", e))?
        .into();
    Ok(MeshOptions::from_json(&json)?)
}

#[wasm_bindgen]
pub struct PointMesh {
    instance: Rc<MeshInstance>,
    listeners: Listeners,
}

#[wasm_bindgen]
impl PointMesh {
    /// Mount on `canvas` with optional initial options and start animating.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: web::HtmlCanvasElement, props: JsValue) -> Result<PointMesh, JsValue> {
        Self::attach(canvas, &props).map_err(to_js)
    }

    /// Merge options into the current configuration and regenerate geometry.
    #[wasm_bindgen(js_name = setProperties)]
    pub fn set_properties(&self, props: JsValue) -> Result<(), JsValue> {
        let opts = options_from_js(&props).map_err(to_js)?;
        self.instance
            .scene
            .borrow_mut()
            .set_options(&opts)
            .map_err(|e| to_js(e.into()))
    }

    #[wasm_bindgen(getter, js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.instance.scene.borrow().point_count()
    }

    #[wasm_bindgen(getter, js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.instance.scene.borrow().edge_count()
    }

    /// Stop animating and remove every listener and observer.
    pub fn detach(&mut self) {
        self.instance.detach();
        self.listeners.clear();
        log::info!("[mesh] detached");
    }
}

impl PointMesh {
    fn attach(canvas: web::HtmlCanvasElement, props: &JsValue) -> anyhow::Result<PointMesh> {
        let mut config = MeshConfig::default();
        config.merge(&options_from_js(props)?)?;

        let surface = CanvasSurface::new(&canvas)?;
        let viewport = dom::canvas_viewport(&canvas);
        let scene = MeshScene::new(config, viewport, rand::random());
        let instance = MeshInstance::new(scene, surface);
        instance.push(MeshEvent::ReducedMotion(dom::media_matches(REDUCED_MOTION_QUERY)));
        instance.push(MeshEvent::PointerCapability {
            fine: dom::media_matches(FINE_POINTER_QUERY),
        });

        let mut listeners = Listeners::default();
        events::wire_all(&mut listeners, &instance, &canvas)?;
        instance.start();
        log::info!(
            "[mesh] attached points={} listeners={}",
            instance.scene.borrow().point_count(),
            listeners.count()
        );
        Ok(PointMesh {
            instance,
            listeners,
        })
    }
}

impl Drop for PointMesh {
    fn drop(&mut self) {
        if !self.instance.animator.borrow().is_detached() {
            self.detach();
        }
    }
}
