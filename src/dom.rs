use mesh_core::Viewport;
use web_sys as web;

#[inline]
pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow::anyhow!("no window"))
}

#[inline]
pub fn device_pixel_ratio() -> f32 {
    web::window()
        .map(|w| w.device_pixel_ratio() as f32)
        .unwrap_or(1.0)
}

/// Canvas CSS size and the current device pixel ratio.
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport::new(rect.width() as f32, rect.height() as f32, device_pixel_ratio())
}

#[inline]
pub fn media_query(query: &str) -> Option<web::MediaQueryList> {
    web::window().and_then(|w| w.match_media(query).ok().flatten())
}

#[inline]
pub fn media_matches(query: &str) -> bool {
    media_query(query).map(|m| m.matches()).unwrap_or(false)
}
