use particle_core::SceneConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Keep the canvas backing store at CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Window resize listener that keeps a canvas backing store in sync.
/// Dropping it detaches the listener.
pub struct CanvasResize {
    closure: Closure<dyn FnMut()>,
}

impl Drop for CanvasResize {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            _ = window.remove_event_listener_with_callback(
                "resize",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Sync now and on every window resize until the returned guard is dropped.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) -> CanvasResize {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    CanvasResize { closure }
}

/// Apply `data-accent-count` / `data-background-count` from the canvas element.
/// Unparseable values are logged and ignored; validation happens later.
pub fn apply_count_overrides(canvas: &web::HtmlCanvasElement, config: &mut SceneConfig) {
    let read = |name: &str| -> Option<usize> {
        let raw = canvas.get_attribute(name)?;
        match raw.trim().parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("[dom] ignoring {}={:?}", name, raw);
                None
            }
        }
    };
    if let Some(n) = read("data-accent-count") {
        config.group_sizes.accent = n;
    }
    if let Some(n) = read("data-background-count") {
        config.group_sizes.background = n;
    }
}
