#![cfg(target_arch = "wasm32")]
//! Browser entry points for the particle flag scene.
//!
//! The page calls `mount(canvasId)` once the "3D view" opens and keeps the
//! returned `SceneHandle`. Its hand tracker (MediaPipe Hands or similar)
//! forwards each result through `submit_landmarks`; the render loop picks up
//! the newest classification on its next frame.

use particle_core::{
    hands_from_flat, photo_layer_count, sprite_capacity, GestureInbox, GestureState, Scene,
    SceneConfig,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod dom;
mod frame;
mod overlay;
mod photos;
mod render;

static MOUNTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("particle-web loaded");
    Ok(())
}

/// Handle to a mounted scene. Dropping it without `unmount` leaves the scene running.
#[wasm_bindgen]
pub struct SceneHandle {
    inbox: GestureInbox,
    running: Rc<Cell<bool>>,
    state: Rc<Cell<GestureState>>,
    music: Option<audio::BackgroundMusic>,
    resize: Option<dom::CanvasResize>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Classify one tracker result: `hand_count` hands of 21 landmarks, each
    /// landmark 2 (x, y) or 3 (x, y, z) floats, concatenated.
    pub fn submit_landmarks(&self, flat: Vec<f32>, hand_count: usize) -> Result<(), JsValue> {
        let hands =
            hands_from_flat(&flat, hand_count).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inbox.submit(&hands);
        Ok(())
    }

    /// Start the looping background track. Call from a user gesture handler.
    pub fn start_music(&self) {
        match &self.music {
            Some(m) => m.play(),
            None => log::warn!("[audio] no music element"),
        }
    }

    /// Stop the render loop, the music and the overlay. The scene's buffers
    /// are released on the next animation frame.
    pub fn unmount(&mut self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(m) = self.music.take() {
            m.stop();
        }
        self.resize = None;
        if let Some(document) = dom::window_document() {
            overlay::unmount(&document);
        }
        MOUNTED.store(false, Ordering::SeqCst);
        log::info!("[scene] unmounted");
    }

    /// Name of the state shown on the last rendered frame ("FLAG", "HEART", ...).
    pub fn state_name(&self) -> String {
        self.state.get().as_str().to_string()
    }
}

/// Build the scene on the canvas with id `canvas_id` and start rendering.
#[wasm_bindgen]
pub async fn mount(canvas_id: String) -> Result<SceneHandle, JsValue> {
    if MOUNTED.swap(true, Ordering::SeqCst) {
        return Err(JsValue::from_str("scene already mounted"));
    }
    match mount_inner(&canvas_id).await {
        Ok(handle) => Ok(handle),
        Err(e) => {
            MOUNTED.store(false, Ordering::SeqCst);
            log::error!("mount error: {:?}", e);
            Err(JsValue::from_str(&format!("{e:#}")))
        }
    }
}

async fn mount_inner(canvas_id: &str) -> anyhow::Result<SceneHandle> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let resize = dom::wire_canvas_resize(&canvas);

    let mut config = SceneConfig::default();
    dom::apply_count_overrides(&canvas, &mut config);
    let seed = js_sys::Date::now() as u64;
    let scene = Scene::new(config, seed)?;
    log::info!("[scene] 3D view opened (seed {})", seed);

    let layers = photo_layer_count(scene.animator());
    let gpu = frame::init_gpu(&canvas, sprite_capacity(scene.animator()), layers).await;
    let photo_queue = match &gpu {
        Some(_) => photos::spawn_loader(&document, layers),
        None => {
            log::warn!("[gpu] rendering disabled; gestures still update the scene");
            photos::PhotoQueue::default()
        }
    };

    overlay::mount(&document);
    let music = match audio::BackgroundMusic::new(audio::MUSIC_SRC) {
        Ok(m) => Some(m),
        Err(e) => {
            log::warn!("[audio] {:?}", e);
            None
        }
    };

    let inbox = scene.inbox();
    let running = Rc::new(Cell::new(true));
    let state = Rc::new(Cell::new(scene.state()));
    let ctx = frame::FrameContext::new(scene, gpu, photo_queue, canvas, document, state.clone());
    frame::start_loop(ctx, running.clone());

    Ok(SceneHandle {
        inbox,
        running,
        state,
        music,
        resize: Some(resize),
    })
}
