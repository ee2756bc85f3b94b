use crate::overlay;
use crate::photos::PhotoQueue;
use crate::render;
use glam::Mat4;
use instant::Instant;
use particle_core::{sprite_capacity, GestureState, Scene, SceneUniforms, SpriteInstance};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Scene,
    pub gpu: Option<render::GpuState>,
    pub photos: PhotoQueue,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub state: Rc<Cell<GestureState>>,
    pub started: Instant,
    pub sprites: Vec<SpriteInstance>,
    pub shown: Option<GestureState>,
}

impl FrameContext {
    pub fn new(
        scene: Scene,
        gpu: Option<render::GpuState>,
        photos: PhotoQueue,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        state: Rc<Cell<GestureState>>,
    ) -> Self {
        let sprites = Vec::with_capacity(sprite_capacity(scene.animator()));
        Self {
            scene,
            gpu,
            photos,
            canvas,
            document,
            state,
            started: Instant::now(),
            sprites,
            shown: None,
        }
    }

    pub fn frame(&mut self) {
        let t = self.started.elapsed().as_secs_f32();
        let state = self.scene.frame(t);
        if self.shown != Some(state) {
            overlay::show_status(&self.document, state.badge());
            self.state.set(state);
            self.shown = Some(state);
        }

        let animator = self.scene.animator();
        animator.write_sprites(&mut self.sprites);

        let css = (
            f64::from(self.canvas.client_width().max(1)),
            f64::from(self.canvas.client_height().max(1)),
        );
        let uniforms = SceneUniforms::for_aspect((css.0 / css.1) as f32);
        let banners = animator.banners();
        overlay::place_banners(
            &self.document,
            &banners.title,
            &banners.love,
            Mat4::from_cols_array_2d(&uniforms.view_proj),
            css,
        );

        if let Some(g) = &mut self.gpu {
            for photo in self.photos.borrow_mut().drain(..) {
                g.upload_photo(photo.layer, &photo.rgba);
            }
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(&self.sprites) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    capacity: usize,
    photo_layers: u32,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, capacity, photo_layers).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until `running` is cleared.
/// The context is dropped on the first tick after that, releasing the scene
/// buffers and GPU resources.
pub fn start_loop(frame_ctx: FrameContext, running: Rc<Cell<bool>>) {
    let frame_ctx = Rc::new(RefCell::new(Some(frame_ctx)));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            if frame_ctx.borrow_mut().take().is_some() {
                log::info!("[scene] loop stopped");
            }
            return;
        }
        if let Some(ctx) = frame_ctx.borrow_mut().as_mut() {
            ctx.frame();
        }
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
