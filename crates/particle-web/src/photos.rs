//! Background loading of the photo panel images.
//!
//! Images are decoded off the render loop, center-cropped to a square and
//! rasterized at `PHOTO_TEXTURE_SIZE` through a scratch 2D canvas. The RGBA
//! bytes are queued for the frame loop, which uploads them into the photo
//! texture array. A photo that fails to load is logged and its panel keeps
//! the plain tint.

use particle_core::{photo_source, PHOTO_TEXTURE_SIZE};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct PhotoPixels {
    pub layer: u32,
    pub rgba: Vec<u8>,
}

pub type PhotoQueue = Rc<RefCell<Vec<PhotoPixels>>>;

/// Start decoding one image per layer; results land in the returned queue.
pub fn spawn_loader(document: &web::Document, layers: u32) -> PhotoQueue {
    let queue = PhotoQueue::default();
    let out = queue.clone();
    let document = document.clone();
    wasm_bindgen_futures::spawn_local(async move {
        for layer in 0..layers {
            let src = photo_source(layer as usize);
            match decode(&document, src, PHOTO_TEXTURE_SIZE).await {
                Ok(rgba) => {
                    log::info!("[photos] {} -> layer {}", src, layer);
                    out.borrow_mut().push(PhotoPixels { layer, rgba });
                }
                Err(e) => log::warn!("[photos] {} failed: {:?}", src, e),
            }
        }
    });
    queue
}

async fn decode(document: &web::Document, src: &str, size: u32) -> Result<Vec<u8>, JsValue> {
    let img = web::HtmlImageElement::new()?;
    img.set_src(src);
    JsFuture::from(img.decode()).await?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<web::HtmlCanvasElement>()?;
    canvas.set_width(size);
    canvas.set_height(size);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()?;

    let (w, h) = (
        f64::from(img.natural_width()),
        f64::from(img.natural_height()),
    );
    let side = w.min(h);
    if side <= 0.0 {
        return Err(JsValue::from_str("image has no pixels"));
    }
    let edge = f64::from(size);
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        &img,
        (w - side) / 2.0,
        (h - side) / 2.0,
        side,
        side,
        0.0,
        0.0,
        edge,
        edge,
    )?;
    let data = ctx.get_image_data(0.0, 0.0, edge, edge)?;
    Ok(data.data().0)
}
