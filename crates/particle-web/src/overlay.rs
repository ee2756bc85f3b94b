//! DOM overlay: status badge, gesture guide and the two banner labels.
//!
//! Elements are created next to the canvas on mount and removed on unmount,
//! so the host page only has to provide the canvas.

use glam::{Mat4, Vec3};
use particle_core::{Banner, StatusBadge, GUIDE_TEXT};
use wasm_bindgen::JsCast;
use web_sys as web;

const STATUS_ID: &str = "particle-status";
const GUIDE_ID: &str = "particle-guide";
const TITLE_ID: &str = "particle-title";
const LOVE_ID: &str = "particle-love";

const STATUS_STYLE: &str = "position:fixed;top:24px;left:50%;transform:translateX(-50%);\
font:bold 28px system-ui;letter-spacing:2px;pointer-events:none;\
text-shadow:0 0 12px currentColor;z-index:10";
const GUIDE_STYLE: &str = "position:fixed;bottom:20px;left:50%;transform:translateX(-50%);\
color:#cfe7ff;font:13px system-ui;background:rgba(10,14,24,0.8);padding:8px 12px;\
border-radius:6px;border:1px solid rgba(80,110,150,0.35);pointer-events:none;z-index:10";
const BANNER_STYLE: &str = "position:fixed;left:0;top:0;font:bold 42px system-ui;\
white-space:nowrap;pointer-events:none;text-shadow:0 0 18px currentColor;z-index:9";

fn create(document: &web::Document, id: &str, style: &str, text: &str) -> Option<()> {
    if document.get_element_by_id(id).is_some() {
        return Some(());
    }
    let el = document.create_element("div").ok()?;
    el.set_id(id);
    _ = el.set_attribute("style", style);
    el.set_text_content(Some(text));
    document.body()?.append_child(&el).ok()?;
    Some(())
}

pub fn mount(document: &web::Document) {
    let ok = create(document, STATUS_ID, STATUS_STYLE, "").is_some()
        && create(document, GUIDE_ID, GUIDE_STYLE, GUIDE_TEXT).is_some()
        && create(document, TITLE_ID, BANNER_STYLE, "VIET NAM").is_some()
        && create(document, LOVE_ID, BANNER_STYLE, "WE LOVE VIET NAM").is_some();
    if !ok {
        log::warn!("[overlay] could not create overlay elements");
    }
}

pub fn unmount(document: &web::Document) {
    for id in [STATUS_ID, GUIDE_ID, TITLE_ID, LOVE_ID] {
        if let Some(el) = document.get_element_by_id(id) {
            el.remove();
        }
    }
}

pub fn show_status(document: &web::Document, badge: StatusBadge) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(Some(badge.text));
        if let Ok(html) = el.dyn_into::<web::HtmlElement>() {
            _ = html.style().set_property("color", badge.color);
        }
    }
}

/// Place the banner label over its projected scene position, or hide it.
fn place(
    document: &web::Document,
    id: &str,
    banner: &Banner,
    view_proj: Mat4,
    css: (f64, f64),
    color: &str,
) {
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    let Ok(html) = el.dyn_into::<web::HtmlElement>() else {
        return;
    };
    let style = html.style();
    let clip = view_proj * banner.position.extend(1.0);
    if !banner.visible || clip.w <= 0.0 {
        _ = style.set_property("display", "none");
        return;
    }
    let ndc = Vec3::new(clip.x, clip.y, clip.z) / clip.w;
    let x = (f64::from(ndc.x) * 0.5 + 0.5) * css.0;
    let y = (0.5 - f64::from(ndc.y) * 0.5) * css.1;
    _ = style.set_property("display", "block");
    _ = style.set_property("color", color);
    _ = style.set_property(
        "transform",
        &format!(
            "translate({:.1}px, {:.1}px) translate(-50%, -50%) scale({:.3})",
            x, y, banner.scale
        ),
    );
}

pub fn place_banners(
    document: &web::Document,
    title: &Banner,
    love: &Banner,
    view_proj: Mat4,
    css_size: (f64, f64),
) {
    place(document, TITLE_ID, title, view_proj, css_size, "#FFD700");
    place(document, LOVE_ID, love, view_proj, css_size, "#FF69B4");
}
