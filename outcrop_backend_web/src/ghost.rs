// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ghost proxy construction.
//!
//! Source elements routinely start an entrance animation translated away
//! from their resting position (e.g. `transform: translateY(40px)` before
//! the reveal class lands). Observing the source directly would make the
//! trigger point depend on that offset. Instead each source gets an
//! invisible *proxy*: a `<div>` pinned at the source's resting document
//! position, with any active transform subtracted out of the measured
//! rect. The intersection machinery watches only proxies; the animated
//! source is never observed.

use alloc::format;
use alloc::string::String;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, Window};

use outcrop_core::matrix;

/// Attribute marking a node as an outcrop proxy.
///
/// Proxies carry this so target resolution can skip them; a selector like
/// `div` must never capture another instance's ghosts.
pub(crate) const PROXY_ATTR: &str = "data-outcrop-proxy";

/// Attribute carrying the slot index on a proxy node.
pub(crate) const PROXY_IDX_ATTR: &str = "data-outcrop-idx";

/// Attribute marking the proxy container.
pub(crate) const CONTAINER_ATTR: &str = "data-outcrop-ghosts";

/// Element-local class override read at apply time.
pub(crate) const CLASS_ATTR: &str = "data-outcrop-class";

/// Element-local delay override in milliseconds.
pub(crate) const DELAY_ATTR: &str = "data-outcrop-delay";

/// Resting document-coordinate rect of a source element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GhostRect {
    pub(crate) top: f64,
    pub(crate) left: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

/// Measures the resting document-coordinate rect of `el`.
///
/// `getBoundingClientRect` reports the transformed position; the translation
/// component of the computed transform is subtracted back out so the proxy
/// lands where the element will sit once its entrance animation settles.
/// Scale and rotation components are ignored.
pub(crate) fn capture_geometry(window: &Window, el: &Element) -> GhostRect {
    let rect = el.get_bounding_client_rect();
    let scroll_x = window.scroll_x().unwrap_or(0.0);
    let scroll_y = window.scroll_y().unwrap_or(0.0);

    let offset = window
        .get_computed_style(el)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("transform").ok())
        .map_or(kurbo::Vec2::ZERO, |transform| {
            matrix::parse_translation(&transform)
        });

    GhostRect {
        top: rect.top() + scroll_y - offset.y,
        left: rect.left() + scroll_x - offset.x,
        width: rect.width(),
        height: rect.height(),
    }
}

/// Creates the shared container all proxies of an instance live in.
///
/// Positioned at the document origin so proxy coordinates are plain
/// document coordinates; zero-sized and non-interactive.
pub(crate) fn create_container(document: &Document) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = document.create_element("div")?.unchecked_into();
    el.set_attribute(CONTAINER_ATTR, "")?;
    let s = el.style();
    let _ = s.set_property("position", "absolute");
    let _ = s.set_property("top", "0");
    let _ = s.set_property("left", "0");
    let _ = s.set_property("width", "0");
    let _ = s.set_property("height", "0");
    let _ = s.set_property("margin", "0");
    let _ = s.set_property("pointer-events", "none");
    Ok(el)
}

/// Builds the invisible proxy for one source element.
///
/// The source is shallow-cloned so intrinsic sizing influences (tag,
/// inline styles) carry over, then stripped of everything that could make
/// it observable or stateful: reveal classes (so a mid-animation clone
/// doesn't start revealed), the `id` attribute (document-unique), and all
/// interaction and paint.
pub(crate) fn build_proxy(
    document: &Document,
    source: &Element,
    idx: u32,
    rect: GhostRect,
    reveal_classes: &[String],
) -> Result<HtmlElement, JsValue> {
    let proxy: HtmlElement = match source.clone_node()?.dyn_into::<HtmlElement>() {
        Ok(el) => el,
        // SVG and other non-HTML sources clone into their own element
        // class; a plain div proxy tracks their geometry just as well.
        Err(_) => document.create_element("div")?.unchecked_into(),
    };

    let class_list = proxy.class_list();
    for class in reveal_classes {
        let _ = class_list.remove_1(class);
    }
    if let Some(local) = source.get_attribute(CLASS_ATTR) {
        for class in local.split_whitespace() {
            let _ = class_list.remove_1(class);
        }
    }
    let _ = proxy.remove_attribute("id");

    proxy.set_attribute(PROXY_ATTR, "")?;
    proxy.set_attribute(PROXY_IDX_ATTR, &format!("{idx}"))?;
    proxy.set_attribute("aria-hidden", "true")?;

    let s = proxy.style();
    let _ = s.set_property("position", "absolute");
    let _ = s.set_property("top", &format!("{}px", rect.top));
    let _ = s.set_property("left", &format!("{}px", rect.left));
    let _ = s.set_property("width", &format!("{}px", rect.width));
    let _ = s.set_property("height", &format!("{}px", rect.height));
    let _ = s.set_property("margin", "0");
    let _ = s.set_property("transform", "none");
    let _ = s.set_property("transition", "none");
    let _ = s.set_property("animation", "none");
    let _ = s.set_property("visibility", "hidden");
    let _ = s.set_property("pointer-events", "none");

    Ok(proxy)
}

/// Reads the slot index stamped on a proxy node.
pub(crate) fn proxy_index(el: &Element) -> Option<u32> {
    el.get_attribute(PROXY_IDX_ATTR)?.parse().ok()
}
