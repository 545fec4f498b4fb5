// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas debug overlay.
//!
//! A full-viewport, non-interactive `<canvas>` drawn above the page,
//! repainted every animation frame while debug mode is on. It visualizes
//! the trigger geometry: one enter line per tracked element (and an exit
//! line under non-persistent config), plus the root-margin boundaries.
//! Everything is derived from engine state and the live scroll offset;
//! drawing mutates nothing.

use alloc::format;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use outcrop_core::config::RevealConfig;
use outcrop_core::geometry;
use outcrop_core::track::TrackStore;

use crate::raf::RafLoop;

/// Attribute marking the overlay canvas.
const DEBUG_ATTR: &str = "data-outcrop-debug";

const ENTER_COLOR: &str = "#00c853";
const EXIT_COLOR: &str = "#d50000";
const MARGIN_COLOR: &str = "#2962ff";

/// How far offscreen a line may sit and still be drawn, in px. Lines just
/// past the edge keep labels readable while scrolling them into view.
const DRAW_SLACK: f64 = 50.0;

/// The live overlay: canvas plus the frame loop repainting it.
///
/// Dropping the overlay stops the loop and removes the canvas.
#[derive(Debug)]
pub(crate) struct Overlay {
    canvas: HtmlCanvasElement,
    raf: RafLoop,
}

impl Overlay {
    pub(crate) fn new(canvas: HtmlCanvasElement, raf: RafLoop) -> Self {
        raf.start();
        Self { canvas, raf }
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.raf.stop();
        self.canvas.remove();
    }
}

/// Creates the overlay canvas and appends it to the document body.
pub(crate) fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
    canvas.set_attribute(DEBUG_ATTR, "")?;
    let s = canvas.style();
    let _ = s.set_property("position", "fixed");
    let _ = s.set_property("top", "0");
    let _ = s.set_property("left", "0");
    let _ = s.set_property("width", "100%");
    let _ = s.set_property("height", "100%");
    // Above everything, including the page's own stacking contexts.
    let _ = s.set_property("z-index", "2147483647");
    let _ = s.set_property("pointer-events", "none");
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&canvas)?;
    Ok(canvas)
}

/// Returns the canvas's 2d context, or `None` when the platform refuses
/// one. A refusal disables the overlay only; reveals proceed normally.
pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Repaints the overlay from current engine state.
pub(crate) fn draw(
    window: &Window,
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    store: &TrackStore,
    config: &RevealConfig,
) {
    let dpr = window.device_pixel_ratio();
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let scroll_y = window.scroll_y().unwrap_or(0.0);

    // Match the backing store to the CSS size at the current pixel ratio,
    // then draw in CSS pixels. Resizing also clears the canvas.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "viewport dimensions are small positive f64s"
    )]
    let (backing_w, backing_h) = ((width * dpr) as u32, (height * dpr) as u32);
    if canvas.width() != backing_w {
        canvas.set_width(backing_w);
    }
    if canvas.height() != backing_h {
        canvas.set_height(backing_h);
    }
    let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.set_font("10px monospace");

    // Root-margin boundaries, dashed. With zero margin these coincide with
    // the viewport edges and sit mostly out of view.
    let (margin_top, margin_bottom) = geometry::margin_boundaries(&config.root_margin, height);
    let dash = js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0));
    let _ = ctx.set_line_dash(&dash);
    ctx.set_stroke_style_str(MARGIN_COLOR);
    ctx.set_fill_style_str(MARGIN_COLOR);
    if in_view(margin_top, height) {
        h_line(ctx, margin_top, width);
        let _ = ctx.fill_text("margin top", 4.0, margin_top - 4.0);
    }
    if in_view(margin_bottom, height) {
        h_line(ctx, margin_bottom, width);
        let _ = ctx.fill_text("margin bottom", 4.0, margin_bottom - 4.0);
    }
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    for id in store.live_ids() {
        let top = store.layout_top(id);
        let h = store.layout_height(id);

        let enter = geometry::enter_line_y(top, h, config.threshold, scroll_y);
        if in_view(enter, height) {
            ctx.set_stroke_style_str(ENTER_COLOR);
            ctx.set_fill_style_str(ENTER_COLOR);
            h_line(ctx, enter, width);
            let _ = ctx.fill_text(&format!("#{} enter", id.index()), 4.0, enter - 4.0);
        }

        if !config.persistent {
            let exit = geometry::exit_line_y(top, h, config.threshold, scroll_y);
            if in_view(exit, height) {
                ctx.set_stroke_style_str(EXIT_COLOR);
                ctx.set_fill_style_str(EXIT_COLOR);
                h_line(ctx, exit, width);
                let _ = ctx.fill_text(&format!("#{} exit", id.index()), 4.0, exit + 12.0);
            }
        }
    }
}

fn in_view(y: f64, viewport_height: f64) -> bool {
    y >= -DRAW_SLACK && y <= viewport_height + DRAW_SLACK
}

fn h_line(ctx: &CanvasRenderingContext2d, y: f64, width: f64) {
    ctx.begin_path();
    ctx.move_to(0.0, y);
    ctx.line_to(width, y);
    ctx.stroke();
}
