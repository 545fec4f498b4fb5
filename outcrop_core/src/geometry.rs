// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold-line math for the debug renderer.
//!
//! All values are viewport-space y coordinates in pixels. The renderer
//! reads resting geometry from the [`TrackStore`](crate::track::TrackStore)
//! and the current scroll offset; nothing here mutates state.

use crate::margin::RootMargin;

/// Viewport-space y of the enter-threshold line for an element.
///
/// The element counts as entered once this line scrolls past the (margin
/// adjusted) viewport bottom: `layout_top + layout_height × threshold −
/// scroll_y`.
#[must_use]
pub fn enter_line_y(layout_top: f64, layout_height: f64, threshold: f64, scroll_y: f64) -> f64 {
    layout_top + layout_height * threshold - scroll_y
}

/// Viewport-space y of the exit-threshold line for an element.
///
/// Mirror of the enter line about the element's center; only meaningful
/// (and only drawn) under non-persistent config.
#[must_use]
pub fn exit_line_y(layout_top: f64, layout_height: f64, threshold: f64, scroll_y: f64) -> f64 {
    layout_top + layout_height * (1.0 - threshold) - scroll_y
}

/// Viewport-space y coordinates of the root-margin boundary lines,
/// `(top, bottom)`.
///
/// A positive margin expands the intersection root beyond the viewport
/// (the line sits offscreen); the negative margins typical for scroll
/// triggers pull the boundary inward where it is visible.
#[must_use]
pub fn margin_boundaries(margin: &RootMargin, viewport_height: f64) -> (f64, f64) {
    let top = -margin.resolve_top(viewport_height);
    let bottom = viewport_height + margin.resolve_bottom(viewport_height);
    (top, bottom)
}
