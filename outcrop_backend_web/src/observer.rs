// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` construction.
//!
//! One observer per instance watches every proxy. The observer is built
//! with a single scalar threshold and the configured root margin; entry
//! notifications are resolved back to slot indices via the index attribute
//! stamped on each proxy.

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverInit, Window};

use outcrop_core::config::RevealConfig;

/// Returns whether the platform provides `IntersectionObserver`.
///
/// Construction must fail loudly when it doesn't; silently revealing
/// nothing (or everything) would be worse than an error the caller can
/// route to a fallback.
pub(crate) fn supported(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Builds the instance's observer from the config snapshot.
///
/// The threshold is passed as a single number, never an array: narrowing
/// the observer's capability here keeps multi-threshold notification
/// streams unrepresentable.
pub(crate) fn create_observer(
    callback: &Closure<dyn FnMut(js_sys::Array)>,
    config: &RevealConfig,
) -> Result<IntersectionObserver, JsValue> {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin.to_css());
    IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
}
