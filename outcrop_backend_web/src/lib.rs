// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for outcrop.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`reveal`]: the entry point — builds ghost proxies, wires an
//!   `IntersectionObserver`, and returns a [`RevealHandle`]
//! - [`RafLoop`]: `requestAnimationFrame` loop (used by the debug overlay)
//!
//! # Example
//!
//! ```rust,ignore
//! use outcrop_backend_web::{reveal, RevealOptions, Targets};
//!
//! let handle = reveal(
//!     Targets::Selector(".card"),
//!     RevealOptions {
//!         class: "card-visible".into(),
//!         stagger_ms: 120,
//!         ..RevealOptions::default()
//!     },
//! )?;
//! ```

#![no_std]

extern crate alloc;

mod ghost;
mod instance;
mod observer;
mod overlay;
mod raf;
mod timer;

pub use instance::RevealHandle;
pub use raf::RafLoop;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use wasm_bindgen::JsValue;
use web_sys::Element;

use outcrop_core::config::DEFAULT_CLASS;
use outcrop_core::trace::TraceSink;

/// Elements a reveal instance should track.
#[derive(Debug)]
pub enum Targets<'a> {
    /// All elements matching a CSS selector.
    Selector(&'a str),
    /// A single element.
    Element(Element),
    /// An explicit element list.
    List(Vec<Element>),
}

/// Caller-facing options for [`reveal`].
///
/// Scalar fields map one-to-one onto the engine config;
/// `root_margin` is parsed (CSS margin shorthand, `px` and `%` components
/// only) and `threshold` validated at construction, so a bad value fails
/// the [`reveal`] call instead of surfacing later.
pub struct RevealOptions {
    /// Space-separated classes added to a source on reveal.
    pub class: String,
    /// Visibility fraction (0.0–1.0) at which an element counts as entered.
    pub threshold: f64,
    /// Margin applied to the viewport bounds, CSS shorthand.
    pub root_margin: String,
    /// One-shot reveals when `true`; revert-on-exit when `false`.
    pub persistent: bool,
    /// Fixed inter-item wait in milliseconds when revealing a batch.
    pub stagger_ms: u32,
    /// Delay in milliseconds before a non-staggered reveal is applied.
    pub delay_ms: u32,
    /// Draws the trigger-geometry overlay when `true`.
    pub debug: bool,
    /// Invoked with the source element after each reveal (never on revert).
    ///
    /// Must not call [`RevealHandle::destroy`] synchronously; it runs
    /// while the instance is borrowed.
    pub callback: Option<Box<dyn FnMut(&Element)>>,
    /// Diagnostics sink receiving engine events.
    pub trace: Option<Box<dyn TraceSink>>,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            class: String::from(DEFAULT_CLASS),
            threshold: 0.1,
            root_margin: String::from("0px"),
            persistent: true,
            stagger_ms: 0,
            delay_ms: 0,
            debug: false,
            callback: None,
            trace: None,
        }
    }
}

impl fmt::Debug for RevealOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealOptions")
            .field("class", &self.class)
            .field("threshold", &self.threshold)
            .field("root_margin", &self.root_margin)
            .field("persistent", &self.persistent)
            .field("stagger_ms", &self.stagger_ms)
            .field("delay_ms", &self.delay_ms)
            .field("debug", &self.debug)
            .field("callback", &self.callback.is_some())
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

/// Starts tracking the given targets and returns a handle to the instance.
///
/// Builds one ghost proxy per target at its resting document position,
/// observes the proxies (never the sources), and applies the configured
/// classes as they scroll into view.
///
/// # Errors
///
/// Fails when `IntersectionObserver` is unavailable, when the selector or
/// config is invalid, or when the DOM refuses a node operation. No
/// scroll-listener fallback is attempted.
pub fn reveal(targets: Targets<'_>, options: RevealOptions) -> Result<RevealHandle, JsValue> {
    instance::create(targets, options)
}
