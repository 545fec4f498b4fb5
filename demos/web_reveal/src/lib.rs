// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: scroll-revealed cards driven by `outcrop_backend_web`.
//!
//! Builds a tall page of cards, then asks outcrop to reveal them with a
//! staggered entrance as they scroll into view. The debug overlay is on,
//! so the enter lines and root-margin boundaries are drawn over the page,
//! and a console [`TraceSink`] logs every engine event.
//!
//! Build with: `wasm-pack build --target web demos/web_reveal`
//!
//! Then serve `demos/web_reveal/` and open `index.html` in a browser.
//!
//! [`TraceSink`]: outcrop_core::trace::TraceSink

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use outcrop_backend_web::{RevealOptions, Targets, reveal};
use outcrop_core::trace::{ApplyEvent, DrainTickEvent, EnterEvent, TraceSink};

const NUM_CARDS: usize = 24;

const PAGE_CSS: &str = r"
body {
    margin: 0;
    background: #14161a;
    color: #e8e8e8;
    font-family: system-ui, sans-serif;
}
header {
    height: 90vh;
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 1.4rem;
    color: #888;
}
.card {
    width: min(540px, 80vw);
    margin: 48px auto;
    padding: 28px;
    border-radius: 10px;
    background: #20242b;
    opacity: 0;
    transform: translateY(40px);
    transition: opacity 0.6s ease, transform 0.6s ease;
}
.card-visible {
    opacity: 1;
    transform: none;
}
.card-gold {
    opacity: 1;
    transform: none;
    background: #4a3b14;
}
";

/// Logs a handful of engine events to the browser console.
struct ConsoleSink;

impl TraceSink for ConsoleSink {
    fn on_enter(&mut self, e: &EnterEvent) {
        web_sys::console::log_1(&JsValue::from_str(&format!("enter {:?}", e.id)));
    }

    fn on_apply(&mut self, e: &ApplyEvent) {
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "apply {:?} via {:?}",
            e.id, e.path
        )));
    }

    fn on_drain_tick(&mut self, e: &DrainTickEvent) {
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "drain applied={:?} remaining={}",
            e.applied, e.remaining
        )));
    }
}

/// Entry point, called automatically when the wasm module loads.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    build_page(&document)?;

    let handle = reveal(
        Targets::Selector(".card"),
        RevealOptions {
            class: "card-visible".into(),
            threshold: 0.15,
            root_margin: "0px 0px -10% 0px".into(),
            stagger_ms: 120,
            debug: true,
            callback: Some(Box::new(|el| {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "revealed {}",
                    el.id()
                )));
            })),
            trace: Some(Box::new(ConsoleSink)),
            ..RevealOptions::default()
        },
    )?;

    // The instance keeps running when the handle goes out of scope;
    // nothing on this page ever needs to destroy it.
    let _ = handle;
    Ok(())
}

fn build_page(document: &Document) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let style = document.create_element("style")?;
    style.set_text_content(Some(PAGE_CSS));
    body.append_child(&style)?;

    let header = document.create_element("header")?;
    header.set_text_content(Some("scroll down"));
    body.append_child(&header)?;

    for i in 0..NUM_CARDS {
        let card: HtmlElement = document.create_element("div")?.unchecked_into();
        card.set_class_name("card");
        card.set_id(&format!("card-{i}"));
        card.set_text_content(Some(&format!("Card {i}")));
        // A few cards exercise the element-local overrides.
        if i == 5 {
            card.set_attribute("data-outcrop-class", "card-gold")?;
        }
        if i == 9 {
            card.set_attribute("data-outcrop-delay", "400")?;
        }
        body.append_child(&card)?;
    }
    Ok(())
}
