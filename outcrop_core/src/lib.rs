// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core engine for layout-stable scroll-reveal tracking.
//!
//! `outcrop_core` decides the *moment* and *order* of a CSS class mutation
//! when elements scroll into view. It owns no DOM: platform work (proxy
//! nodes, `IntersectionObserver`, timers, class writes) is delegated to a
//! backend through the [`RevealHost`](host::RevealHost) trait. The crate is
//! `no_std` compatible (with `alloc`) and uses array-based struct-of-arrays
//! storage with generational index handles.
//!
//! # Architecture
//!
//! The engine turns visibility notifications into class mutations:
//!
//! ```text
//!   Backend (IntersectionObserver on proxies)
//!       │
//!       ▼
//!   Engine::on_enter / on_exit ──► apply now
//!                                │  schedule delayed apply (host timer)
//!                                │  enqueue for staggered drain
//!                                ▼
//!   RevealHost::apply / revert  (class toggle on the source element)
//! ```
//!
//! **[`track`]** — Struct-of-arrays arena of tracked elements with
//! generational handles. Holds the resting layout geometry captured at
//! proxy-creation time, reveal state, and pending-timer bookkeeping.
//!
//! **[`engine`]** — The per-element Hidden/Revealed state machine and the
//! FIFO stagger queue. Consumes enter/exit notifications and timer
//! callbacks; drives a [`RevealHost`](host::RevealHost).
//!
//! **[`host`]** — The backend contract: class application, visibility
//! unobservation, per-element overrides, and one-shot timer scheduling.
//!
//! **[`config`]** — Immutable per-instance [`RevealConfig`](config::RevealConfig)
//! snapshot with boundary validation.
//!
//! **[`margin`]** — CSS margin-shorthand parsing for the observer's root
//! margin and the debug renderer's boundary lines.
//!
//! **[`matrix`]** — CSS computed-transform parsing; extracts the 2-D
//! translation that proxy placement subtracts out.
//!
//! **[`geometry`]** — Threshold-line math for the debug renderer.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for engine instrumentation.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod engine;
pub mod geometry;
pub mod host;
pub mod margin;
pub mod matrix;
pub mod trace;
pub mod track;
