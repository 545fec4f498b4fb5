// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Outcrop splits platform-specific work into *backend* crates. A backend
//! provides the following pieces:
//!
//! - **Proxy tracking** — Builds the invisible layout proxy per source
//!   element, registers it with the platform's intersection-detection
//!   facility, and resolves notifications back to [`TrackId`]s. This is
//!   backend-specific and not abstracted by a trait because node creation
//!   and observation lifecycles differ per platform.
//!
//! - **Host services** — Implements the [`RevealHost`] trait so the engine
//!   can mutate classes, stop observation, read per-element overrides, and
//!   schedule one-shot timers without knowing the platform.
//!
//! # Crate boundaries
//!
//! `outcrop_core` owns the data model, the reveal state machine, and this
//! contract module. Backend crates depend on `outcrop_core` and provide
//! platform glue. Application code depends on the backend's entry point.
//!
//! # Event loop pseudocode
//!
//! A backend wires its callbacks into the engine like this:
//!
//! ```rust,ignore
//! // IntersectionObserver callback, per entry:
//! let id = store.id_at(index_from(entry.target()))?;
//! if entry.is_intersecting() {
//!     engine.on_enter(id, &mut host);
//! } else {
//!     engine.on_exit(id, &mut host);
//! }
//!
//! // Timer fired for a delayed apply:
//! engine.on_delay_elapsed(id, &mut host);
//!
//! // Timer fired for the next stagger step:
//! engine.on_drain_tick(&mut host);
//! ```

use crate::track::TrackId;

/// Opaque handle for a one-shot timer minted by the host.
///
/// The engine stores tokens per slot and hands them back for cancellation;
/// it never interprets the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerToken(pub u32);

/// Platform services the engine drives.
///
/// Both the DOM backend and test doubles implement this trait. All methods
/// must be infallible from the engine's perspective: platform failures are
/// swallowed or logged by the host, never surfaced mid-transition.
pub trait RevealHost {
    /// Applies the reveal to the source element: adds the effective class
    /// list (element-local override, else config) and invokes the caller's
    /// callback.
    fn apply(&mut self, id: TrackId);

    /// Removes the effective class list from the source element. No
    /// callback is invoked.
    fn revert(&mut self, id: TrackId);

    /// Stops visibility detection for the element's proxy (one-shot mode).
    ///
    /// Must tolerate being called more than once for the same element.
    fn unobserve(&mut self, id: TrackId);

    /// Reads the element-local delay override in milliseconds, if present.
    fn delay_override(&self, id: TrackId) -> Option<u32>;

    /// Schedules a one-shot timer that calls back
    /// [`Engine::on_delay_elapsed`](crate::engine::Engine::on_delay_elapsed)
    /// for `id` after `delay_ms`.
    fn schedule_apply(&mut self, id: TrackId, delay_ms: u32) -> TimerToken;

    /// Cancels a timer returned by [`schedule_apply`](Self::schedule_apply).
    ///
    /// Cancelling an already-fired or already-cancelled token is a no-op.
    fn cancel_apply(&mut self, token: TimerToken);

    /// Schedules a one-shot timer that calls back
    /// [`Engine::on_drain_tick`](crate::engine::Engine::on_drain_tick)
    /// after `wait_ms`. At most one drain timer is outstanding at a time;
    /// the engine only schedules the next step after consuming the current
    /// one.
    fn schedule_drain(&mut self, wait_ms: u32);
}
