// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the reveal engine.
//!
//! [`TraceSink`] has one method per engine event; all bodies default to
//! no-ops, so implementing only the events you care about is fine. The
//! engine dispatches through an owned `Option<Box<dyn TraceSink>>` — one
//! branch per event when a sink is installed, nothing otherwise. Events
//! fire at interaction frequency (scroll boundary crossings, timer
//! expiries), not per frame.

use crate::track::TrackId;

/// How a reveal application was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApplyPath {
    /// Applied directly from the enter notification.
    Immediate,
    /// Applied when a per-element delay timer expired.
    Delayed,
    /// Applied by a stagger-queue drain step.
    Queued,
}

/// Emitted when a source element is registered.
#[derive(Clone, Copy, Debug)]
pub struct RegisterEvent {
    /// Handle of the new slot.
    pub id: TrackId,
    /// Resting document-coordinate top.
    pub layout_top: f64,
    /// Element height at capture.
    pub layout_height: f64,
}

/// Emitted when a slot's geometry is rewritten after a proxy rebuild.
#[derive(Clone, Copy, Debug)]
pub struct ResyncEvent {
    /// Handle of the slot.
    pub id: TrackId,
    /// New resting top.
    pub layout_top: f64,
    /// New height.
    pub layout_height: f64,
}

/// Emitted when a slot is released.
#[derive(Clone, Copy, Debug)]
pub struct ReleaseEvent {
    /// Handle of the released slot.
    pub id: TrackId,
}

/// Emitted on a visibility-enter notification.
#[derive(Clone, Copy, Debug)]
pub struct EnterEvent {
    /// Element that entered.
    pub id: TrackId,
}

/// Emitted on a visibility-exit notification.
#[derive(Clone, Copy, Debug)]
pub struct ExitEvent {
    /// Element that exited.
    pub id: TrackId,
}

/// Emitted when the reveal classes are applied to a source element.
#[derive(Clone, Copy, Debug)]
pub struct ApplyEvent {
    /// Element revealed.
    pub id: TrackId,
    /// How the application was reached.
    pub path: ApplyPath,
}

/// Emitted when the reveal classes are removed on a non-persistent exit.
#[derive(Clone, Copy, Debug)]
pub struct RevertEvent {
    /// Element reverted.
    pub id: TrackId,
}

/// Emitted when the stagger queue gains or loses an element.
#[derive(Clone, Copy, Debug)]
pub struct QueueEvent {
    /// Element pushed or dropped.
    pub id: TrackId,
    /// Queue length after the mutation.
    pub len: usize,
}

/// Emitted on every drain step of the stagger queue.
#[derive(Clone, Copy, Debug)]
pub struct DrainTickEvent {
    /// Element applied by this step, or `None` for the terminating tick.
    pub applied: Option<TrackId>,
    /// Elements still waiting after this step.
    pub remaining: usize,
    /// Wait scheduled before the next step, if one was scheduled.
    pub next_wait_ms: Option<u32>,
}

/// Emitted once when the engine is torn down.
#[derive(Clone, Copy, Debug)]
pub struct TeardownEvent {
    /// Slots released.
    pub released: usize,
    /// Pending delay timers cancelled.
    pub cancelled_timers: usize,
}

/// Receives engine diagnostics events.
///
/// All methods are optional.
pub trait TraceSink {
    /// A source element was registered.
    fn on_register(&mut self, event: &RegisterEvent) {
        let _ = event;
    }

    /// A slot's geometry was rewritten after a proxy rebuild.
    fn on_resync(&mut self, event: &ResyncEvent) {
        let _ = event;
    }

    /// A slot was released.
    fn on_release(&mut self, event: &ReleaseEvent) {
        let _ = event;
    }

    /// A visibility-enter notification was processed.
    fn on_enter(&mut self, event: &EnterEvent) {
        let _ = event;
    }

    /// A visibility-exit notification was processed.
    fn on_exit(&mut self, event: &ExitEvent) {
        let _ = event;
    }

    /// Reveal classes were applied.
    fn on_apply(&mut self, event: &ApplyEvent) {
        let _ = event;
    }

    /// Reveal classes were removed.
    fn on_revert(&mut self, event: &RevertEvent) {
        let _ = event;
    }

    /// An element joined the stagger queue.
    fn on_queue_push(&mut self, event: &QueueEvent) {
        let _ = event;
    }

    /// An element left the stagger queue without being applied.
    fn on_queue_drop(&mut self, event: &QueueEvent) {
        let _ = event;
    }

    /// A stagger drain step ran.
    fn on_drain_tick(&mut self, event: &DrainTickEvent) {
        let _ = event;
    }

    /// The engine was torn down.
    fn on_teardown(&mut self, event: &TeardownEvent) {
        let _ = event;
    }
}
