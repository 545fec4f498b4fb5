// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reveal state machine and stagger queue.
//!
//! [`Engine`] consumes visibility notifications and timer callbacks and
//! drives a [`RevealHost`]. Each tracked element moves between two states:
//!
//! ```text
//!          enter                         enter (queued/delayed/now)
//!   Hidden ──────► pending/queued ──────────────────────► Revealed
//!     ▲                 │ exit                                │
//!     └─────────────────┴──────── exit (non-persistent) ──────┘
//! ```
//!
//! Under persistent config `Revealed` is terminal and the element's proxy
//! is unobserved on first entry. Under non-persistent config an exit
//! reverts the classes and clears any queued or pending-timer state, so
//! an element that leaves before its turn is never revealed.
//!
//! The stagger queue is FIFO with set membership and is not re-entrant:
//! enqueues during a drain only append. A drain step applies the front
//! element synchronously and schedules the next step even when the queue
//! just emptied — that one trailing tick picks up elements that arrive
//! moments later; a tick that finds nothing terminates the drain, and a
//! later enqueue restarts it.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use core::fmt;

use crate::config::RevealConfig;
use crate::host::RevealHost;
use crate::trace::{
    ApplyEvent, ApplyPath, DrainTickEvent, EnterEvent, ExitEvent, QueueEvent, RegisterEvent,
    ReleaseEvent, ResyncEvent, RevertEvent, TeardownEvent, TraceSink,
};
use crate::track::{RevealState, TrackId, TrackStore};

/// Coordinates reveal transitions for one instance.
///
/// The engine owns the tracked-element arena, the reveal queue, and the
/// config snapshot. It holds no platform resources: timers, observers, and
/// DOM nodes belong to the [`RevealHost`] and are only referenced through
/// opaque tokens.
pub struct Engine {
    store: TrackStore,
    queue: VecDeque<TrackId>,
    config: RevealConfig,
    reduced_motion: bool,
    draining: bool,
    trace: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("live", &self.store.live_count())
            .field("queued", &self.queue.len())
            .field("draining", &self.draining)
            .field("reduced_motion", &self.reduced_motion)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine with the given config snapshot.
    ///
    /// `reduced_motion` is the accessibility preference sampled by the
    /// backend at construction; when set, all configured stagger and delay
    /// collapse to instantaneous application.
    #[must_use]
    pub fn new(config: RevealConfig, reduced_motion: bool) -> Self {
        Self {
            store: TrackStore::new(),
            queue: VecDeque::new(),
            config,
            reduced_motion,
            draining: false,
            trace: None,
        }
    }

    /// Installs a diagnostics sink.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.trace = Some(sink);
    }

    /// Returns the config snapshot.
    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Returns the tracked-element store.
    #[must_use]
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Returns whether reduced motion is in effect.
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Updates the reduced-motion preference for future transitions.
    ///
    /// In-flight queue and timer state is not re-timed.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Registers a tracked element with its resting geometry and returns
    /// its handle.
    pub fn register(&mut self, layout_top: f64, layout_height: f64) -> TrackId {
        let id = self.store.register(layout_top, layout_height);
        if let Some(sink) = self.trace.as_deref_mut() {
            sink.on_register(&RegisterEvent {
                id,
                layout_top,
                layout_height,
            });
        }
        id
    }

    /// Rewrites a slot's resting geometry after its proxy was rebuilt.
    pub fn update_layout(&mut self, id: TrackId, layout_top: f64, layout_height: f64) {
        if !self.store.is_alive(id) {
            return;
        }
        self.store.update_layout(id, layout_top, layout_height);
        if let Some(sink) = self.trace.as_deref_mut() {
            sink.on_resync(&ResyncEvent {
                id,
                layout_top,
                layout_height,
            });
        }
    }

    /// Handles a visibility-enter notification for `id`.
    pub fn on_enter<H: RevealHost>(&mut self, id: TrackId, host: &mut H) {
        if !self.store.is_alive(id) {
            return;
        }
        if let Some(sink) = self.trace.as_deref_mut() {
            sink.on_enter(&EnterEvent { id });
        }

        // One-shot: stop future detection on first entry, before any
        // queueing or delay settles the application.
        if self.config.persistent {
            host.unobserve(id);
        }

        if self.store.state(id) == RevealState::Revealed {
            return;
        }
        // Idempotent re-entry: already queued or already pending a delay.
        if self.store.queued(id) || self.store.pending_timer(id).is_some() {
            return;
        }

        if self.config.stagger_ms > 0 && !self.reduced_motion {
            self.store.set_queued(id, true);
            self.queue.push_back(id);
            if let Some(sink) = self.trace.as_deref_mut() {
                sink.on_queue_push(&QueueEvent {
                    id,
                    len: self.queue.len(),
                });
            }
            if !self.draining {
                self.draining = true;
                // First element of an idle drain applies synchronously.
                self.on_drain_tick(host);
            }
        } else {
            // Element-local delay override wins over the config value.
            let delay_ms = host.delay_override(id).unwrap_or(self.config.delay_ms);
            if delay_ms > 0 && !self.reduced_motion {
                let token = host.schedule_apply(id, delay_ms);
                self.store.set_pending_timer(id, Some(token));
            } else {
                self.apply(id, host, ApplyPath::Immediate);
            }
        }
    }

    /// Handles a visibility-exit notification for `id`.
    ///
    /// Ignored under persistent config (the proxy is unobserved after the
    /// first entry anyway, but an initial not-intersecting notification
    /// still arrives through here).
    pub fn on_exit<H: RevealHost>(&mut self, id: TrackId, host: &mut H) {
        if !self.store.is_alive(id) {
            return;
        }
        if let Some(sink) = self.trace.as_deref_mut() {
            sink.on_exit(&ExitEvent { id });
        }
        if self.config.persistent {
            return;
        }

        if self.store.queued(id) {
            self.queue.retain(|&queued| queued != id);
            self.store.set_queued(id, false);
            if let Some(sink) = self.trace.as_deref_mut() {
                sink.on_queue_drop(&QueueEvent {
                    id,
                    len: self.queue.len(),
                });
            }
        }
        if let Some(token) = self.store.take_pending_timer(id) {
            host.cancel_apply(token);
        }

        self.store.set_state(id, RevealState::Hidden);
        host.revert(id);
        if let Some(sink) = self.trace.as_deref_mut() {
            sink.on_revert(&RevertEvent { id });
        }
    }

    /// Handles expiry of a delayed-apply timer for `id`.
    pub fn on_delay_elapsed<H: RevealHost>(&mut self, id: TrackId, host: &mut H) {
        if !self.store.is_alive(id) {
            return;
        }
        // A cleared slot means the timer was cancelled between scheduling
        // and delivery; the notification is stale.
        if self.store.take_pending_timer(id).is_none() {
            return;
        }
        self.apply(id, host, ApplyPath::Delayed);
    }

    /// Runs one drain step of the stagger queue.
    pub fn on_drain_tick<H: RevealHost>(&mut self, host: &mut H) {
        if !self.draining {
            return;
        }
        match self.queue.pop_front() {
            Some(id) => {
                self.store.set_queued(id, false);
                self.apply(id, host, ApplyPath::Queued);
                let wait_ms = if self.reduced_motion {
                    0
                } else {
                    self.config.stagger_ms
                };
                host.schedule_drain(wait_ms);
                if let Some(sink) = self.trace.as_deref_mut() {
                    sink.on_drain_tick(&DrainTickEvent {
                        applied: Some(id),
                        remaining: self.queue.len(),
                        next_wait_ms: Some(wait_ms),
                    });
                }
            }
            None => {
                self.draining = false;
                if let Some(sink) = self.trace.as_deref_mut() {
                    sink.on_drain_tick(&DrainTickEvent {
                        applied: None,
                        remaining: 0,
                        next_wait_ms: None,
                    });
                }
            }
        }
    }

    /// Releases a tracked element, cancelling any pending state.
    pub fn release<H: RevealHost>(&mut self, id: TrackId, host: &mut H) {
        if !self.store.is_alive(id) {
            return;
        }
        if self.store.queued(id) {
            self.queue.retain(|&queued| queued != id);
        }
        if let Some(token) = self.store.take_pending_timer(id) {
            host.cancel_apply(token);
        }
        self.store.release(id);
        if let Some(sink) = self.trace.as_deref_mut() {
            sink.on_release(&ReleaseEvent { id });
        }
    }

    /// Tears down all engine state: cancels every pending delay timer,
    /// clears the queue, and releases every slot.
    ///
    /// The host is responsible for disconnecting its detection facility
    /// and destroying proxies around this call. Safe to call twice; the
    /// second call finds nothing to do.
    pub fn teardown<H: RevealHost>(&mut self, host: &mut H) {
        let ids = self.store.live_ids();
        let released = ids.len();
        let mut cancelled_timers = 0;
        for id in ids {
            if let Some(token) = self.store.take_pending_timer(id) {
                host.cancel_apply(token);
                cancelled_timers += 1;
            }
            self.store.release(id);
        }
        self.queue.clear();
        self.draining = false;
        if let Some(sink) = self.trace.as_deref_mut() {
            sink.on_teardown(&TeardownEvent {
                released,
                cancelled_timers,
            });
        }
    }

    /// Applies the reveal: clears pending state, marks the slot revealed,
    /// and lets the host mutate the source element.
    fn apply<H: RevealHost>(&mut self, id: TrackId, host: &mut H, path: ApplyPath) {
        if let Some(token) = self.store.take_pending_timer(id) {
            host.cancel_apply(token);
        }
        self.store.set_state(id, RevealState::Revealed);
        host.apply(id);
        if let Some(sink) = self.trace.as_deref_mut() {
            sink.on_apply(&ApplyEvent { id, path });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    use super::*;
    use crate::host::TimerToken;

    /// Records every host interaction; timers are held until the test
    /// fires or drops them explicitly.
    #[derive(Debug, Default)]
    struct MockHost {
        applied: Vec<TrackId>,
        reverted: Vec<TrackId>,
        unobserved: Vec<TrackId>,
        pending: Vec<(TimerToken, TrackId, u32)>,
        cancelled: Vec<TimerToken>,
        drain_waits: Vec<u32>,
        overrides: BTreeMap<u32, u32>,
        next_token: u32,
    }

    impl MockHost {
        fn pending_count(&self) -> usize {
            self.pending.len()
        }

        /// Simulates expiry of the oldest scheduled apply timer.
        fn fire_next_apply(&mut self, engine: &mut Engine) {
            let (_, id, _) = self.pending.remove(0);
            engine.on_delay_elapsed(id, self);
        }

        /// Consumes one scheduled drain wait and runs the drain step.
        fn fire_drain(&mut self, engine: &mut Engine) -> u32 {
            let wait = self.drain_waits.remove(0);
            engine.on_drain_tick(self);
            wait
        }
    }

    impl RevealHost for MockHost {
        fn apply(&mut self, id: TrackId) {
            self.applied.push(id);
        }

        fn revert(&mut self, id: TrackId) {
            self.reverted.push(id);
        }

        fn unobserve(&mut self, id: TrackId) {
            self.unobserved.push(id);
        }

        fn delay_override(&self, id: TrackId) -> Option<u32> {
            self.overrides.get(&id.index()).copied()
        }

        fn schedule_apply(&mut self, id: TrackId, delay_ms: u32) -> TimerToken {
            let token = TimerToken(self.next_token);
            self.next_token += 1;
            self.pending.push((token, id, delay_ms));
            token
        }

        fn cancel_apply(&mut self, token: TimerToken) {
            self.pending.retain(|&(t, _, _)| t != token);
            self.cancelled.push(token);
        }

        fn schedule_drain(&mut self, wait_ms: u32) {
            self.drain_waits.push(wait_ms);
        }
    }

    fn engine_with(config: RevealConfig) -> Engine {
        Engine::new(config, false)
    }

    #[test]
    fn persistent_enter_applies_and_unobserves() {
        let mut engine = engine_with(RevealConfig::default());
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);

        engine.on_enter(id, &mut host);
        assert_eq!(host.applied, [id]);
        assert_eq!(host.unobserved, [id]);
        assert_eq!(engine.store().state(id), RevealState::Revealed);
    }

    #[test]
    fn persistent_exit_never_reverts() {
        let mut engine = engine_with(RevealConfig::default());
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);

        engine.on_enter(id, &mut host);
        engine.on_exit(id, &mut host);
        engine.on_exit(id, &mut host);
        assert!(host.reverted.is_empty());
        assert_eq!(engine.store().state(id), RevealState::Revealed);
    }

    #[test]
    fn non_persistent_toggles_deterministically() {
        let config = RevealConfig {
            persistent: false,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);

        for _ in 0..3 {
            engine.on_enter(id, &mut host);
            engine.on_exit(id, &mut host);
        }
        assert_eq!(host.applied.len(), 3);
        assert_eq!(host.reverted.len(), 3);
        assert!(host.unobserved.is_empty(), "non-persistent keeps observing");
        assert_eq!(engine.store().state(id), RevealState::Hidden);
    }

    #[test]
    fn initial_not_intersecting_notification_is_harmless() {
        let config = RevealConfig {
            persistent: false,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);

        // Observers report all targets once on attach, mostly offscreen.
        engine.on_exit(id, &mut host);
        assert!(host.applied.is_empty());
        assert_eq!(engine.store().state(id), RevealState::Hidden);
    }

    #[test]
    fn delay_schedules_timer_then_applies_on_expiry() {
        let config = RevealConfig {
            delay_ms: 200,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);

        engine.on_enter(id, &mut host);
        assert!(host.applied.is_empty(), "apply waits for the timer");
        assert_eq!(host.pending_count(), 1);
        assert_eq!(host.pending[0].2, 200);

        host.fire_next_apply(&mut engine);
        assert_eq!(host.applied, [id]);
        assert_eq!(engine.store().pending_timer(id), None);
    }

    #[test]
    fn exit_cancels_pending_delay_timer() {
        let config = RevealConfig {
            persistent: false,
            delay_ms: 200,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);

        engine.on_enter(id, &mut host);
        let token = engine.store().pending_timer(id).unwrap();
        engine.on_exit(id, &mut host);

        assert_eq!(host.cancelled, [token]);
        assert_eq!(host.pending_count(), 0);
        assert!(host.applied.is_empty());
    }

    #[test]
    fn stale_delay_notification_is_ignored() {
        let config = RevealConfig {
            persistent: false,
            delay_ms: 200,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);

        engine.on_enter(id, &mut host);
        engine.on_exit(id, &mut host);
        // The platform may still deliver the expiry that raced the cancel.
        engine.on_delay_elapsed(id, &mut host);
        assert!(host.applied.is_empty());
    }

    #[test]
    fn delay_override_takes_precedence() {
        let config = RevealConfig {
            delay_ms: 200,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);
        host.overrides.insert(id.index(), 50);

        engine.on_enter(id, &mut host);
        assert_eq!(host.pending[0].2, 50);
    }

    #[test]
    fn zero_override_beats_global_delay() {
        let config = RevealConfig {
            delay_ms: 200,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);
        host.overrides.insert(id.index(), 0);

        engine.on_enter(id, &mut host);
        assert_eq!(host.applied, [id], "override 0 applies synchronously");
        assert_eq!(host.pending_count(), 0);
    }

    #[test]
    fn stagger_applies_first_synchronously_then_schedules() {
        let config = RevealConfig {
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);
        let c = engine.register(120.0, 50.0);

        // One detection pass delivers all three in document order.
        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        engine.on_enter(c, &mut host);

        assert_eq!(host.applied, [a], "only the front applies synchronously");
        assert_eq!(host.drain_waits, [100]);

        assert_eq!(host.fire_drain(&mut engine), 100);
        assert_eq!(host.applied, [a, b]);

        assert_eq!(host.fire_drain(&mut engine), 100);
        assert_eq!(host.applied, [a, b, c]);

        // Trailing tick finds the queue empty and terminates the drain.
        assert_eq!(host.drain_waits.len(), 1);
        host.fire_drain(&mut engine);
        assert!(host.drain_waits.is_empty(), "no tick after termination");
    }

    #[test]
    fn enqueue_during_drain_appends_without_second_loop() {
        let config = RevealConfig {
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        assert_eq!(host.drain_waits.len(), 1);

        // Arrives between drain ticks: appended, no parallel drain spawned.
        engine.on_enter(b, &mut host);
        assert_eq!(host.applied, [a]);
        assert_eq!(host.drain_waits.len(), 1);

        host.fire_drain(&mut engine);
        assert_eq!(host.applied, [a, b]);
    }

    #[test]
    fn element_arriving_at_trailing_tick_is_picked_up() {
        let config = RevealConfig {
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        // `a` applied; one trailing tick scheduled. `b` enters before it.
        engine.on_enter(b, &mut host);
        host.fire_drain(&mut engine);
        assert_eq!(host.applied, [a, b], "trailing tick drains the straggler");
    }

    #[test]
    fn drain_restarts_after_termination() {
        let config = RevealConfig {
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        host.fire_drain(&mut engine); // trailing tick, terminates

        engine.on_enter(b, &mut host);
        assert_eq!(host.applied, [a, b], "new batch restarts synchronously");
    }

    #[test]
    fn exit_before_drain_turn_is_never_revealed() {
        let config = RevealConfig {
            persistent: false,
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);
        let c = engine.register(120.0, 50.0);

        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        engine.on_enter(c, &mut host);
        engine.on_exit(b, &mut host);

        host.fire_drain(&mut engine);
        host.fire_drain(&mut engine);
        host.fire_drain(&mut engine);
        assert_eq!(host.applied, [a, c], "b left before its turn");
        assert!(!engine.store().queued(b));
    }

    #[test]
    fn double_enter_does_not_duplicate_queue_entry() {
        let config = RevealConfig {
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        engine.on_enter(b, &mut host);

        host.fire_drain(&mut engine);
        host.fire_drain(&mut engine);
        host.fire_drain(&mut engine);
        assert_eq!(host.applied, [a, b], "b applied exactly once");
    }

    #[test]
    fn reduced_motion_bypasses_stagger_and_delay() {
        let config = RevealConfig {
            stagger_ms: 100,
            delay_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = Engine::new(config, true);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        assert_eq!(host.applied, [a, b], "instantaneous in delivery order");
        assert_eq!(host.pending_count(), 0);
        assert!(host.drain_waits.is_empty());
    }

    #[test]
    fn enter_after_reveal_is_ignored() {
        let config = RevealConfig {
            persistent: false,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);

        engine.on_enter(id, &mut host);
        engine.on_enter(id, &mut host);
        assert_eq!(host.applied.len(), 1);
    }

    #[test]
    fn teardown_cancels_timers_and_clears_queue() {
        let config = RevealConfig {
            persistent: false,
            stagger_ms: 100,
            delay_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        // `a` queued and applied; `b` waiting its turn.
        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        engine.teardown(&mut host);

        assert_eq!(engine.store().live_count(), 0);
        assert_eq!(host.pending_count(), 0);

        // A drain tick that was already scheduled fires late: nothing runs.
        let applied_before = host.applied.len();
        engine.on_drain_tick(&mut host);
        assert_eq!(host.applied.len(), applied_before);

        // Second teardown finds nothing to do.
        engine.teardown(&mut host);
    }

    #[test]
    fn notifications_for_released_ids_are_ignored() {
        let mut engine = engine_with(RevealConfig::default());
        let mut host = MockHost::default();
        let id = engine.register(100.0, 50.0);
        engine.release(id, &mut host);

        engine.on_enter(id, &mut host);
        engine.on_exit(id, &mut host);
        engine.on_delay_elapsed(id, &mut host);
        assert!(host.applied.is_empty());
        assert!(host.reverted.is_empty());
    }

    #[test]
    fn release_drops_queued_entry() {
        let config = RevealConfig {
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine_with(config);
        let mut host = MockHost::default();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        engine.release(b, &mut host);

        host.fire_drain(&mut engine);
        host.fire_drain(&mut engine);
        assert_eq!(host.applied, [a]);
    }

    #[test]
    fn update_layout_feeds_debug_geometry() {
        let mut engine = engine_with(RevealConfig::default());
        let id = engine.register(100.0, 50.0);
        engine.update_layout(id, 300.0, 80.0);
        assert_eq!(engine.store().layout_top(id), 300.0);
        assert_eq!(engine.store().layout_height(id), 80.0);
    }
}
