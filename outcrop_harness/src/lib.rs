// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual-time host for exercising the reveal engine without a browser.
//!
//! [`VirtualHost`] implements [`RevealHost`] over a virtual millisecond
//! clock and an ordered timer wheel; [`advance`] plays scheduled timers
//! forward deterministically. Every host interaction is recorded with its
//! virtual timestamp, so tests can assert not just *what* the engine did
//! but *when*.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use outcrop_core::engine::Engine;
use outcrop_core::host::{RevealHost, TimerToken};
use outcrop_core::track::TrackId;

/// What a recorded host interaction was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostAction {
    /// Reveal classes applied.
    Applied(TrackId),
    /// Reveal classes removed.
    Reverted(TrackId),
    /// Visibility detection stopped for the element.
    Unobserved(TrackId),
}

/// One recorded host interaction with its virtual timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostRecord {
    /// Virtual time of the interaction, in ms.
    pub at_ms: u64,
    /// The interaction.
    pub action: HostAction,
}

#[derive(Clone, Copy, Debug)]
enum TimerKind {
    Apply(TrackId),
    Drain,
}

#[derive(Clone, Copy, Debug)]
struct ScheduledTimer {
    token: TimerToken,
    due_ms: u64,
    /// Breaks due-time ties in scheduling order, matching a real event
    /// loop's FIFO behavior for same-deadline timeouts.
    seq: u64,
    kind: TimerKind,
}

/// A [`RevealHost`] over a virtual clock.
#[derive(Debug, Default)]
pub struct VirtualHost {
    now_ms: u64,
    next_token: u32,
    next_seq: u64,
    timers: Vec<ScheduledTimer>,
    records: Vec<HostRecord>,
    delay_overrides: BTreeMap<u32, u32>,
}

impl VirtualHost {
    /// Creates a host at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in ms.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// All recorded interactions, oldest first.
    #[must_use]
    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }

    /// The recorded apply interactions as `(at_ms, id)` pairs.
    #[must_use]
    pub fn applies(&self) -> Vec<(u64, TrackId)> {
        self.records
            .iter()
            .filter_map(|r| match r.action {
                HostAction::Applied(id) => Some((r.at_ms, id)),
                _ => None,
            })
            .collect()
    }

    /// Number of timers still scheduled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Sets the element-local delay override for slot `idx`.
    pub fn set_delay_override(&mut self, idx: u32, delay_ms: u32) {
        self.delay_overrides.insert(idx, delay_ms);
    }

    fn push_timer(&mut self, due_ms: u64, kind: TimerKind) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(ScheduledTimer {
            token,
            due_ms,
            seq,
            kind,
        });
        token
    }

    /// Removes and returns the next timer due at or before `deadline_ms`.
    fn pop_due(&mut self, deadline_ms: u64) -> Option<ScheduledTimer> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= deadline_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(pos, _)| pos)?;
        Some(self.timers.remove(pos))
    }
}

impl RevealHost for VirtualHost {
    fn apply(&mut self, id: TrackId) {
        self.records.push(HostRecord {
            at_ms: self.now_ms,
            action: HostAction::Applied(id),
        });
    }

    fn revert(&mut self, id: TrackId) {
        self.records.push(HostRecord {
            at_ms: self.now_ms,
            action: HostAction::Reverted(id),
        });
    }

    fn unobserve(&mut self, id: TrackId) {
        self.records.push(HostRecord {
            at_ms: self.now_ms,
            action: HostAction::Unobserved(id),
        });
    }

    fn delay_override(&self, id: TrackId) -> Option<u32> {
        self.delay_overrides.get(&id.index()).copied()
    }

    fn schedule_apply(&mut self, id: TrackId, delay_ms: u32) -> TimerToken {
        let due = self.now_ms + u64::from(delay_ms);
        self.push_timer(due, TimerKind::Apply(id))
    }

    fn cancel_apply(&mut self, token: TimerToken) {
        self.timers.retain(|t| t.token != token);
    }

    fn schedule_drain(&mut self, wait_ms: u32) {
        let due = self.now_ms + u64::from(wait_ms);
        let _ = self.push_timer(due, TimerKind::Drain);
    }
}

/// Advances virtual time by `ms`, firing due timers in order.
///
/// Timers scheduled by the engine *while* advancing (the next stagger
/// step, say) also fire if they fall within the window, so a single
/// `advance` call plays out a whole drain.
pub fn advance(engine: &mut Engine, host: &mut VirtualHost, ms: u64) {
    let deadline = host.now_ms + ms;
    while let Some(timer) = host.pop_due(deadline) {
        host.now_ms = timer.due_ms;
        match timer.kind {
            TimerKind::Apply(id) => engine.on_delay_elapsed(id, host),
            TimerKind::Drain => engine.on_drain_tick(host),
        }
    }
    host.now_ms = deadline;
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcrop_core::config::RevealConfig;

    fn engine(config: RevealConfig, reduced_motion: bool) -> Engine {
        Engine::new(config, reduced_motion)
    }

    #[test]
    fn stagger_spaces_applies_evenly() {
        let config = RevealConfig {
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine(config, false);
        let mut host = VirtualHost::new();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);
        let c = engine.register(120.0, 50.0);

        // A whole batch enters in one detection pass.
        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        engine.on_enter(c, &mut host);
        advance(&mut engine, &mut host, 1_000);

        assert_eq!(host.applies(), [(0, a), (100, b), (200, c)]);
        assert_eq!(host.pending_timers(), 0, "trailing tick consumed");
    }

    #[test]
    fn reduced_motion_applies_whole_batch_at_once() {
        let config = RevealConfig {
            stagger_ms: 100,
            delay_ms: 250,
            ..RevealConfig::default()
        };
        let mut engine = engine(config, true);
        let mut host = VirtualHost::new();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);

        assert_eq!(host.applies(), [(0, a), (0, b)]);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn delay_applies_after_configured_wait() {
        let config = RevealConfig {
            delay_ms: 250,
            ..RevealConfig::default()
        };
        let mut engine = engine(config, false);
        let mut host = VirtualHost::new();
        let id = engine.register(0.0, 50.0);

        engine.on_enter(id, &mut host);
        advance(&mut engine, &mut host, 249);
        assert!(host.applies().is_empty());
        advance(&mut engine, &mut host, 1);
        assert_eq!(host.applies(), [(250, id)]);
    }

    #[test]
    fn element_delay_override_beats_config() {
        let config = RevealConfig {
            delay_ms: 250,
            ..RevealConfig::default()
        };
        let mut engine = engine(config, false);
        let mut host = VirtualHost::new();
        let id = engine.register(0.0, 50.0);
        host.set_delay_override(id.index(), 40);

        engine.on_enter(id, &mut host);
        advance(&mut engine, &mut host, 40);
        assert_eq!(host.applies(), [(40, id)]);
    }

    #[test]
    fn exit_during_drain_wait_skips_the_element() {
        let config = RevealConfig {
            persistent: false,
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine(config, false);
        let mut host = VirtualHost::new();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);
        let c = engine.register(120.0, 50.0);

        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        engine.on_enter(c, &mut host);
        // `b` scrolls back out 50ms in, before its drain turn.
        advance(&mut engine, &mut host, 50);
        engine.on_exit(b, &mut host);
        advance(&mut engine, &mut host, 1_000);

        assert_eq!(host.applies(), [(0, a), (100, c)]);
    }

    #[test]
    fn stragglers_restart_a_finished_drain() {
        let config = RevealConfig {
            stagger_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine(config, false);
        let mut host = VirtualHost::new();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        advance(&mut engine, &mut host, 500);
        // Drain long finished; a later scroll brings in `b`.
        engine.on_enter(b, &mut host);
        advance(&mut engine, &mut host, 500);

        assert_eq!(host.applies(), [(0, a), (500, b)]);
    }

    #[test]
    fn teardown_silences_scheduled_timers() {
        let config = RevealConfig {
            stagger_ms: 100,
            delay_ms: 100,
            ..RevealConfig::default()
        };
        let mut engine = engine(config, false);
        let mut host = VirtualHost::new();
        let a = engine.register(0.0, 50.0);
        let b = engine.register(60.0, 50.0);

        engine.on_enter(a, &mut host);
        engine.on_enter(b, &mut host);
        engine.teardown(&mut host);
        advance(&mut engine, &mut host, 1_000);

        // Only the synchronous first apply made it through; the drain
        // timer fires into a torn-down engine and does nothing.
        assert_eq!(host.applies(), [(0, a)]);
    }

    #[test]
    fn non_persistent_revert_is_timestamped() {
        let config = RevealConfig {
            persistent: false,
            ..RevealConfig::default()
        };
        let mut engine = engine(config, false);
        let mut host = VirtualHost::new();
        let id = engine.register(0.0, 50.0);

        engine.on_enter(id, &mut host);
        advance(&mut engine, &mut host, 300);
        engine.on_exit(id, &mut host);

        assert_eq!(
            host.records(),
            [
                HostRecord {
                    at_ms: 0,
                    action: HostAction::Applied(id)
                },
                HostRecord {
                    at_ms: 300,
                    action: HostAction::Reverted(id)
                },
            ]
        );
    }
}
