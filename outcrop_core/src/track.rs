// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays storage for tracked elements.
//!
//! Each registered source element occupies one slot addressed by a
//! [`TrackId`] handle. Destroyed slots are recycled via a free list, and
//! generation counters prevent stale handle access. The backend keeps its
//! DOM nodes (source and proxy) in parallel slot-indexed tables, so
//! proxy → source resolution is a direct index lookup in both directions
//! rather than a scan.

use alloc::vec::Vec;
use core::fmt;

use crate::host::TimerToken;

/// Handle to a tracked element slot.
///
/// Generation counters make handles to released slots detectably stale.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl TrackId {
    /// Returns the raw slot index.
    ///
    /// Backends stamp this on the proxy node and index their parallel
    /// source/proxy tables with it.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackId({}v{})", self.idx, self.generation)
    }
}

/// Reveal state of a tracked element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// Not revealed; the initial state.
    #[default]
    Hidden,
    /// Reveal classes are applied. Terminal under persistent config.
    Revealed,
}

/// Struct-of-arrays storage for all tracked elements.
///
/// `layout_top`/`layout_height` are document coordinates captured at
/// proxy-creation time with any active transform subtracted out; they are
/// rewritten wholesale on resync, never adjusted incrementally.
#[derive(Debug, Default)]
pub struct TrackStore {
    layout_top: Vec<f64>,
    layout_height: Vec<f64>,
    state: Vec<RevealState>,
    queued: Vec<bool>,
    pending_timer: Vec<Option<TimerToken>>,

    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl TrackStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live slots.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Registers a tracked element and returns its handle.
    ///
    /// The slot starts hidden, unqueued, with no pending timer.
    pub fn register(&mut self, layout_top: f64, layout_height: f64) -> TrackId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.layout_top[idx as usize] = layout_top;
            self.layout_height[idx as usize] = layout_height;
            self.state[idx as usize] = RevealState::Hidden;
            self.queued[idx as usize] = false;
            self.pending_timer[idx as usize] = None;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.layout_top.push(layout_top);
            self.layout_height.push(layout_height);
            self.state.push(RevealState::Hidden);
            self.queued.push(false);
            self.pending_timer.push(None);
            self.generation.push(0);
            idx
        };

        TrackId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Releases a slot, freeing it for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn release(&mut self, id: TrackId) {
        self.validate(id);
        // Bump generation so old handles immediately fail validation.
        self.generation[id.idx as usize] += 1;
        self.free_list.push(id.idx);
    }

    /// Returns whether the given handle refers to a live slot.
    #[must_use]
    pub fn is_alive(&self, id: TrackId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the live handle at raw slot `idx`, if any.
    ///
    /// This is the proxy → source direction of the bidirectional lookup:
    /// the backend reads the slot index off a proxy node and resolves it
    /// here in O(1).
    #[must_use]
    pub fn id_at(&self, idx: u32) -> Option<TrackId> {
        if idx >= self.len || self.free_list.contains(&idx) {
            return None;
        }
        Some(TrackId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    /// Returns all live handles in slot order.
    #[must_use]
    pub fn live_ids(&self) -> Vec<TrackId> {
        (0..self.len).filter_map(|idx| self.id_at(idx)).collect()
    }

    // -- Per-slot accessors --

    /// Resting document-coordinate top of the element.
    #[must_use]
    pub fn layout_top(&self, id: TrackId) -> f64 {
        self.validate(id);
        self.layout_top[id.idx as usize]
    }

    /// Height of the element at capture time.
    #[must_use]
    pub fn layout_height(&self, id: TrackId) -> f64 {
        self.validate(id);
        self.layout_height[id.idx as usize]
    }

    /// Current reveal state.
    #[must_use]
    pub fn state(&self, id: TrackId) -> RevealState {
        self.validate(id);
        self.state[id.idx as usize]
    }

    /// Sets the reveal state.
    pub fn set_state(&mut self, id: TrackId, state: RevealState) {
        self.validate(id);
        self.state[id.idx as usize] = state;
    }

    /// Whether the element is waiting in the stagger queue.
    #[must_use]
    pub fn queued(&self, id: TrackId) -> bool {
        self.validate(id);
        self.queued[id.idx as usize]
    }

    /// Sets the queued flag.
    pub fn set_queued(&mut self, id: TrackId, queued: bool) {
        self.validate(id);
        self.queued[id.idx as usize] = queued;
    }

    /// Token of the pending delayed-apply timer, if one is scheduled.
    #[must_use]
    pub fn pending_timer(&self, id: TrackId) -> Option<TimerToken> {
        self.validate(id);
        self.pending_timer[id.idx as usize]
    }

    /// Stores the pending delayed-apply timer token.
    pub fn set_pending_timer(&mut self, id: TrackId, token: Option<TimerToken>) {
        self.validate(id);
        self.pending_timer[id.idx as usize] = token;
    }

    /// Takes the pending timer token out of the slot, leaving `None`.
    pub fn take_pending_timer(&mut self, id: TrackId) -> Option<TimerToken> {
        self.validate(id);
        self.pending_timer[id.idx as usize].take()
    }

    /// Rewrites the layout geometry after a proxy rebuild.
    pub fn update_layout(&mut self, id: TrackId, layout_top: f64, layout_height: f64) {
        self.validate(id);
        self.layout_top[id.idx as usize] = layout_top;
        self.layout_height[id.idx as usize] = layout_height;
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: TrackId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale TrackId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}
