// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout`-backed one-shot timers.
//!
//! All timers of an instance share a single persistent JS closure; each
//! `setTimeout` call passes a routing token as the callback argument. The
//! closure therefore never has to replace (and drop) itself from inside
//! its own invocation, which `wasm_bindgen::closure::Closure` forbids.
//!
//! Token space: slab indices for delayed-apply timers, plus two reserved
//! sentinels for the stagger-drain tick and the resize debounce.

use alloc::vec::Vec;

use wasm_bindgen::prelude::*;

use outcrop_core::host::TimerToken;
use outcrop_core::track::TrackId;

/// Token routed to the stagger-drain tick handler.
pub(crate) const DRAIN_TOKEN: u32 = u32::MAX;

/// Token routed to the resize-debounce handler.
pub(crate) const RESIZE_TOKEN: u32 = u32::MAX - 1;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object per call, and `web_sys` has
// no `setTimeout` overload that forwards an extra callback argument.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    pub(crate) fn set_timeout_with_token(callback: &JsValue, ms: i32, token: u32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    pub(crate) fn clear_timeout(handle: i32);
}

#[derive(Clone, Copy, Debug)]
struct TimerEntry {
    /// Handle returned by `setTimeout`, for cancellation.
    handle: i32,
    /// Element whose delayed apply this timer carries.
    id: TrackId,
}

/// Slot allocator for in-flight delayed-apply timers.
///
/// Slab indices double as [`TimerToken`] values; freed slots are recycled.
/// The slab never allocates into the sentinel range because an instance
/// cannot have anywhere near `u32::MAX - 1` elements pending at once.
#[derive(Debug, Default)]
pub(crate) struct TimerSlab {
    entries: Vec<Option<TimerEntry>>,
    free_list: Vec<u32>,
}

impl TimerSlab {
    /// Schedules a delayed apply for `id` and returns its token.
    pub(crate) fn schedule(&mut self, callback: &JsValue, id: TrackId, delay_ms: u32) -> TimerToken {
        let idx = match self.free_list.pop() {
            Some(idx) => idx,
            None => {
                self.entries.push(None);
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "slab length is bounded by live element count"
                )]
                let idx = (self.entries.len() - 1) as u32;
                idx
            }
        };
        let handle = set_timeout_with_token(callback, delay_ms.cast_signed(), idx);
        self.entries[idx as usize] = Some(TimerEntry { handle, id });
        TimerToken(idx)
    }

    /// Resolves a fired token to its element, freeing the slot.
    ///
    /// Returns `None` for tokens already cancelled (a fire that raced its
    /// cancellation is dropped by the JS event loop, but the routing layer
    /// tolerates it anyway).
    pub(crate) fn fired(&mut self, token: TimerToken) -> Option<TrackId> {
        let entry = self.entries.get_mut(token.0 as usize)?.take()?;
        self.free_list.push(token.0);
        Some(entry.id)
    }

    /// Cancels a scheduled timer. No-op for already-fired tokens.
    pub(crate) fn cancel(&mut self, token: TimerToken) {
        if let Some(slot) = self.entries.get_mut(token.0 as usize)
            && let Some(entry) = slot.take()
        {
            clear_timeout(entry.handle);
            self.free_list.push(token.0);
        }
    }

    /// Cancels every scheduled timer.
    pub(crate) fn cancel_all(&mut self) {
        for (idx, slot) in self.entries.iter_mut().enumerate() {
            if let Some(entry) = slot.take() {
                clear_timeout(entry.handle);
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "slab length is bounded by live element count"
                )]
                self.free_list.push(idx as u32);
            }
        }
    }
}
