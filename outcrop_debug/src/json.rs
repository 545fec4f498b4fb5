// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON Lines trace export.
//!
//! [`JsonLinesSink`] writes one JSON object per event, newline-delimited,
//! to a [`Write`](std::io::Write) destination. Suitable for `jq`-style
//! post-mortem analysis of reveal timing.

use std::io::Write;

use serde_json::{Value, json};

use outcrop_core::trace::{
    ApplyEvent, DrainTickEvent, EnterEvent, ExitEvent, QueueEvent, RegisterEvent, ReleaseEvent,
    ResyncEvent, RevertEvent, TeardownEvent, TraceSink,
};
use outcrop_core::track::TrackId;

/// Writes newline-delimited JSON trace events.
pub struct JsonLinesSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

impl JsonLinesSink {
    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    fn emit(&mut self, value: &Value) {
        let _ = serde_json::to_writer(&mut self.writer, value);
        let _ = self.writer.write_all(b"\n");
    }
}

fn id_value(id: TrackId) -> Value {
    json!(format!("{id:?}"))
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_register(&mut self, e: &RegisterEvent) {
        self.emit(&json!({
            "event": "register",
            "el": id_value(e.id),
            "top": e.layout_top,
            "height": e.layout_height,
        }));
    }

    fn on_resync(&mut self, e: &ResyncEvent) {
        self.emit(&json!({
            "event": "resync",
            "el": id_value(e.id),
            "top": e.layout_top,
            "height": e.layout_height,
        }));
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        self.emit(&json!({ "event": "release", "el": id_value(e.id) }));
    }

    fn on_enter(&mut self, e: &EnterEvent) {
        self.emit(&json!({ "event": "enter", "el": id_value(e.id) }));
    }

    fn on_exit(&mut self, e: &ExitEvent) {
        self.emit(&json!({ "event": "exit", "el": id_value(e.id) }));
    }

    fn on_apply(&mut self, e: &ApplyEvent) {
        self.emit(&json!({
            "event": "apply",
            "el": id_value(e.id),
            "path": format!("{:?}", e.path),
        }));
    }

    fn on_revert(&mut self, e: &RevertEvent) {
        self.emit(&json!({ "event": "revert", "el": id_value(e.id) }));
    }

    fn on_queue_push(&mut self, e: &QueueEvent) {
        self.emit(&json!({
            "event": "queue_push",
            "el": id_value(e.id),
            "len": e.len,
        }));
    }

    fn on_queue_drop(&mut self, e: &QueueEvent) {
        self.emit(&json!({
            "event": "queue_drop",
            "el": id_value(e.id),
            "len": e.len,
        }));
    }

    fn on_drain_tick(&mut self, e: &DrainTickEvent) {
        self.emit(&json!({
            "event": "drain_tick",
            "applied": e.applied.map(id_value),
            "remaining": e.remaining,
            "next_wait_ms": e.next_wait_ms,
        }));
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        self.emit(&json!({
            "event": "teardown",
            "released": e.released,
            "cancelled_timers": e.cancelled_timers,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcrop_core::trace::ApplyPath;

    #[test]
    fn lines_are_valid_json() {
        let mut sink = JsonLinesSink::with_writer(Vec::<u8>::new());
        let mut store = outcrop_core::track::TrackStore::new();
        let id = store.register(120.0, 40.0);

        sink.on_enter(&EnterEvent { id });
        sink.on_apply(&ApplyEvent {
            id,
            path: ApplyPath::Immediate,
        });

        let output = String::from_utf8(sink.writer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: Value = serde_json::from_str(line).unwrap();
            assert!(value.get("event").is_some(), "got: {value}");
        }
    }

    #[test]
    fn terminating_drain_has_null_applied() {
        let mut sink = JsonLinesSink::with_writer(Vec::<u8>::new());
        sink.on_drain_tick(&DrainTickEvent {
            applied: None,
            remaining: 0,
            next_wait_ms: None,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        let value: Value = serde_json::from_str(output.trim()).unwrap();
        assert!(value["applied"].is_null());
    }
}
