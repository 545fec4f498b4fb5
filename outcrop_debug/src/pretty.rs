// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use outcrop_core::trace::{
    ApplyEvent, ApplyPath, DrainTickEvent, EnterEvent, ExitEvent, QueueEvent, RegisterEvent,
    ReleaseEvent, ResyncEvent, RevertEvent, TeardownEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn path_name(path: ApplyPath) -> &'static str {
    match path {
        ApplyPath::Immediate => "immediate",
        ApplyPath::Delayed => "delayed",
        ApplyPath::Queued => "queued",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_register(&mut self, e: &RegisterEvent) {
        let _ = writeln!(
            self.writer,
            "[register] el={:?} top={:.1} height={:.1}",
            e.id, e.layout_top, e.layout_height,
        );
    }

    fn on_resync(&mut self, e: &ResyncEvent) {
        let _ = writeln!(
            self.writer,
            "[resync] el={:?} top={:.1} height={:.1}",
            e.id, e.layout_top, e.layout_height,
        );
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        let _ = writeln!(self.writer, "[release] el={:?}", e.id);
    }

    fn on_enter(&mut self, e: &EnterEvent) {
        let _ = writeln!(self.writer, "[enter] el={:?}", e.id);
    }

    fn on_exit(&mut self, e: &ExitEvent) {
        let _ = writeln!(self.writer, "[exit] el={:?}", e.id);
    }

    fn on_apply(&mut self, e: &ApplyEvent) {
        let _ = writeln!(
            self.writer,
            "[apply] el={:?} path={}",
            e.id,
            path_name(e.path),
        );
    }

    fn on_revert(&mut self, e: &RevertEvent) {
        let _ = writeln!(self.writer, "[revert] el={:?}", e.id);
    }

    fn on_queue_push(&mut self, e: &QueueEvent) {
        let _ = writeln!(self.writer, "[queue:push] el={:?} len={}", e.id, e.len);
    }

    fn on_queue_drop(&mut self, e: &QueueEvent) {
        let _ = writeln!(self.writer, "[queue:drop] el={:?} len={}", e.id, e.len);
    }

    fn on_drain_tick(&mut self, e: &DrainTickEvent) {
        match e.applied {
            Some(id) => {
                let _ = writeln!(
                    self.writer,
                    "[drain] el={:?} remaining={} next_wait={}ms",
                    id,
                    e.remaining,
                    e.next_wait_ms.unwrap_or(0),
                );
            }
            None => {
                let _ = writeln!(self.writer, "[drain] empty, stopping");
            }
        }
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        let _ = writeln!(
            self.writer,
            "[teardown] released={} cancelled_timers={}",
            e.released, e.cancelled_timers,
        );
    }
}
