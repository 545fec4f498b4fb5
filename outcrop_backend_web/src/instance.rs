// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instance wiring: DOM host, callback routing, and lifecycle.
//!
//! All mutable state of one reveal instance lives in a single
//! `Rc<RefCell<Option<Instance>>>`. The JS closures (observer, timers,
//! resize) capture a `Weak` to it; [`RevealHandle::destroy`] takes the
//! `Option`, so a callback that fires after destruction upgrades into an
//! empty cell and returns. `Instance` splits into `engine` and `dom`
//! halves precisely so the engine can borrow the host mutably while
//! itself being borrowed from the same cell.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, Window,
};

use outcrop_core::config::{ConfigError, RevealConfig};
use outcrop_core::engine::Engine;
use outcrop_core::host::{RevealHost, TimerToken};
use outcrop_core::margin::RootMargin;
use outcrop_core::track::{RevealState, TrackId};

use crate::overlay::{self, Overlay};
use crate::raf::RafLoop;
use crate::timer::{self, DRAIN_TOKEN, RESIZE_TOKEN, TimerSlab};
use crate::{RevealOptions, Targets, ghost, observer};

/// Resize-debounce wait before proxies are resynced.
const RESIZE_DEBOUNCE_MS: i32 = 150;

pub(crate) struct Instance {
    pub(crate) engine: Engine,
    pub(crate) dom: DomHost,
}

type InstanceCell = Rc<RefCell<Option<Instance>>>;

/// DOM half of an instance: platform resources the engine drives.
pub(crate) struct DomHost {
    window: Window,
    document: Document,
    /// Source elements, indexed by slot.
    sources: Vec<Element>,
    /// Proxy nodes, indexed by slot. `None` briefly during resync.
    proxies: Vec<Option<HtmlElement>>,
    container: HtmlElement,
    /// Config classes, copied out so apply/revert need no engine access.
    classes: Vec<String>,
    callback: Option<Box<dyn FnMut(&Element)>>,
    timers: TimerSlab,
    timer_closure: Closure<dyn FnMut(u32)>,
    drain_handle: Option<i32>,
    resize_handle: Option<i32>,
    observer: IntersectionObserver,
    // Held only to keep the JS function alive for the observer's lifetime.
    _observer_closure: Closure<dyn FnMut(js_sys::Array)>,
    resize_closure: Closure<dyn FnMut()>,
    overlay: Option<Overlay>,
}

impl DomHost {
    /// Releases every platform resource. Runs after the engine's own
    /// teardown has cancelled per-element timers through [`RevealHost`].
    fn teardown(&mut self) {
        self.observer.disconnect();
        self.timers.cancel_all();
        if let Some(handle) = self.drain_handle.take() {
            timer::clear_timeout(handle);
        }
        if let Some(handle) = self.resize_handle.take() {
            timer::clear_timeout(handle);
        }
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize_closure.as_ref().unchecked_ref());
        self.overlay = None;
        self.container.remove();
    }

    /// Effective class list for a source: element-local override wins.
    fn for_each_class(&self, source: &Element, mut f: impl FnMut(&str)) {
        match source.get_attribute(ghost::CLASS_ATTR) {
            Some(local) => {
                for class in local.split_whitespace() {
                    f(class);
                }
            }
            None => {
                for class in &self.classes {
                    f(class);
                }
            }
        }
    }
}

impl RevealHost for DomHost {
    fn apply(&mut self, id: TrackId) {
        let Some(source) = self.sources.get(id.index() as usize) else {
            return;
        };
        let list = source.class_list();
        self.for_each_class(source, |class| {
            let _ = list.add_1(class);
        });
        let source = source.clone();
        if let Some(callback) = self.callback.as_mut() {
            callback(&source);
        }
    }

    fn revert(&mut self, id: TrackId) {
        let Some(source) = self.sources.get(id.index() as usize) else {
            return;
        };
        let list = source.class_list();
        self.for_each_class(source, |class| {
            let _ = list.remove_1(class);
        });
    }

    fn unobserve(&mut self, id: TrackId) {
        if let Some(proxy) = self
            .proxies
            .get(id.index() as usize)
            .and_then(Option::as_ref)
        {
            self.observer.unobserve(proxy);
        }
    }

    fn delay_override(&self, id: TrackId) -> Option<u32> {
        self.sources
            .get(id.index() as usize)?
            .get_attribute(ghost::DELAY_ATTR)?
            .trim()
            .parse()
            .ok()
    }

    fn schedule_apply(&mut self, id: TrackId, delay_ms: u32) -> TimerToken {
        self.timers.schedule(self.timer_closure.as_ref(), id, delay_ms)
    }

    fn cancel_apply(&mut self, token: TimerToken) {
        self.timers.cancel(token);
    }

    fn schedule_drain(&mut self, wait_ms: u32) {
        let handle = timer::set_timeout_with_token(
            self.timer_closure.as_ref(),
            wait_ms.cast_signed(),
            DRAIN_TOKEN,
        );
        self.drain_handle = Some(handle);
    }
}

/// Handle to a live reveal instance.
///
/// Dropping the handle does *not* tear the instance down; fire-and-forget
/// callers can let it go and keep revealing. Call
/// [`destroy`](Self::destroy) to stop observation and release every DOM
/// resource.
pub struct RevealHandle {
    cell: InstanceCell,
}

impl fmt::Debug for RevealHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

impl RevealHandle {
    /// Tears the instance down: disconnects the observer, cancels all
    /// timers, removes proxies and the overlay. Classes already applied to
    /// source elements are left in place. Idempotent.
    pub fn destroy(&self) {
        let Some(mut instance) = self.cell.borrow_mut().take() else {
            return;
        };
        let Instance { engine, dom } = &mut instance;
        engine.teardown(dom);
        dom.teardown();
    }

    /// Returns whether the instance is still live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cell.borrow().is_some()
    }
}

fn config_err(e: ConfigError) -> JsValue {
    JsValue::from_str(&alloc::string::ToString::to_string(&e))
}

pub(crate) fn create(targets: Targets<'_>, options: RevealOptions) -> Result<RevealHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if !observer::supported(&window) {
        return Err(JsValue::from_str("IntersectionObserver is not available"));
    }

    let config = RevealConfig {
        classes: RevealConfig::split_classes(&options.class),
        threshold: options.threshold,
        root_margin: RootMargin::parse(&options.root_margin)
            .map_err(ConfigError::from)
            .map_err(config_err)?,
        persistent: options.persistent,
        stagger_ms: options.stagger_ms,
        delay_ms: options.delay_ms,
        debug: options.debug,
    }
    .validated()
    .map_err(config_err)?;

    let sources = resolve_targets(&document, targets)?;
    if sources.is_empty() {
        // Nothing to track; hand back an inert (already-destroyed) handle.
        return Ok(RevealHandle {
            cell: Rc::new(RefCell::new(None)),
        });
    }

    // Sampled once; a preference change mid-session takes effect on the
    // next reveal() call, not retroactively.
    let reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());

    let mut engine = Engine::new(config.clone(), reduced_motion);
    if let Some(sink) = options.trace {
        engine.set_trace_sink(sink);
    }

    let cell: InstanceCell = Rc::new(RefCell::new(None));

    let timer_closure = {
        let weak = Rc::downgrade(&cell);
        Closure::wrap(Box::new(move |token: u32| {
            on_timer(&weak, token);
        }) as Box<dyn FnMut(u32)>)
    };
    let observer_closure = {
        let weak = Rc::downgrade(&cell);
        Closure::wrap(Box::new(move |entries: js_sys::Array| {
            on_entries(&weak, &entries);
        }) as Box<dyn FnMut(js_sys::Array)>)
    };
    let resize_closure = {
        let weak = Rc::downgrade(&cell);
        Closure::wrap(Box::new(move || {
            on_resize(&weak);
        }) as Box<dyn FnMut()>)
    };

    let intersection = observer::create_observer(&observer_closure, &config)?;

    let container = ghost::create_container(&document)?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&container)?;

    let mut proxies = Vec::with_capacity(sources.len());
    for source in &sources {
        let rect = ghost::capture_geometry(&window, source);
        let id = engine.register(rect.top, rect.height);
        let proxy = ghost::build_proxy(&document, source, id.index(), rect, &config.classes)?;
        container.append_child(&proxy)?;
        intersection.observe(&proxy);
        proxies.push(Some(proxy));
    }

    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;

    let overlay = if config.debug {
        build_overlay(&window, &document, &cell)
    } else {
        None
    };

    let dom = DomHost {
        window,
        document,
        sources,
        proxies,
        container,
        classes: config.classes.clone(),
        callback: options.callback,
        timers: TimerSlab::default(),
        timer_closure,
        drain_handle: None,
        resize_handle: None,
        observer: intersection,
        _observer_closure: observer_closure,
        resize_closure,
        overlay,
    };
    *cell.borrow_mut() = Some(Instance { engine, dom });

    Ok(RevealHandle { cell })
}

/// Resolves caller targets into a deduplicated source list.
///
/// Our own proxy nodes are excluded so a broad selector can't observe the
/// ghosts of another instance.
fn resolve_targets(document: &Document, targets: Targets<'_>) -> Result<Vec<Element>, JsValue> {
    fn push(out: &mut Vec<Element>, el: Element) {
        if el.has_attribute(ghost::PROXY_ATTR) {
            return;
        }
        // Identity dedup; `==` on JS handles compares references.
        if out.iter().any(|seen| *seen == el) {
            return;
        }
        out.push(el);
    }

    let mut out = Vec::new();
    match targets {
        Targets::Selector(selector) => {
            let list = document.query_selector_all(selector)?;
            for i in 0..list.length() {
                if let Some(node) = list.get(i)
                    && let Ok(el) = node.dyn_into::<Element>()
                {
                    push(&mut out, el);
                }
            }
        }
        Targets::Element(el) => push(&mut out, el),
        Targets::List(els) => {
            for el in els {
                push(&mut out, el);
            }
        }
    }
    Ok(out)
}

fn build_overlay(window: &Window, document: &Document, cell: &InstanceCell) -> Option<Overlay> {
    let canvas = overlay::create_canvas(document).ok()?;
    let Some(ctx) = overlay::context_2d(&canvas) else {
        // No 2d context disables the overlay only; reveals proceed.
        canvas.remove();
        return None;
    };
    let weak = Rc::downgrade(cell);
    let window = window.clone();
    let draw_canvas = canvas.clone();
    let raf = RafLoop::new(move |_timestamp_ms| {
        let Some(cell) = weak.upgrade() else { return };
        let Ok(slot) = cell.try_borrow() else { return };
        let Some(instance) = slot.as_ref() else { return };
        overlay::draw(
            &window,
            &draw_canvas,
            &ctx,
            instance.engine.store(),
            instance.engine.config(),
        );
    });
    Some(Overlay::new(canvas, raf))
}

/// Routes a fired `setTimeout` by token.
fn on_timer(weak: &Weak<RefCell<Option<Instance>>>, token: u32) {
    let Some(cell) = weak.upgrade() else { return };
    let mut slot = cell.borrow_mut();
    let Some(Instance { engine, dom }) = slot.as_mut() else {
        return;
    };
    match token {
        DRAIN_TOKEN => {
            dom.drain_handle = None;
            engine.on_drain_tick(dom);
        }
        RESIZE_TOKEN => {
            dom.resize_handle = None;
            resync_all(engine, dom);
        }
        raw => {
            if let Some(id) = dom.timers.fired(TimerToken(raw)) {
                engine.on_delay_elapsed(id, dom);
            }
        }
    }
}

/// Observer callback: resolves entries to slots and feeds the engine.
fn on_entries(weak: &Weak<RefCell<Option<Instance>>>, entries: &js_sys::Array) {
    let Some(cell) = weak.upgrade() else { return };
    let mut slot = cell.borrow_mut();
    let Some(Instance { engine, dom }) = slot.as_mut() else {
        return;
    };
    for entry in entries.iter() {
        let entry: IntersectionObserverEntry = entry.unchecked_into();
        let Some(idx) = ghost::proxy_index(&entry.target()) else {
            continue;
        };
        let Some(id) = engine.store().id_at(idx) else {
            continue;
        };
        if entry.is_intersecting() {
            engine.on_enter(id, dom);
        } else {
            engine.on_exit(id, dom);
        }
    }
}

/// Window resize listener: debounced through the shared timer closure.
fn on_resize(weak: &Weak<RefCell<Option<Instance>>>) {
    let Some(cell) = weak.upgrade() else { return };
    let mut slot = cell.borrow_mut();
    let Some(instance) = slot.as_mut() else { return };
    let dom = &mut instance.dom;
    if let Some(handle) = dom.resize_handle.take() {
        timer::clear_timeout(handle);
    }
    let handle = timer::set_timeout_with_token(
        dom.timer_closure.as_ref(),
        RESIZE_DEBOUNCE_MS,
        RESIZE_TOKEN,
    );
    dom.resize_handle = Some(handle);
}

/// Rebuilds every proxy after a layout change.
///
/// Reflow moves resting positions, so each proxy is remeasured from its
/// source and replaced; slot geometry is rewritten for the overlay.
fn resync_all(engine: &mut Engine, dom: &mut DomHost) {
    for id in engine.store().live_ids() {
        let idx = id.index() as usize;
        if let Some(old) = dom.proxies.get_mut(idx).and_then(|slot| slot.take()) {
            dom.observer.unobserve(&old);
            old.remove();
        }
        let source = dom.sources[idx].clone();
        let rect = ghost::capture_geometry(&dom.window, &source);
        engine.update_layout(id, rect.top, rect.height);
        let Ok(proxy) = ghost::build_proxy(&dom.document, &source, id.index(), rect, &dom.classes)
        else {
            continue;
        };
        let _ = dom.container.append_child(&proxy);
        // Revealed one-shot elements need no further detection; their
        // geometry still feeds the overlay.
        let settled =
            engine.config().persistent && engine.store().state(id) == RevealState::Revealed;
        if !settled {
            dom.observer.observe(&proxy);
        }
        dom.proxies[idx] = Some(proxy);
    }
}
