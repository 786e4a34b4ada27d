//! Interaction controller: subscription lifecycle and event-to-command translation.
//!
//! DESIGN
//! ======
//! The controller owns one [`InteractionState`] and the list of subscriptions
//! it made. `attach` registers one listener per canvas event kind plus one
//! document key-down listener; `detach` (and `Drop`) removes every one of
//! them. Listeners hold only a `Weak` to the controller internals, so a
//! listener that outlives its controller does nothing.
//!
//! The key-down listener captures the active object at bind time. Whenever a
//! command changes `active_object`, the listener is unsubscribed and a new
//! one bound with the fresh value, so a key press never acts on a selection
//! that has since changed.
//!
//! Each handler reads current state at dispatch time. Nothing is assumed
//! about ordering between the canvas stream and the key stream.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::canvas::{Canvas, CanvasEvent, CanvasEventKind, CanvasHandle, ObjectDescriptor, ObjectRef};
use crate::command::{self, Command, Outcome};
use crate::config::InteractionConfig;
use crate::events::{DocumentEventKind, EventHub, KeyHub, SubscriptionId};
use crate::input::{Button, KeyInput};
use crate::keyboard;
use crate::state::InteractionState;
use crate::zoom::ZoomDirection;

type Handler<C> = fn(&Rc<Inner<C>>, &CanvasEvent);

struct Inner<C: Canvas + 'static> {
    config: InteractionConfig,
    keys: Rc<KeyHub>,
    canvas: RefCell<Option<CanvasHandle<C>>>,
    state: RefCell<InteractionState>,
    canvas_subs: RefCell<Vec<SubscriptionId>>,
    key_sub: Cell<Option<SubscriptionId>>,
}

/// Translates canvas and keyboard events into commands and owns the resulting state.
pub struct InteractionController<C: Canvas + 'static> {
    inner: Rc<Inner<C>>,
}

impl<C: Canvas + 'static> InteractionController<C> {
    /// Create a detached controller listening for keys on `keys` once attached.
    #[must_use]
    pub fn new(keys: Rc<KeyHub>, config: InteractionConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                keys,
                canvas: RefCell::new(None),
                state: RefCell::new(InteractionState::new()),
                canvas_subs: RefCell::new(Vec::new()),
                key_sub: Cell::new(None),
            }),
        }
    }

    /// Start listening to `canvas`.
    ///
    /// `None` is ignored: a canvas that is still loading is not an error.
    /// Attaching a different canvas releases the current one first;
    /// re-attaching the same canvas is a no-op.
    pub fn attach(&self, canvas: Option<CanvasHandle<C>>) {
        let Some(canvas) = canvas else {
            trace!("attach ignored: canvas unavailable");
            return;
        };
        let same = self
            .inner
            .canvas
            .borrow()
            .as_ref()
            .is_some_and(|current| current.same_canvas(&canvas));
        if same {
            return;
        }
        self.detach();

        let weak = Rc::downgrade(&self.inner);
        let events = canvas.events();
        let subs = vec![
            listen(&weak, events, CanvasEventKind::PointerDown, on_pointer_down),
            listen(&weak, events, CanvasEventKind::Wheel, on_wheel),
            listen(&weak, events, CanvasEventKind::SelectionCreated, on_selection),
            listen(&weak, events, CanvasEventKind::SelectionUpdated, on_selection),
            listen(&weak, events, CanvasEventKind::SelectionCleared, on_selection),
        ];
        let engine_selection = canvas.with(C::active_object);
        *self.inner.canvas_subs.borrow_mut() = subs;
        *self.inner.canvas.borrow_mut() = Some(canvas);

        // Adopt the engine's current selection, then bind keys against it.
        // A busy canvas cannot be read; keep the selection held from before.
        match engine_selection {
            Some(active) => self.inner.fire(Command::Select(active)),
            None => trace!("selection re-sync skipped: canvas busy"),
        }
        self.inner.rebind_keys();
        debug!(subscriptions = self.subscription_count(), "controller attached");
    }

    /// Remove every subscription made by [`attach`](Self::attach).
    ///
    /// Safe to call at any time, any number of times.
    pub fn detach(&self) {
        self.inner.release();
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.canvas.borrow().is_some()
    }

    /// The attached canvas, if any.
    #[must_use]
    pub fn canvas(&self) -> Option<CanvasHandle<C>> {
        self.inner.canvas.borrow().clone()
    }

    /// Snapshot of the current interaction state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn config(&self) -> InteractionConfig {
        self.inner.config
    }

    /// Execute a command directly, as if it had come from an input event.
    #[must_use]
    pub fn dispatch(&self, cmd: Command) -> Outcome {
        self.inner.dispatch(cmd)
    }

    /// Entry point for objects sourced outside the canvas (e.g. the objects panel).
    #[must_use]
    pub fn issue_add_object(&self, descriptor: ObjectDescriptor) -> Outcome {
        self.inner.dispatch(Command::AddObject(descriptor))
    }

    /// Number of live subscriptions this controller holds.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.inner.canvas_subs.borrow().len() + usize::from(self.inner.key_sub.get().is_some())
    }

    /// The current key-down subscription. Changes every time keys are re-bound.
    #[must_use]
    pub fn key_subscription(&self) -> Option<SubscriptionId> {
        self.inner.key_sub.get()
    }
}

impl<C: Canvas + 'static> Drop for InteractionController<C> {
    fn drop(&mut self) {
        self.inner.release();
    }
}

impl<C: Canvas + 'static> fmt::Debug for InteractionController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("attached", &self.is_attached())
            .field("subscriptions", &self.subscription_count())
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl<C: Canvas + 'static> Inner<C> {
    /// Execute `cmd` against a working copy of the state, then commit it.
    ///
    /// No borrow of `state` is held while the executor calls into the
    /// canvas, so a collaborator may read `state()` from inside
    /// `request_render` and friends. It sees the state as of before the
    /// command.
    fn dispatch(self: &Rc<Self>, cmd: Command) -> Outcome {
        let canvas = self.canvas.borrow().clone();
        let mut next = self.state.borrow().clone();
        let before = next.active_object();
        let outcome = command::execute(cmd, canvas.as_ref(), &mut next, &self.config);
        let selection_changed = next.active_object() != before;
        *self.state.borrow_mut() = next;
        if selection_changed {
            self.rebind_keys();
        }
        outcome
    }

    /// Dispatch on behalf of an input handler, which has no caller to report to.
    fn fire(self: &Rc<Self>, cmd: Command) {
        let name = cmd.name();
        let outcome = self.dispatch(cmd);
        trace!(command = name, applied = outcome.is_applied(), "input handled");
    }

    /// Replace the key-down listener with one bound to the current selection.
    fn rebind_keys(self: &Rc<Self>) {
        if let Some(old) = self.key_sub.take() {
            self.keys.unsubscribe(old);
        }
        if self.canvas.borrow().is_none() {
            return;
        }
        let bound = self.state.borrow().active_object();
        let weak = Rc::downgrade(self);
        let id = self.keys.subscribe(DocumentEventKind::KeyDown, move |key: &KeyInput| {
            if let Some(inner) = weak.upgrade() {
                inner.on_key_down(key, bound);
            }
        });
        self.key_sub.set(Some(id));
        debug!(event = DocumentEventKind::KeyDown.as_str(), subscription = ?id, active = ?bound, "key listener bound");
    }

    fn on_key_down(self: &Rc<Self>, key: &KeyInput, bound: Option<ObjectRef>) {
        let Some(cmd) = keyboard::classify(key, self.config.move_step) else {
            return;
        };
        if matches!(cmd, Command::MoveBy { .. }) && bound.is_none() {
            trace!(code = %key.code, "arrow ignored: nothing selected");
            return;
        }
        self.fire(cmd);
    }

    fn release(&self) {
        let canvas = self.canvas.borrow_mut().take();
        let subs: Vec<SubscriptionId> = self.canvas_subs.borrow_mut().drain(..).collect();
        if let Some(canvas) = &canvas {
            for id in subs {
                canvas.events().unsubscribe(id);
            }
        }
        if let Some(id) = self.key_sub.take() {
            self.keys.unsubscribe(id);
        }
        if canvas.is_some() {
            debug!("controller detached");
        }
    }

    fn attached_canvas(&self) -> Option<CanvasHandle<C>> {
        self.canvas.borrow().clone()
    }
}

fn listen<C: Canvas + 'static>(
    weak: &Weak<Inner<C>>,
    events: &EventHub<CanvasEvent>,
    kind: CanvasEventKind,
    handler: Handler<C>,
) -> SubscriptionId {
    let weak = weak.clone();
    events.subscribe(kind, move |event: &CanvasEvent| {
        if let Some(inner) = weak.upgrade() {
            handler(&inner, event);
        }
    })
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Secondary button on an object opens the menu; any other press closes it.
fn on_pointer_down<C: Canvas + 'static>(inner: &Rc<Inner<C>>, event: &CanvasEvent) {
    let CanvasEvent::PointerDown(down) = event else {
        return;
    };
    let cmd = if down.button == Button::Secondary && down.target.is_some() {
        Command::OpenContextMenu { left: down.offset.x, top: down.offset.y }
    } else {
        Command::CloseContextMenu
    };
    inner.fire(cmd);
}

/// Ctrl+wheel zooms. The page never scrolls from a wheel over the canvas.
fn on_wheel<C: Canvas + 'static>(inner: &Rc<Inner<C>>, event: &CanvasEvent) {
    let CanvasEvent::Wheel(wheel) = event else {
        return;
    };
    if wheel.ctrl {
        inner.fire(Command::Zoom(ZoomDirection::from_wheel_delta(wheel.delta_y)));
    }
    wheel.prevent_default();
    wheel.stop_propagation();
}

fn on_selection<C: Canvas + 'static>(inner: &Rc<Inner<C>>, event: &CanvasEvent) {
    let active = match event {
        CanvasEvent::SelectionCreated | CanvasEvent::SelectionUpdated => {
            let Some(canvas) = inner.attached_canvas() else {
                return;
            };
            let Some(active) = canvas.with(C::active_object) else {
                trace!("selection event ignored: canvas busy");
                return;
            };
            active
        }
        CanvasEvent::SelectionCleared => None,
        CanvasEvent::PointerDown(_) | CanvasEvent::Wheel(_) => return,
    };
    inner.fire(Command::Select(active));
}
