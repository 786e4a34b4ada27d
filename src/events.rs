//! Event hub: a single-threaded listener registry with owned subscription handles.
//!
//! A hub stands in for one event source (the canvas engine, the document).
//! Listeners are registered against a named event kind and get back a
//! [`SubscriptionId`]; removing that id is the only way to stop delivery.
//!
//! `emit` snapshots the matching listeners before calling any of them, so a
//! listener may subscribe or unsubscribe (itself included) while an event is
//! being delivered. A listener removed mid-emit still receives the event in
//! flight, and a listener added mid-emit first sees the next one.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::input::KeyInput;

/// An event that can be routed through an [`EventHub`].
pub trait HubEvent {
    /// The name listeners subscribe to.
    type Kind: Copy + Eq + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// Handle to a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<E> = Rc<dyn Fn(&E)>;

struct Entry<E: HubEvent> {
    id: SubscriptionId,
    kind: E::Kind,
    listener: Listener<E>,
}

/// Listener registry for one event source.
pub struct EventHub<E: HubEvent> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry<E>>>,
}

impl<E: HubEvent> EventHub<E> {
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: Cell::new(1), entries: RefCell::new(Vec::new()) }
    }

    /// Register `listener` for events of `kind`.
    pub fn subscribe(&self, kind: E::Kind, listener: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push(Entry { id, kind, listener: Rc::new(listener) });
        id
    }

    /// Remove a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    /// Deliver `event` to every listener registered for its kind, in
    /// registration order. Returns the number of listeners called.
    pub fn emit(&self, event: &E) -> usize {
        let kind = event.kind();
        let targets: Vec<Listener<E>> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| Rc::clone(&e.listener))
            .collect();
        for listener in &targets {
            listener(event);
        }
        targets.len()
    }

    #[must_use]
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.entries.borrow().iter().any(|e| e.id == id)
    }

    /// Total number of live listeners across all kinds.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Number of live listeners for one kind.
    #[must_use]
    pub fn listeners_for(&self, kind: E::Kind) -> usize {
        self.entries.borrow().iter().filter(|e| e.kind == kind).count()
    }
}

impl<E: HubEvent> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HubEvent> fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// DOCUMENT EVENTS
// =============================================================================

/// Events raised by the document rather than the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEventKind {
    KeyDown,
}

impl DocumentEventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
        }
    }
}

impl HubEvent for KeyInput {
    type Kind = DocumentEventKind;

    fn kind(&self) -> Self::Kind {
        DocumentEventKind::KeyDown
    }
}

/// The document-level key stream.
pub type KeyHub = EventHub<KeyInput>;
