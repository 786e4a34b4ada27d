//! Canvas collaborator contract.
//!
//! The graphics engine that owns the object graph, hit-testing, and the
//! render loop lives outside this crate. The controller reaches it only
//! through the [`Canvas`] and [`CanvasObject`] traits, and listens to it
//! through the event hub carried alongside it in a [`CanvasHandle`].

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::{EventHub, HubEvent};
use crate::input::{PointerDown, WheelInput};

/// Opaque handle to an object owned by the canvas.
///
/// Holding an `ObjectRef` does not keep the object alive. Resolving a ref
/// whose object is gone yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(Uuid);

impl ObjectRef {
    /// Mint a fresh random ref.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ObjectRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The kind of a drawable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Rect,
    Ellipse,
    Text,
    Image,
    Svg,
    Group,
}

impl ObjectKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Text => "text",
            Self::Image => "image",
            Self::Svg => "svg",
            Self::Group => "group",
        }
    }
}

/// Where an externally sourced object's content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AssetSource {
    /// Remote location the canvas loads itself.
    Url(String),
    /// Inline vector markup.
    Markup(String),
}

/// Request to add an object to the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub source: AssetSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ObjectDescriptor {
    /// An SVG object loaded from `source`.
    #[must_use]
    pub fn svg(source: AssetSource) -> Self {
        Self { kind: ObjectKind::Svg, source, name: None }
    }
}

/// A drawable object as seen by the controller and the panels.
pub trait CanvasObject {
    fn kind(&self) -> ObjectKind;
    fn name(&self) -> Option<&str>;

    fn top(&self) -> f64;
    fn left(&self) -> f64;
    fn set_top(&mut self, top: f64);
    fn set_left(&mut self, left: f64);

    /// Refresh cached hit-box and control coordinates after a position change.
    fn recompute_coords(&mut self);

    /// Drop any clip region; clipping is a rendering artifact, not identity.
    fn clear_clip(&mut self);

    /// Render a small preview image as a data URL.
    fn preview(&self) -> String;
}

/// The graphics engine the controller drives.
pub trait Canvas {
    type Object: CanvasObject + Clone;

    fn zoom(&self) -> f64;
    fn set_zoom(&mut self, ratio: f64);

    /// The engine's own notion of the current selection.
    fn active_object(&self) -> Option<ObjectRef>;

    fn object_mut(&mut self, id: ObjectRef) -> Option<&mut Self::Object>;

    /// All objects in draw order, bottom first.
    fn objects(&self) -> Vec<(ObjectRef, &Self::Object)>;

    fn add_object(&mut self, descriptor: ObjectDescriptor) -> ObjectRef;

    fn request_render(&mut self);

    /// Step back in history. A no-op when there is nothing to undo.
    fn undo(&mut self);

    /// Step forward in history. A no-op when there is nothing to redo.
    fn redo(&mut self);
}

// =============================================================================
// EVENTS
// =============================================================================

/// Events the canvas engine emits.
#[derive(Debug, Clone)]
pub enum CanvasEvent {
    PointerDown(PointerDown),
    Wheel(WheelInput),
    SelectionCreated,
    SelectionUpdated,
    SelectionCleared,
}

/// Names of canvas events, used as subscription keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEventKind {
    PointerDown,
    Wheel,
    SelectionCreated,
    SelectionUpdated,
    SelectionCleared,
}

impl CanvasEventKind {
    pub const ALL: [Self; 5] = [
        Self::PointerDown,
        Self::Wheel,
        Self::SelectionCreated,
        Self::SelectionUpdated,
        Self::SelectionCleared,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointer-down",
            Self::Wheel => "wheel",
            Self::SelectionCreated => "selection-created",
            Self::SelectionUpdated => "selection-updated",
            Self::SelectionCleared => "selection-cleared",
        }
    }
}

impl HubEvent for CanvasEvent {
    type Kind = CanvasEventKind;

    fn kind(&self) -> CanvasEventKind {
        match self {
            Self::PointerDown(_) => CanvasEventKind::PointerDown,
            Self::Wheel(_) => CanvasEventKind::Wheel,
            Self::SelectionCreated => CanvasEventKind::SelectionCreated,
            Self::SelectionUpdated => CanvasEventKind::SelectionUpdated,
            Self::SelectionCleared => CanvasEventKind::SelectionCleared,
        }
    }
}

// =============================================================================
// HANDLE
// =============================================================================

/// Shared handle to a canvas and its event stream.
///
/// The event hub sits beside the canvas, not inside its `RefCell`, so
/// listeners can mutate the canvas while an event is being emitted.
pub struct CanvasHandle<C> {
    canvas: Rc<RefCell<C>>,
    events: Rc<EventHub<CanvasEvent>>,
}

impl<C: Canvas> CanvasHandle<C> {
    #[must_use]
    pub fn new(canvas: C) -> Self {
        Self { canvas: Rc::new(RefCell::new(canvas)), events: Rc::new(EventHub::new()) }
    }

    #[must_use]
    pub fn events(&self) -> &EventHub<CanvasEvent> {
        &self.events
    }

    /// Emit an event on this canvas. Returns the number of listeners called.
    pub fn emit(&self, event: &CanvasEvent) -> usize {
        self.events.emit(event)
    }

    /// Run `f` with shared access. `None` if the canvas is mutably borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        match self.canvas.try_borrow() {
            Ok(c) => Some(f(&*c)),
            Err(_) => None,
        }
    }

    /// Run `f` with exclusive access. `None` if the canvas is already borrowed.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        match self.canvas.try_borrow_mut() {
            Ok(mut c) => Some(f(&mut *c)),
            Err(_) => None,
        }
    }

    /// Whether both handles point at the same canvas.
    #[must_use]
    pub fn same_canvas(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.canvas, &other.canvas)
    }
}

impl<C> Clone for CanvasHandle<C> {
    fn clone(&self) -> Self {
        Self { canvas: Rc::clone(&self.canvas), events: Rc::clone(&self.events) }
    }
}

impl<C> fmt::Debug for CanvasHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasHandle")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
