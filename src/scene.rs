//! In-memory reference canvas: objects, draw order, selection, and history.
//!
//! `SceneCanvas` implements [`Canvas`] without drawing anything. It backs the
//! replay binary and the tests, and documents what the controller expects of
//! a real engine: stable object refs, an engine-side selection, and an
//! undo/redo history that ignores requests when empty.
//!
//! History is snapshot-based. Structural edits (insert, remove, add) push the
//! prior state onto a bounded undo stack and clear the redo stack. Position
//! nudges are not recorded, matching engines that only checkpoint on
//! "modified" events.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::canvas::{AssetSource, Canvas, CanvasObject, ObjectDescriptor, ObjectKind, ObjectRef};
use crate::consts::{DEFAULT_ZOOM, SCENE_HISTORY_LIMIT};
use crate::input::Point;

/// Default edge length for objects added from a descriptor.
const DEFAULT_OBJECT_SIZE: f64 = 100.0;

/// Axis-aligned clip rectangle in object-local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Cached corner coordinates used for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coords {
    pub top_left: Point,
    pub bottom_right: Point,
}

/// A drawable object held by [`SceneCanvas`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub name: Option<String>,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub clip: Option<ClipRegion>,
    pub source: Option<AssetSource>,
    coords: Coords,
}

impl SceneObject {
    #[must_use]
    pub fn new(kind: ObjectKind, left: f64, top: f64, width: f64, height: f64) -> Self {
        let mut obj = Self { kind, name: None, left, top, width, height, clip: None, source: None, coords: Coords::default() };
        obj.recompute_coords();
        obj
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn clipped(mut self, clip: ClipRegion) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Coordinates as of the last [`CanvasObject::recompute_coords`] call.
    #[must_use]
    pub fn coords(&self) -> Coords {
        self.coords
    }
}

impl CanvasObject for SceneObject {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn top(&self) -> f64 {
        self.top
    }

    fn left(&self) -> f64 {
        self.left
    }

    fn set_top(&mut self, top: f64) {
        self.top = top;
    }

    fn set_left(&mut self, left: f64) {
        self.left = left;
    }

    fn recompute_coords(&mut self) {
        self.coords = Coords {
            top_left: Point::new(self.left, self.top),
            bottom_right: Point::new(self.left + self.width, self.top + self.height),
        };
    }

    fn clear_clip(&mut self) {
        self.clip = None;
    }

    fn preview(&self) -> String {
        let (w, h) = (self.width, self.height);
        let clip = match self.clip {
            Some(c) => format!(
                "<defs><clipPath id='c'><rect x='{}' y='{}' width='{}' height='{}'/></clipPath></defs>",
                c.x, c.y, c.width, c.height
            ),
            None => String::new(),
        };
        let clip_attr = if self.clip.is_some() { " clip-path='url(#c)'" } else { "" };
        format!(
            "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}'>{clip}<rect class='{}' width='{w}' height='{h}'{clip_attr}/></svg>",
            self.kind.as_str()
        )
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    objects: HashMap<ObjectRef, SceneObject>,
    order: Vec<ObjectRef>,
}

/// In-memory canvas engine.
#[derive(Debug)]
pub struct SceneCanvas {
    objects: HashMap<ObjectRef, SceneObject>,
    order: Vec<ObjectRef>,
    active: Option<ObjectRef>,
    zoom: f64,
    renders: u64,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    history_limit: usize,
}

impl SceneCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(SCENE_HISTORY_LIMIT)
    }

    #[must_use]
    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            objects: HashMap::new(),
            order: Vec::new(),
            active: None,
            zoom: DEFAULT_ZOOM,
            renders: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history_limit,
        }
    }

    /// Add an object on top of the stack, recording history.
    pub fn insert(&mut self, obj: SceneObject) -> ObjectRef {
        self.checkpoint();
        let id = ObjectRef::new();
        self.objects.insert(id, obj);
        self.order.push(id);
        id
    }

    /// Remove an object, recording history. Clears the selection if it was active.
    pub fn remove(&mut self, id: ObjectRef) -> Option<SceneObject> {
        if !self.objects.contains_key(&id) {
            return None;
        }
        self.checkpoint();
        self.order.retain(|o| *o != id);
        if self.active == Some(id) {
            self.active = None;
        }
        self.objects.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: ObjectRef) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Set the engine-side selection. Unknown refs are refused.
    pub fn set_active(&mut self, id: Option<ObjectRef>) -> bool {
        match id {
            Some(id) if !self.objects.contains_key(&id) => false,
            _ => {
                self.active = id;
                true
            }
        }
    }

    /// Number of render requests received.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// `(undo, redo)` stack depths.
    #[must_use]
    pub fn history_depth(&self) -> (usize, usize) {
        (self.undo_stack.len(), self.redo_stack.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { objects: self.objects.clone(), order: self.order.clone() }
    }

    fn checkpoint(&mut self) {
        if self.history_limit == 0 {
            return;
        }
        if self.undo_stack.len() == self.history_limit {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(self.snapshot());
        self.redo_stack.clear();
    }

    fn restore(&mut self, snap: Snapshot) {
        self.objects = snap.objects;
        self.order = snap.order;
        if self.active.is_some_and(|id| !self.objects.contains_key(&id)) {
            self.active = None;
        }
    }
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for SceneCanvas {
    type Object = SceneObject;

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_zoom(&mut self, ratio: f64) {
        self.zoom = ratio;
    }

    fn active_object(&self) -> Option<ObjectRef> {
        self.active
    }

    fn object_mut(&mut self, id: ObjectRef) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    fn objects(&self) -> Vec<(ObjectRef, &SceneObject)> {
        self.order
            .iter()
            .filter_map(|id| self.objects.get(id).map(|o| (*id, o)))
            .collect()
    }

    fn add_object(&mut self, descriptor: ObjectDescriptor) -> ObjectRef {
        let mut obj = SceneObject::new(descriptor.kind, 0.0, 0.0, DEFAULT_OBJECT_SIZE, DEFAULT_OBJECT_SIZE);
        obj.name = descriptor.name;
        obj.source = Some(descriptor.source);
        let id = self.insert(obj);
        self.active = Some(id);
        id
    }

    fn request_render(&mut self) {
        self.renders += 1;
    }

    fn undo(&mut self) {
        let Some(prev) = self.undo_stack.pop() else {
            return;
        };
        self.redo_stack.push(self.snapshot());
        self.restore(prev);
    }

    fn redo(&mut self) {
        let Some(next) = self.redo_stack.pop() else {
            return;
        };
        self.undo_stack.push(self.snapshot());
        self.restore(next);
    }
}
