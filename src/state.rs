//! Interaction state owned by the controller.
//!
//! Only command executors write to [`InteractionState`]; everything else
//! receives clones. Setters enforce the invariants, so a state built through
//! them is always valid.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::Serialize;

use crate::canvas::ObjectRef;
use crate::consts::DEFAULT_ZOOM;
use crate::input::Point;
use crate::zoom::clamp_zoom;

/// Context menu placement, in canvas viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ContextMenu {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
}

/// The controller's view of the editor: selection, zoom, and context menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionState {
    active_object: Option<ObjectRef>,
    zoom_ratio: f64,
    context_menu: ContextMenu,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self { active_object: None, zoom_ratio: DEFAULT_ZOOM, context_menu: ContextMenu::default() }
    }
}

impl InteractionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_object(&self) -> Option<ObjectRef> {
        self.active_object
    }

    /// Always within `[MIN_ZOOM, MAX_ZOOM]`.
    #[must_use]
    pub fn zoom_ratio(&self) -> f64 {
        self.zoom_ratio
    }

    #[must_use]
    pub fn context_menu(&self) -> ContextMenu {
        self.context_menu
    }

    /// Returns `true` if the active object changed.
    pub(crate) fn set_active_object(&mut self, active: Option<ObjectRef>) -> bool {
        let changed = self.active_object != active;
        self.active_object = active;
        changed
    }

    /// Store a zoom ratio, clamped. Returns the stored value.
    pub(crate) fn set_zoom_ratio(&mut self, ratio: f64) -> f64 {
        self.zoom_ratio = clamp_zoom(ratio);
        self.zoom_ratio
    }

    pub(crate) fn open_context_menu(&mut self, at: Point) {
        self.context_menu = ContextMenu { visible: true, left: at.x, top: at.y };
    }

    /// Hide the menu, keeping its last position.
    pub(crate) fn close_context_menu(&mut self) {
        self.context_menu.visible = false;
    }
}
