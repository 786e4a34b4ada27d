//! Input model: pointer, wheel, and key descriptors plus boundary validation.
//!
//! Hosts receive loosely-shaped events (DOM events, JSON from a replay file).
//! The `Raw*` types deserialize those shapes as-is; converting them with
//! `TryFrom` yields the typed descriptors the controller consumes, carrying
//! only the fields the core reads. Anything that fails validation is rejected
//! here with an [`InputError`] and never reaches the controller.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::canvas::ObjectRef;

/// Errors raised while validating a raw event into a typed descriptor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// A coordinate or delta was NaN or infinite.
    #[error("non-finite value for `{field}`")]
    NonFinite { field: &'static str },

    /// The button code is not one the canvas engine reports.
    #[error("unknown mouse button code: {0}")]
    UnknownButton(i64),

    /// The key event carried no `code`.
    #[error("key event has an empty code")]
    EmptyKeyCode,
}

/// A point in canvas viewport coordinates (CSS pixels from the top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (wheel click).
    Middle,
    /// Right mouse button; the context-menu trigger.
    Secondary,
}

impl Button {
    /// Map the canvas engine's 1-based button numbering (1 left, 2 middle, 3 right).
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Primary),
            2 => Some(Self::Middle),
            3 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A pointer-down on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDown {
    /// Which button went down.
    pub button: Button,
    /// The object under the pointer, as hit-tested by the canvas.
    pub target: Option<ObjectRef>,
    /// Pointer position relative to the canvas viewport.
    pub offset: Point,
}

/// A wheel event over the canvas.
///
/// The default-action and propagation flags mirror the DOM: listeners set
/// them, and the host consults them after dispatch.
#[derive(Debug, Clone, Default)]
pub struct WheelInput {
    /// Vertical scroll amount (positive = scroll down).
    pub delta_y: f64,
    /// Ctrl key held during the scroll.
    pub ctrl: bool,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl WheelInput {
    #[must_use]
    pub fn new(delta_y: f64, ctrl: bool) -> Self {
        Self { delta_y, ctrl, ..Self::default() }
    }

    /// Suppress the host's default scroll behavior.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Stop the event from bubbling past the canvas.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// A document-level key-down.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyInput {
    /// Physical key code, e.g. `"Z"` or `"ArrowUp"`.
    pub code: String,
    /// Ctrl key held.
    pub ctrl: bool,
    /// Shift key held.
    pub shift: bool,
}

impl KeyInput {
    #[must_use]
    pub fn new(code: impl Into<String>, ctrl: bool, shift: bool) -> Self {
        Self { code: code.into(), ctrl, shift }
    }
}

// =============================================================================
// RAW BOUNDARY
// =============================================================================

/// Pointer-down as reported by the canvas engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPointerEvent {
    pub button: i64,
    #[serde(default)]
    pub target: Option<ObjectRef>,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Wheel event as reported by the browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWheelEvent {
    pub delta_y: f64,
    #[serde(default)]
    pub ctrl_key: bool,
}

/// Key-down as reported by the browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKeyEvent {
    pub code: String,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub shift_key: bool,
}

impl TryFrom<RawPointerEvent> for PointerDown {
    type Error = InputError;

    fn try_from(raw: RawPointerEvent) -> Result<Self, Self::Error> {
        let button = Button::from_code(raw.button).ok_or(InputError::UnknownButton(raw.button))?;
        let x = finite("offsetX", raw.offset_x)?;
        let y = finite("offsetY", raw.offset_y)?;
        Ok(Self { button, target: raw.target, offset: Point::new(x, y) })
    }
}

impl TryFrom<RawWheelEvent> for WheelInput {
    type Error = InputError;

    fn try_from(raw: RawWheelEvent) -> Result<Self, Self::Error> {
        let delta_y = finite("deltaY", raw.delta_y)?;
        Ok(Self::new(delta_y, raw.ctrl_key))
    }
}

impl TryFrom<RawKeyEvent> for KeyInput {
    type Error = InputError;

    fn try_from(raw: RawKeyEvent) -> Result<Self, Self::Error> {
        let code = raw.code.trim();
        if code.is_empty() {
            return Err(InputError::EmptyKeyCode);
        }
        Ok(Self::new(normalize_code(code), raw.ctrl_key, raw.shift_key))
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() { Ok(value) } else { Err(InputError::NonFinite { field }) }
}

/// Collapse DOM letter codes (`"KeyZ"`) to the bare upper-case letter (`"Z"`).
/// Every other code passes through unchanged.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    match code.strip_prefix("Key") {
        Some(rest) if rest.len() == 1 && rest.chars().all(|c| c.is_ascii_alphabetic()) => rest.to_ascii_uppercase(),
        _ => code.to_string(),
    }
}
