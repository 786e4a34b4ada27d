//! Replay driver: feeds recorded raw events through an interaction controller.
//!
//! A trace is newline-delimited JSON, one event per line, tagged by `event`:
//!
//! ```text
//! {"event":"pointer-down","button":3,"target":0,"offsetX":120,"offsetY":64}
//! {"event":"wheel","deltaY":100,"ctrlKey":true}
//! {"event":"select","index":0}
//! {"event":"clear"}
//! {"event":"keydown","code":"KeyZ","ctrlKey":true}
//! {"event":"add","descriptor":{"type":"svg","source":{"type":"url","value":"https://cdn.test/a.svg"}}}
//! ```
//!
//! Object references in a trace are draw-order indices into the canvas at
//! the time the line is applied, since refs are minted at runtime.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::{Canvas, CanvasEvent, CanvasHandle, ObjectDescriptor, ObjectKind, ObjectRef};
use crate::command::Outcome;
use crate::config::{ConfigError, InteractionConfig};
use crate::controller::InteractionController;
use crate::events::KeyHub;
use crate::input::{InputError, KeyInput, PointerDown, RawKeyEvent, RawPointerEvent, RawWheelEvent, WheelInput};
use crate::scene::{SceneCanvas, SceneObject};
use crate::state::InteractionState;

/// Spacing and size of seeded objects.
const SEED_SPACING: f64 = 120.0;
const SEED_SIZE: f64 = 100.0;
const SEED_TOP: f64 = 100.0;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid trace line: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    #[error("no object at index {0}")]
    UnknownObject(usize),
    #[error("canvas busy; selection not changed")]
    CanvasBusy,
}

/// One line of a trace.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TraceEvent {
    #[serde(rename_all = "camelCase")]
    PointerDown {
        button: i64,
        #[serde(default)]
        target: Option<usize>,
        offset_x: f64,
        offset_y: f64,
    },
    Wheel(RawWheelEvent),
    Select {
        index: usize,
    },
    Clear,
    Keydown(RawKeyEvent),
    Add {
        descriptor: ObjectDescriptor,
    },
}

/// Position summary of one object in the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectReport {
    pub id: ObjectRef,
    pub kind: ObjectKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub left: f64,
    pub top: f64,
}

/// What a replay ends with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub state: InteractionState,
    pub canvas_zoom: f64,
    pub objects: Vec<ObjectReport>,
}

/// A controller attached to an in-memory canvas, driven line by line.
pub struct Replay {
    keys: Rc<KeyHub>,
    canvas: CanvasHandle<SceneCanvas>,
    controller: InteractionController<SceneCanvas>,
}

impl Replay {
    /// Build a replay over a canvas seeded with `seed` rectangles in a row.
    #[must_use]
    pub fn new(config: InteractionConfig, seed: usize) -> Self {
        let mut scene = SceneCanvas::new();
        let mut left = 0.0;
        for n in 0..seed {
            scene.insert(SceneObject::new(ObjectKind::Rect, left, SEED_TOP, SEED_SIZE, SEED_SIZE).named(format!("object-{n}")));
            left += SEED_SPACING;
        }
        let keys = Rc::new(KeyHub::new());
        let canvas = CanvasHandle::new(scene);
        let controller = InteractionController::new(Rc::clone(&keys), config);
        controller.attach(Some(canvas.clone()));
        debug!(seed, "replay ready");
        Self { keys, canvas, controller }
    }

    /// Parse and apply one trace line. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not a valid event or names an unknown object.
    pub fn apply_line(&self, line: &str) -> Result<(), ReplayError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let event: TraceEvent = serde_json::from_str(trimmed)?;
        self.apply(event)
    }

    /// Apply one parsed event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event fails validation or names an unknown object.
    pub fn apply(&self, event: TraceEvent) -> Result<(), ReplayError> {
        match event {
            TraceEvent::PointerDown { button, target, offset_x, offset_y } => {
                let target = match target {
                    Some(index) => Some(self.object_at(index)?),
                    None => None,
                };
                let down = PointerDown::try_from(RawPointerEvent { button, target, offset_x, offset_y })?;
                self.canvas.emit(&CanvasEvent::PointerDown(down));
            }
            TraceEvent::Wheel(raw) => {
                self.canvas.emit(&CanvasEvent::Wheel(WheelInput::try_from(raw)?));
            }
            TraceEvent::Select { index } => {
                let id = self.object_at(index)?;
                let had_selection = self.canvas.with(SceneCanvas::active_object).flatten().is_some();
                self.set_engine_selection(Some(id), index)?;
                let event = if had_selection { CanvasEvent::SelectionUpdated } else { CanvasEvent::SelectionCreated };
                self.canvas.emit(&event);
            }
            TraceEvent::Clear => {
                self.set_engine_selection(None, 0)?;
                self.canvas.emit(&CanvasEvent::SelectionCleared);
            }
            TraceEvent::Keydown(raw) => {
                self.keys.emit(&KeyInput::try_from(raw)?);
            }
            TraceEvent::Add { descriptor } => {
                let outcome = self.controller.issue_add_object(descriptor);
                if let Outcome::Skipped(reason) = outcome {
                    debug!(?reason, "add skipped");
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn controller(&self) -> &InteractionController<SceneCanvas> {
        &self.controller
    }

    /// Final controller state plus every object's position.
    #[must_use]
    pub fn report(&self) -> Report {
        let (canvas_zoom, objects) = self
            .canvas
            .with(|c| {
                let objects = c
                    .objects()
                    .into_iter()
                    .map(|(id, obj)| ObjectReport { id, kind: obj.kind, name: obj.name.clone(), left: obj.left, top: obj.top })
                    .collect();
                (c.zoom(), objects)
            })
            .unwrap_or_default();
        Report { state: self.controller.state(), canvas_zoom, objects }
    }

    /// Change the engine-side selection before announcing it.
    fn set_engine_selection(&self, id: Option<ObjectRef>, index: usize) -> Result<(), ReplayError> {
        match self.canvas.with_mut(|c| c.set_active(id)) {
            Some(true) => Ok(()),
            Some(false) => Err(ReplayError::UnknownObject(index)),
            None => Err(ReplayError::CanvasBusy),
        }
    }

    fn object_at(&self, index: usize) -> Result<ObjectRef, ReplayError> {
        self.canvas
            .with(|c| c.objects().get(index).map(|(id, _)| *id))
            .flatten()
            .ok_or(ReplayError::UnknownObject(index))
    }
}
