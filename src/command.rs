//! Commands and their executors.
//!
//! A [`Command`] is a single, named intent produced from classified input.
//! [`execute`] checks the command's preconditions and applies it to the
//! canvas and/or the interaction state. Unmet preconditions are not errors:
//! the command is skipped and the reason reported in the [`Outcome`].

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use tracing::trace;

use crate::canvas::{Canvas, CanvasHandle, CanvasObject, ObjectDescriptor, ObjectRef};
use crate::config::InteractionConfig;
use crate::input::Point;
use crate::state::InteractionState;
use crate::zoom::{ZoomDirection, step_zoom};

/// A discrete mutation of the canvas or interaction state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Nudge the active object by `(dx, dy)` canvas units.
    MoveBy { dx: f64, dy: f64 },
    /// Step the zoom ratio one notch.
    Zoom(ZoomDirection),
    /// Replace the active object (`None` clears it).
    Select(Option<ObjectRef>),
    Undo,
    Redo,
    /// Show the context menu at a viewport position.
    OpenContextMenu { left: f64, top: f64 },
    CloseContextMenu,
    /// Add an externally sourced object to the canvas.
    AddObject(ObjectDescriptor),
}

impl Command {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveBy { .. } => "move_by",
            Self::Zoom(_) => "zoom",
            Self::Select(_) => "select",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::OpenContextMenu { .. } => "open_context_menu",
            Self::CloseContextMenu => "close_context_menu",
            Self::AddObject(_) => "add_object",
        }
    }
}

/// Why a command was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No canvas is attached.
    NoCanvas,
    /// The command needs an active object and there is none.
    NoActiveObject,
    /// The active object no longer exists on the canvas.
    StaleObject,
    /// The canvas was already borrowed by the host.
    CanvasBusy,
}

/// Result of executing a command.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

impl Outcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Run `cmd` against `canvas` and `state`.
#[must_use]
pub fn execute<C: Canvas>(
    cmd: Command,
    canvas: Option<&CanvasHandle<C>>,
    state: &mut InteractionState,
    config: &InteractionConfig,
) -> Outcome {
    let name = cmd.name();
    let outcome = match cmd {
        Command::MoveBy { dx, dy } => move_by(canvas, state, dx, dy),
        Command::Zoom(dir) => zoom(canvas, state, dir, config.zoom_step),
        Command::Select(target) => select(canvas, state, target),
        Command::Undo => history(canvas, C::undo),
        Command::Redo => history(canvas, C::redo),
        Command::OpenContextMenu { left, top } => {
            state.open_context_menu(Point::new(left, top));
            Outcome::Applied
        }
        Command::CloseContextMenu => {
            state.close_context_menu();
            Outcome::Applied
        }
        Command::AddObject(descriptor) => add_object(canvas, descriptor),
    };
    if let Outcome::Skipped(reason) = outcome {
        trace!(command = name, ?reason, "command skipped");
    }
    outcome
}

fn move_by<C: Canvas>(canvas: Option<&CanvasHandle<C>>, state: &InteractionState, dx: f64, dy: f64) -> Outcome {
    let Some(canvas) = canvas else {
        return Outcome::Skipped(SkipReason::NoCanvas);
    };
    let Some(active) = state.active_object() else {
        return Outcome::Skipped(SkipReason::NoActiveObject);
    };
    canvas
        .with_mut(|c| {
            let Some(obj) = c.object_mut(active) else {
                return Outcome::Skipped(SkipReason::StaleObject);
            };
            if dx != 0.0 {
                let left = obj.left();
                obj.set_left(left + dx);
            }
            if dy != 0.0 {
                let top = obj.top();
                obj.set_top(top + dy);
            }
            obj.recompute_coords();
            c.request_render();
            Outcome::Applied
        })
        .unwrap_or(Outcome::Skipped(SkipReason::CanvasBusy))
}

fn zoom<C: Canvas>(
    canvas: Option<&CanvasHandle<C>>,
    state: &mut InteractionState,
    dir: ZoomDirection,
    step: f64,
) -> Outcome {
    let Some(canvas) = canvas else {
        return Outcome::Skipped(SkipReason::NoCanvas);
    };
    canvas
        .with_mut(|c| {
            let ratio = state.set_zoom_ratio(step_zoom(c.zoom(), dir, step));
            c.set_zoom(ratio);
            Outcome::Applied
        })
        .unwrap_or(Outcome::Skipped(SkipReason::CanvasBusy))
}

fn select<C: Canvas>(
    canvas: Option<&CanvasHandle<C>>,
    state: &mut InteractionState,
    target: Option<ObjectRef>,
) -> Outcome {
    if canvas.is_none() {
        return Outcome::Skipped(SkipReason::NoCanvas);
    }
    state.set_active_object(target);
    Outcome::Applied
}

fn history<C: Canvas>(canvas: Option<&CanvasHandle<C>>, step: fn(&mut C)) -> Outcome {
    let Some(canvas) = canvas else {
        return Outcome::Skipped(SkipReason::NoCanvas);
    };
    canvas
        .with_mut(|c| {
            step(c);
            Outcome::Applied
        })
        .unwrap_or(Outcome::Skipped(SkipReason::CanvasBusy))
}

fn add_object<C: Canvas>(canvas: Option<&CanvasHandle<C>>, descriptor: ObjectDescriptor) -> Outcome {
    let Some(canvas) = canvas else {
        return Outcome::Skipped(SkipReason::NoCanvas);
    };
    canvas
        .with_mut(|c| {
            c.add_object(descriptor);
            c.request_render();
            Outcome::Applied
        })
        .unwrap_or(Outcome::Skipped(SkipReason::CanvasBusy))
}
