//! Layers panel: one preview entry per canvas object, in draw order.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use serde::Serialize;
use tracing::debug;

use crate::canvas::{Canvas, CanvasHandle, CanvasObject, ObjectKind, ObjectRef};

/// A row in the layers panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub id: ObjectRef,
    pub kind: ObjectKind,
    pub name: Option<String>,
    /// Data URL of the object rendered without its clip region.
    pub preview: String,
}

#[derive(Debug, Default)]
pub struct LayersPanel {
    layers: Vec<Layer>,
}

impl LayersPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the list from `canvas`. Returns `false` and keeps the current
    /// list if there is no canvas or it is busy.
    pub fn refresh<C: Canvas>(&mut self, canvas: Option<&CanvasHandle<C>>) -> bool {
        let Some(canvas) = canvas else {
            return false;
        };
        let Some(layers) = canvas.with(collect_layers) else {
            debug!("layers refresh skipped: canvas busy");
            return false;
        };
        self.layers = layers;
        true
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

fn collect_layers<C: Canvas>(canvas: &C) -> Vec<Layer> {
    canvas
        .objects()
        .into_iter()
        .map(|(id, obj)| {
            let mut copy = obj.clone();
            copy.clear_clip();
            Layer { id, kind: obj.kind(), name: obj.name().map(str::to_string), preview: copy.preview() }
        })
        .collect()
}
