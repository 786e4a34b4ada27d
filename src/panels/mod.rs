//! Panel adapters: thin consumers of the canvas and the catalog.
//!
//! DESIGN
//! ======
//! Panels never mutate the canvas directly. The Layers panel reads object
//! snapshots; the Objects panel produces [`objects::PanelEvent`]s that the
//! host forwards to the controller's `issue_add_object`.

pub mod layers;
pub mod objects;

pub use layers::{Layer, LayersPanel};
pub use objects::{ObjectsPanel, PanelEvent};
