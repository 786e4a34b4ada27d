//! Interaction core for the easel canvas editor.
//!
//! The crate sits between a graphics engine (the canvas collaborator) and the
//! editor UI. It listens to raw pointer, wheel, and keyboard events, turns them
//! into discrete [`command::Command`]s, and keeps a small [`state::InteractionState`]
//! (active selection, zoom ratio, context menu) valid across all of them. The
//! host is responsible only for forwarding DOM-style events into the event
//! hubs and for rendering.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Subscription lifecycle and event-to-command translation |
//! | [`command`] | Command type and per-command executors |
//! | [`state`] | Controller-owned interaction state |
//! | [`keyboard`] | Pure key-event classifier (undo, redo, arrows) |
//! | [`input`] | Typed input descriptors and boundary validation |
//! | [`events`] | Single-threaded listener registry with owned subscription handles |
//! | [`canvas`] | Canvas collaborator contract and shared handle |
//! | [`scene`] | In-memory reference collaborator with snapshot history |
//! | [`zoom`] | Zoom stepping and clamping policy |
//! | [`panels`] | Layers and Objects panel adapters |
//! | [`catalog`] | Remote object catalog client |
//! | [`replay`] | NDJSON trace driver behind the `easel` binary |
//! | [`config`] | Environment-driven configuration |
//! | [`consts`] | Fixed policy constants (zoom bounds, steps, debounce) |

pub mod canvas;
pub mod catalog;
pub mod command;
pub mod config;
pub mod consts;
pub mod controller;
pub mod events;
pub mod input;
pub mod keyboard;
pub mod panels;
pub mod replay;
pub mod scene;
pub mod state;
pub mod zoom;
