//! Shared policy constants for the interaction core.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom ratio the controller will ever apply.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom ratio the controller will ever apply.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom ratio a fresh controller starts at.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Zoom change applied per ctrl+wheel notch.
pub const DEFAULT_ZOOM_STEP: f64 = 0.05;

// ── Movement ────────────────────────────────────────────────────

/// Distance in canvas units an arrow key moves the active object.
pub const DEFAULT_MOVE_STEP: f64 = 2.0;

// ── Panels ──────────────────────────────────────────────────────

/// Quiet period before the objects panel sends a search, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 1000;

/// Query the objects panel runs when first mounted.
pub const DEFAULT_SEARCH_QUERY: &str = "love";

// ── History ─────────────────────────────────────────────────────

/// Number of undo snapshots the reference scene keeps.
pub const SCENE_HISTORY_LIMIT: usize = 50;
