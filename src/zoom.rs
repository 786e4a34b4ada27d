//! Zoom policy: fixed-step stepping clamped to a fixed range.

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// Which way a zoom step goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Direction implied by a wheel delta: scrolling up (negative) zooms in,
    /// scrolling down zooms out. A zero delta counts as zooming in.
    #[must_use]
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 { Self::Out } else { Self::In }
    }

    fn sign(self) -> f64 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// Clamp a ratio into `[MIN_ZOOM, MAX_ZOOM]`. NaN maps to `MIN_ZOOM`.
#[must_use]
pub fn clamp_zoom(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return MIN_ZOOM;
    }
    ratio.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Apply one step in `dir` to `current`, then clamp.
#[must_use]
pub fn step_zoom(current: f64, dir: ZoomDirection, step: f64) -> f64 {
    clamp_zoom(current + dir.sign() * step)
}
