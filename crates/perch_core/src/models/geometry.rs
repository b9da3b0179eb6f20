//! Viewport-space geometry snapshots.
//!
//! All values are CSS pixels in viewport coordinates, as reported by the
//! host's layout engine. Fractional values are kept as-is.

use serde::{Deserialize, Serialize};

/// Position and size of the thing a tooltip points at.
///
/// Snapshot taken when the tooltip is shown; later layout changes of the
/// anchor do not move an already placed tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorRect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl AnchorRect {
    /// Create an anchor rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Degenerate zero-size anchor at a raw point.
    pub fn at_point(x: f64, y: f64) -> Self {
        Self { left: x, top: y, width: 0.0, height: 0.0 }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether any coordinate is NaN or infinite.
    pub fn is_degenerate(&self) -> bool {
        ![self.left, self.top, self.width, self.height].iter().all(|v| v.is_finite())
    }
}

/// Measured size of a rendered tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipSize {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl TooltipSize {
    /// Create a tooltip size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether nothing was laid out yet.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Live size of the window's layout viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl ViewportSize {
    /// Create a viewport size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
