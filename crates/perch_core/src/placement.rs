//! Placement engine.
//!
//! Computes where a tooltip goes given the anchor, the tooltip's measured
//! size, the viewport and the requested side. Two corrections keep it on
//! screen:
//!
//! 1. **Flip**: if the requested side overflows its viewport edge, the
//!    tooltip moves to the opposite side. There is exactly one flip; the
//!    flipped side is not re-checked.
//! 2. **Shift**: after the flip, the tooltip is translated along the cross
//!    axis when it overflows the far edge by more than the threshold, or the
//!    near edge at all. The arrow moves the other way so it keeps pointing
//!    at the anchor.

use crate::models::{AnchorRect, Axis, Placement, TooltipSize, ViewportSize};

/// Distance between anchor and tooltip.
pub const GAP: f64 = 10.0;

/// Extra travel applied when flipping across the anchor.
pub const FLIP_GAP: f64 = 2.0 * GAP;

/// Far-edge overflow below this is left alone (subpixel rounding).
pub const SHIFT_THRESHOLD: f64 = 5.0;

/// Breathing room kept from the viewport edge after a shift.
pub const EDGE_MARGIN: f64 = 5.0;

/// Translation applied along the cross axis to pull a tooltip into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shift {
    /// Axis of the translation
    pub axis: Axis,
    /// Signed distance; negative moves toward the left/top edge
    pub amount: f64,
}

impl Shift {
    /// CSS transform for the tooltip element.
    pub fn transform_css(&self) -> String {
        let function = match self.axis {
            Axis::X => "translateX",
            Axis::Y => "translateY",
        };
        format!("{function}({}px)", self.amount)
    }

    /// CSS offset for the arrow element, along the same axis.
    pub fn arrow_css(&self) -> String {
        if self.amount < 0.0 {
            format!("calc(50% + {}px)", -self.amount)
        } else {
            format!("calc(50% - {}px)", self.amount)
        }
    }

    /// Style property the arrow offset is written to.
    pub fn arrow_property(&self) -> &'static str {
        match self.axis {
            Axis::X => "left",
            Axis::Y => "top",
        }
    }
}

/// Arrow style writes for `shift`: each of `left` and `top` paired with
/// its value, or `None` when the property must be cleared.
pub fn arrow_style(shift: Option<Shift>) -> [(&'static str, Option<String>); 2] {
    let value = |property: &str| {
        shift.filter(|s| s.arrow_property() == property).map(|s| s.arrow_css())
    };
    [("left", value("left")), ("top", value("top"))]
}

/// Resolved tooltip position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Left offset in viewport pixels
    pub left: f64,
    /// Top offset in viewport pixels
    pub top: f64,
    /// Side after overflow correction
    pub side: Placement,
    /// Cross-axis shift, if one was needed
    pub shift: Option<Shift>,
}

impl Position {
    /// Whether the requested side had to be flipped.
    pub fn flipped_from(&self, requested: Placement) -> bool {
        self.side != requested
    }
}

/// Compute the position of a tooltip of `size` next to `anchor`.
pub fn compute_position(
    anchor: AnchorRect,
    size: TooltipSize,
    viewport: ViewportSize,
    side: Placement,
) -> Position {
    if anchor.is_degenerate() {
        tracing::warn!(?anchor, "Placing tooltip against a degenerate anchor");
    }

    let (left, top, resolved) = match side {
        Placement::Top => {
            let left = centered(anchor.left, anchor.width, size.width);
            let top = anchor.top - size.height - GAP;
            if top < 0.0 {
                (left, top + anchor.height + size.height + FLIP_GAP, Placement::Bottom)
            } else {
                (left, top, Placement::Top)
            }
        }
        Placement::Bottom => {
            let left = centered(anchor.left, anchor.width, size.width);
            let top = anchor.top + anchor.height + GAP;
            if top + size.height + GAP > viewport.height {
                (left, top - anchor.height - size.height - FLIP_GAP, Placement::Top)
            } else {
                (left, top, Placement::Bottom)
            }
        }
        Placement::Right => {
            let top = centered(anchor.top, anchor.height, size.height);
            let left = anchor.left + anchor.width + GAP;
            if left + size.width > viewport.width {
                (left - anchor.width - size.width - FLIP_GAP, top, Placement::Left)
            } else {
                (left, top, Placement::Right)
            }
        }
        Placement::Left => {
            let top = centered(anchor.top, anchor.height, size.height);
            let left = anchor.left - size.width - GAP;
            if left < 0.0 {
                (left + anchor.width + size.width + FLIP_GAP, top, Placement::Right)
            } else {
                (left, top, Placement::Left)
            }
        }
    };

    // Shift is resolved against the flipped position
    let shift = match resolved.primary_axis() {
        Axis::Y => shift_into_view(Axis::X, left, size.width, viewport.width),
        Axis::X => shift_into_view(Axis::Y, top, size.height, viewport.height),
    };
    let position = Position { left, top, side: resolved, shift };

    if position.flipped_from(side) {
        tracing::debug!(requested = %side, resolved = %position.side, "Tooltip flipped");
    }
    if let Some(shift) = position.shift {
        tracing::debug!(axis = ?shift.axis, amount = shift.amount, "Tooltip shifted into view");
    }

    position
}

/// Start coordinate that centers `extent` over an anchor span.
fn centered(anchor_start: f64, anchor_extent: f64, extent: f64) -> f64 {
    anchor_start + (anchor_extent - extent) / 2.0
}

/// Cross-axis correction for a tooltip starting at `start`.
///
/// The far-edge check wins when both edges overflow.
fn shift_into_view(axis: Axis, start: f64, extent: f64, viewport_extent: f64) -> Option<Shift> {
    let overflow = start + extent - viewport_extent + EDGE_MARGIN;
    if overflow > SHIFT_THRESHOLD {
        return Some(Shift { axis, amount: -overflow });
    }
    if start < 0.0 {
        return Some(Shift { axis, amount: start.abs() + EDGE_MARGIN });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportSize = ViewportSize { width: 1000.0, height: 800.0 };
    const SIZE: TooltipSize = TooltipSize { width: 100.0, height: 40.0 };

    fn anchor(left: f64, top: f64) -> AnchorRect {
        AnchorRect::new(left, top, 50.0, 20.0)
    }

    #[test]
    fn test_bottom_without_overflow() {
        let pos = compute_position(anchor(400.0, 300.0), SIZE, VIEWPORT, Placement::Bottom);
        assert_eq!(pos.side, Placement::Bottom);
        assert_eq!(pos.left, 375.0);
        assert_eq!(pos.top, 330.0);
        assert_eq!(pos.shift, None);
    }

    #[test]
    fn test_top_without_overflow() {
        let pos = compute_position(anchor(400.0, 300.0), SIZE, VIEWPORT, Placement::Top);
        assert_eq!(pos.side, Placement::Top);
        assert_eq!(pos.left, 375.0);
        assert_eq!(pos.top, 250.0);
    }

    #[test]
    fn test_right_and_left_center_vertically() {
        let right = compute_position(anchor(400.0, 300.0), SIZE, VIEWPORT, Placement::Right);
        assert_eq!(right.side, Placement::Right);
        assert_eq!(right.left, 460.0);
        assert_eq!(right.top, 290.0);

        let left = compute_position(anchor(400.0, 300.0), SIZE, VIEWPORT, Placement::Left);
        assert_eq!(left.side, Placement::Left);
        assert_eq!(left.left, 290.0);
        assert_eq!(left.top, 290.0);
    }

    #[test]
    fn test_top_flips_to_bottom_at_top_edge() {
        let pos = compute_position(anchor(400.0, 0.0), SIZE, VIEWPORT, Placement::Top);
        assert_eq!(pos.side, Placement::Bottom);
        // -50 + 20 + 40 + 20
        assert_eq!(pos.top, 30.0);
        assert!(pos.flipped_from(Placement::Top));
    }

    #[test]
    fn test_bottom_flips_to_top_at_bottom_edge() {
        let pos = compute_position(anchor(400.0, 780.0), SIZE, VIEWPORT, Placement::Bottom);
        assert_eq!(pos.side, Placement::Top);
        // 810 - 20 - 40 - 20
        assert_eq!(pos.top, 730.0);
    }

    #[test]
    fn test_left_flips_to_right_at_left_edge() {
        let pos = compute_position(anchor(0.0, 300.0), SIZE, VIEWPORT, Placement::Left);
        assert_eq!(pos.side, Placement::Right);
        // -110 + 50 + 100 + 20
        assert_eq!(pos.left, 60.0);
    }

    #[test]
    fn test_right_flips_to_left_at_right_edge() {
        let pos = compute_position(anchor(950.0, 300.0), SIZE, VIEWPORT, Placement::Right);
        assert_eq!(pos.side, Placement::Left);
        assert_eq!(pos.left, 840.0);
    }

    #[test]
    fn test_shift_left_when_overflowing_right_edge() {
        let pos = compute_position(anchor(940.0, 300.0), SIZE, VIEWPORT, Placement::Bottom);
        // left = 915, overflow = 915 + 100 - 1000 + 5 = 20
        let shift = pos.shift.unwrap();
        assert_eq!(shift.axis, Axis::X);
        assert_eq!(shift.amount, -20.0);
        assert_eq!(shift.transform_css(), "translateX(-20px)");
        assert_eq!(shift.arrow_css(), "calc(50% + 20px)");
        assert_eq!(shift.arrow_property(), "left");
        // left is written unshifted; the transform carries the correction
        assert_eq!(pos.left, 915.0);
    }

    #[test]
    fn test_small_right_overflow_is_ignored() {
        // left = 902, overflow = 902 + 100 - 1000 + 5 = 7 > 5 shifts,
        // left = 898 gives 3 which does not
        let shifted = compute_position(
            AnchorRect::new(927.0, 300.0, 50.0, 20.0),
            SIZE,
            VIEWPORT,
            Placement::Top,
        );
        assert!(shifted.shift.is_some());

        let untouched = compute_position(
            AnchorRect::new(923.0, 300.0, 50.0, 20.0),
            SIZE,
            VIEWPORT,
            Placement::Top,
        );
        assert_eq!(untouched.shift, None);
    }

    #[test]
    fn test_shift_right_when_overflowing_left_edge() {
        let pos = compute_position(anchor(0.0, 300.0), SIZE, VIEWPORT, Placement::Bottom);
        // left = -25
        let shift = pos.shift.unwrap();
        assert_eq!(shift.amount, 30.0);
        assert_eq!(shift.transform_css(), "translateX(30px)");
        assert_eq!(shift.arrow_css(), "calc(50% - 30px)");
    }

    #[test]
    fn test_vertical_shift_for_side_placements() {
        let pos = compute_position(anchor(400.0, 790.0), SIZE, VIEWPORT, Placement::Right);
        // top = 780, overflow = 780 + 40 - 800 + 5 = 25
        let shift = pos.shift.unwrap();
        assert_eq!(shift.axis, Axis::Y);
        assert_eq!(shift.amount, -25.0);
        assert_eq!(shift.transform_css(), "translateY(-25px)");
        assert_eq!(shift.arrow_property(), "top");

        let pos = compute_position(anchor(400.0, 0.0), SIZE, VIEWPORT, Placement::Left);
        // top = -10
        assert_eq!(pos.shift.unwrap().amount, 15.0);
    }

    #[test]
    fn test_flip_then_shift_in_corner() {
        // top-right corner: flips to bottom, then shifts left
        let pos = compute_position(anchor(970.0, 0.0), SIZE, VIEWPORT, Placement::Top);
        assert_eq!(pos.side, Placement::Bottom);
        assert_eq!(pos.shift.unwrap().axis, Axis::X);
        assert!(pos.shift.unwrap().amount < 0.0);
    }

    #[test]
    fn test_doubly_constrained_flips_once() {
        let tiny = ViewportSize::new(1000.0, 60.0);
        let pos = compute_position(anchor(400.0, 20.0), SIZE, tiny, Placement::Top);
        // top overflows, bottom would overflow too; keep the single flip
        assert_eq!(pos.side, Placement::Bottom);
    }

    #[test]
    fn test_point_anchor() {
        let pos = compute_position(AnchorRect::at_point(500.0, 400.0), SIZE, VIEWPORT, Placement::Bottom);
        assert_eq!(pos.left, 450.0);
        assert_eq!(pos.top, 410.0);
        assert_eq!(pos.side, Placement::Bottom);
    }

    #[test]
    fn test_zero_size_tooltip_degrades_quietly() {
        let pos = compute_position(anchor(400.0, 300.0), TooltipSize::default(), VIEWPORT, Placement::Top);
        assert_eq!(pos.left, 425.0);
        assert_eq!(pos.top, 290.0);
    }

    #[test]
    fn test_arrow_style_clears_stale_offsets() {
        let horizontal = Shift { axis: Axis::X, amount: -20.0 };
        assert_eq!(
            arrow_style(Some(horizontal)),
            [("left", Some("calc(50% + 20px)".to_string())), ("top", None)]
        );

        let vertical = Shift { axis: Axis::Y, amount: 30.0 };
        assert_eq!(
            arrow_style(Some(vertical)),
            [("left", None), ("top", Some("calc(50% - 30px)".to_string()))]
        );

        assert_eq!(arrow_style(None), [("left", None), ("top", None)]);
    }
}
