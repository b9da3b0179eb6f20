//! Measurement and mutation collaborators.
//!
//! The service never touches a document directly. A host (the browser
//! binding, or a recording fake in tests) implements [`Measure`] to report
//! layout and [`Surface`] to create, style and remove tooltip elements.

use std::fmt;

use crate::models::{AnchorRect, ClassSet, TooltipSize, ViewportSize};
use crate::placement::Shift;

/// Identifier of one mounted tooltip element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TooltipId(pub(crate) u64);

impl TooltipId {
    /// Raw value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "perch-tooltip-{}", self.0)
    }
}

/// Layout queries.
pub trait Measure {
    /// Element type tooltips are attached to.
    type Anchor;

    /// Bounding rectangle of `anchor` in viewport coordinates.
    fn anchor_rect(&self, anchor: &Self::Anchor) -> AnchorRect;

    /// Rendered size of a mounted tooltip.
    fn tooltip_size(&self, id: TooltipId) -> TooltipSize;

    /// Current viewport size. Read live, never cached.
    fn viewport(&self) -> ViewportSize;
}

/// Element mutation.
pub trait Surface: Measure {
    /// Create the tooltip element holding `content` and attach it to the
    /// document root. `aria_id` becomes the element's DOM id.
    fn mount(&mut self, id: TooltipId, aria_id: &str, content: &str);

    /// Detach and drop the tooltip element.
    fn unmount(&mut self, id: TooltipId);

    /// Rewrite the managed state classes.
    fn set_classes(&mut self, id: TooltipId, classes: ClassSet);

    /// Write the left/top offset.
    fn set_offset(&mut self, id: TooltipId, left: f64, top: f64);

    /// Apply or clear the cross-axis translation and the matching arrow
    /// offset.
    fn set_shift(&mut self, id: TooltipId, shift: Option<Shift>);

    /// Link `anchor` to the tooltip for assistive technology
    /// (`aria-describedby`).
    fn describe(&mut self, anchor: &Self::Anchor, aria_id: &str);
}
