//! The live tooltip held by a service.

use uuid::Uuid;

use crate::controller::VisibilityController;
use crate::host::TooltipId;
use crate::models::{AnchorRect, Placement, TooltipSize, TooltipState};
use crate::placement::Position;

/// The one tooltip a service currently owns.
#[derive(Debug)]
pub struct ActiveTooltip {
    pub(crate) id: TooltipId,
    pub(crate) aria_id: String,
    pub(crate) content: String,
    pub(crate) requested: Placement,
    pub(crate) anchor: AnchorRect,
    pub(crate) side: Placement,
    pub(crate) size: Option<TooltipSize>,
    pub(crate) position: Option<Position>,
    pub(crate) controller: VisibilityController,
}

impl ActiveTooltip {
    pub(crate) fn new(id: TooltipId, content: String, requested: Placement, anchor: AnchorRect) -> Self {
        Self {
            id,
            aria_id: new_aria_id(),
            content,
            requested,
            anchor,
            side: requested,
            size: None,
            position: None,
            controller: VisibilityController::new(),
        }
    }

    /// Element identifier.
    pub fn id(&self) -> TooltipId {
        self.id
    }

    /// DOM id referenced by the anchor's `aria-describedby`.
    pub fn aria_id(&self) -> &str {
        &self.aria_id
    }

    /// Rendered content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Side asked for by the caller.
    pub fn requested(&self) -> Placement {
        self.requested
    }

    /// Side currently rendered (after any flip).
    pub fn side(&self) -> Placement {
        self.side
    }

    /// Anchor snapshot taken at show time.
    pub fn anchor(&self) -> AnchorRect {
        self.anchor
    }

    /// Lifecycle state.
    pub fn state(&self) -> TooltipState {
        self.controller.state()
    }

    /// Last written position, once placed.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Size measured at first placement.
    pub fn size(&self) -> Option<TooltipSize> {
        self.size
    }

    /// Whether a new request for the same content, side and anchor may
    /// revive this tooltip instead of replacing it.
    pub(crate) fn can_resume(&self, content: &str, requested: Placement, anchor: AnchorRect) -> bool {
        self.state() == TooltipState::Leaving
            && self.content == content
            && self.requested == requested
            && self.anchor == anchor
    }
}

/// Random `__xxxxxxxxxx__` token used as the tooltip's DOM id.
fn new_aria_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("__{}__", &hex[..10])
}
