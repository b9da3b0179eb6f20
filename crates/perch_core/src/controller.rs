//! Visibility controller.
//!
//! State machine for one tooltip:
//!
//! ```text
//! Hidden -> Entering -> Shown -> Leaving -> Hidden
//!              ^                    |
//!              +--------------------+  (show arrives mid-leave)
//! ```
//!
//! Transition methods return whether the transition happened; callers use
//! that to decide which side effects (classes, timers, close listeners) to
//! run. [`VisibilityController::finish`] returns `true` at most once per
//! leave, which is what keeps close callbacks from firing twice.

use crate::models::TooltipState;

/// Lifecycle of a single tooltip.
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    state: TooltipState,
    closes: u32,
}

impl VisibilityController {
    /// Create a hidden controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> TooltipState {
        self.state
    }

    /// How many times a leave ran to completion.
    pub fn closes(&self) -> u32 {
        self.closes
    }

    /// Begin showing. Valid from `Hidden` and `Leaving`; a caller seeing
    /// `true` from `Leaving` must cancel its pending close.
    pub fn enter(&mut self) -> bool {
        match self.state {
            TooltipState::Hidden | TooltipState::Leaving => {
                self.state = TooltipState::Entering;
                true
            }
            TooltipState::Entering | TooltipState::Shown => false,
        }
    }

    /// Position written; `Entering` becomes `Shown`.
    pub fn settle(&mut self) -> bool {
        if self.state == TooltipState::Entering {
            self.state = TooltipState::Shown;
            true
        } else {
            false
        }
    }

    /// Begin hiding. No-op when already hidden or leaving.
    pub fn leave(&mut self) -> bool {
        if self.state.is_active() {
            self.state = TooltipState::Leaving;
            true
        } else {
            false
        }
    }

    /// Leave animation completed. `true` means the close callback is due.
    pub fn finish(&mut self) -> bool {
        if self.state == TooltipState::Leaving {
            self.state = TooltipState::Hidden;
            self.closes += 1;
            true
        } else {
            false
        }
    }
}
