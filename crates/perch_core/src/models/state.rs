//! Tooltip lifecycle state and its CSS class projection.

use super::placement::Placement;

/// Lifecycle state of a single tooltip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TooltipState {
    /// Not on screen (initial and terminal)
    #[default]
    Hidden,
    /// Mounted, enter animation running, position not yet written
    Entering,
    /// Positioned and visible
    Shown,
    /// Leave animation running, close pending
    Leaving,
}

impl TooltipState {
    /// Whether the tooltip is on screen or on its way there.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Entering | Self::Shown)
    }
}

/// CSS classes carried by the tooltip element.
///
/// Pure function of state and resolved side; the element's classes are
/// rewritten from this, never read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSet {
    /// `enter` class present
    pub enter: bool,
    /// `leave` class present
    pub leave: bool,
    /// Side class
    pub side: Placement,
}

impl ClassSet {
    /// Project `state` and `side` onto the element's classes.
    pub fn project(state: TooltipState, side: Placement) -> Self {
        Self {
            enter: state.is_active(),
            leave: state == TooltipState::Leaving,
            side,
        }
    }

    /// Whether `class` is present.
    pub fn contains(&self, class: &str) -> bool {
        self.iter().any(|c| c == class)
    }

    /// Present class names.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> {
        let enter = self.enter.then_some("enter");
        let leave = self.leave.then_some("leave");
        enter.into_iter().chain(leave).chain(std::iter::once(self.side.as_str()))
    }

    /// Every class this projection can toggle.
    pub const MANAGED: [&'static str; 6] = ["enter", "leave", "top", "right", "bottom", "left"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_per_state() {
        let entering = ClassSet::project(TooltipState::Entering, Placement::Top);
        assert_eq!(entering.iter().collect::<Vec<_>>(), vec!["enter", "top"]);

        let shown = ClassSet::project(TooltipState::Shown, Placement::Left);
        assert!(shown.contains("enter"));
        assert!(!shown.contains("leave"));

        let leaving = ClassSet::project(TooltipState::Leaving, Placement::Bottom);
        assert_eq!(leaving.iter().collect::<Vec<_>>(), vec!["leave", "bottom"]);

        let hidden = ClassSet::project(TooltipState::Hidden, Placement::Right);
        assert_eq!(hidden.iter().collect::<Vec<_>>(), vec!["right"]);
    }

    #[test]
    fn test_managed_covers_projection() {
        for state in [
            TooltipState::Hidden,
            TooltipState::Entering,
            TooltipState::Shown,
            TooltipState::Leaving,
        ] {
            for side in Placement::ALL {
                let set = ClassSet::project(state, side);
                assert!(set.iter().all(|c| ClassSet::MANAGED.contains(&c)));
            }
        }
    }
}
