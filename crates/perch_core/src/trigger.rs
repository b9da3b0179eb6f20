//! Element triggers.
//!
//! A trigger binds an anchor element to a tooltip's content and placement
//! and turns raw element events into show/hide intents. Desktop triggers
//! react to hover and keyboard focus; touch triggers ignore hover and use a
//! long press instead. Timers and the tooltip itself are driven by
//! [`crate::service::TooltipService`].

use std::fmt;

use crate::long_press::LongPressDetector;
use crate::models::Placement;

/// Identifier of an attached trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(pub(crate) u64);

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

/// Element events a trigger listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Pointer entered the element
    MouseOver,
    /// Pointer left the element
    MouseOut,
    /// Key released on the element
    KeyUp {
        /// `KeyboardEvent.key` value
        key: String,
        /// Whether the element is the document's active element
        focused: bool,
    },
    /// Element lost focus
    Blur,
    /// Pointer pressed on the element
    PointerDown,
    /// Pointer released
    PointerUp,
    /// Pointer interaction aborted by the platform
    PointerCancel,
}

impl TriggerEvent {
    /// Key-up event for `key`.
    pub fn key_up(key: impl Into<String>, focused: bool) -> Self {
        Self::KeyUp { key: key.into(), focused }
    }
}

/// Input style a trigger was set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Hover and keyboard focus
    Hover,
    /// Long press
    LongPress,
}

/// What an event asks of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerIntent {
    /// Show after the show delay
    Show,
    /// Hide now and drop any pending show
    Hide,
    /// Start timing a press
    Press,
    /// Stop timing a press
    Release,
    /// Nothing
    Ignore,
}

/// One attached element.
#[derive(Debug)]
pub struct TooltipTrigger<A> {
    pub(crate) anchor: A,
    pub(crate) content: String,
    pub(crate) placement: Placement,
    pub(crate) mode: TriggerMode,
    pub(crate) long_press: LongPressDetector,
}

impl<A> TooltipTrigger<A> {
    pub(crate) fn new(
        anchor: A,
        content: String,
        placement: Placement,
        mode: TriggerMode,
        long_press: LongPressDetector,
    ) -> Self {
        Self { anchor, content, placement, mode, long_press }
    }

    /// The element this trigger is attached to.
    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    /// Tooltip content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Requested placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Input style.
    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// Long presses detected on this element.
    pub fn long_presses(&self) -> u32 {
        self.long_press.emitted()
    }

    /// Map an element event to an intent.
    pub fn intent(&self, event: &TriggerEvent) -> TriggerIntent {
        match (event, self.mode) {
            (TriggerEvent::MouseOver, TriggerMode::Hover) => TriggerIntent::Show,
            (TriggerEvent::MouseOver, TriggerMode::LongPress) => TriggerIntent::Ignore,
            (TriggerEvent::KeyUp { key, focused }, _) => {
                if *focused && key == "Tab" {
                    TriggerIntent::Show
                } else {
                    TriggerIntent::Ignore
                }
            }
            (TriggerEvent::MouseOut | TriggerEvent::Blur, _) => TriggerIntent::Hide,
            (TriggerEvent::PointerDown, TriggerMode::LongPress) => TriggerIntent::Press,
            (TriggerEvent::PointerUp | TriggerEvent::PointerCancel, TriggerMode::LongPress) => {
                TriggerIntent::Release
            }
            (TriggerEvent::PointerDown | TriggerEvent::PointerUp | TriggerEvent::PointerCancel, _) => {
                TriggerIntent::Ignore
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn trigger(mode: TriggerMode) -> TooltipTrigger<()> {
        TooltipTrigger::new(
            (),
            "Save".to_string(),
            Placement::Top,
            mode,
            LongPressDetector::new(Duration::from_millis(500)),
        )
    }

    #[test]
    fn test_hover_mode_intents() {
        let t = trigger(TriggerMode::Hover);
        assert_eq!(t.intent(&TriggerEvent::MouseOver), TriggerIntent::Show);
        assert_eq!(t.intent(&TriggerEvent::MouseOut), TriggerIntent::Hide);
        assert_eq!(t.intent(&TriggerEvent::Blur), TriggerIntent::Hide);
        assert_eq!(t.intent(&TriggerEvent::PointerDown), TriggerIntent::Ignore);
        assert_eq!(t.intent(&TriggerEvent::PointerUp), TriggerIntent::Ignore);
    }

    #[test]
    fn test_long_press_mode_ignores_hover() {
        let t = trigger(TriggerMode::LongPress);
        assert_eq!(t.intent(&TriggerEvent::MouseOver), TriggerIntent::Ignore);
        assert_eq!(t.intent(&TriggerEvent::PointerDown), TriggerIntent::Press);
        assert_eq!(t.intent(&TriggerEvent::PointerUp), TriggerIntent::Release);
        assert_eq!(t.intent(&TriggerEvent::PointerCancel), TriggerIntent::Release);
    }

    #[test]
    fn test_only_tab_on_focused_element_shows() {
        let t = trigger(TriggerMode::Hover);
        assert_eq!(t.intent(&TriggerEvent::key_up("Tab", true)), TriggerIntent::Show);
        assert_eq!(t.intent(&TriggerEvent::key_up("Tab", false)), TriggerIntent::Ignore);
        assert_eq!(t.intent(&TriggerEvent::key_up("Enter", true)), TriggerIntent::Ignore);

        let touch = trigger(TriggerMode::LongPress);
        assert_eq!(touch.intent(&TriggerEvent::key_up("Tab", true)), TriggerIntent::Show);
    }

    #[test]
    fn test_accessors() {
        let t = trigger(TriggerMode::Hover);
        assert_eq!(t.content(), "Save");
        assert_eq!(t.placement(), Placement::Top);
        assert_eq!(t.mode(), TriggerMode::Hover);
        assert_eq!(t.long_presses(), 0);
    }
}
