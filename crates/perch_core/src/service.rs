//! Tooltip service.
//!
//! Owns at most one live tooltip and every element trigger. Callers show
//! tooltips directly ([`TooltipService::show`], [`TooltipService::show_at`])
//! or attach triggers that translate element events into shows and hides.
//!
//! All deferred work goes through the [`Scheduler`] collaborator; the host
//! delivers elapsed tokens back through [`TooltipService::fire`]. Replacing
//! the live tooltip cancels every timer it still had pending, so a stale
//! placement or close can never touch a removed element.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::TooltipConfig;
use crate::device::DeviceProbe;
use crate::error::PerchError;
use crate::host::{Surface, TooltipId};
use crate::long_press::{LongPressDetector, PressStep};
use crate::models::{AnchorRect, ClassSet, Placement, TooltipState};
use crate::placement::compute_position;
use crate::timers::{Deferral, ManualScheduler, Scheduler, TimerTable, TimerToken};
use crate::tooltip::ActiveTooltip;
use crate::trigger::{TooltipTrigger, TriggerEvent, TriggerId, TriggerIntent, TriggerMode};

/// What a pending timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerPurpose {
    /// Measure and position after the first layout pass
    Place(TooltipId),
    /// Leave animation finished
    Close(TooltipId),
    /// Hover/focus show delay elapsed
    ShowDelay(TriggerId),
    /// Long-press tooltip has been up long enough
    AutoHide(TriggerId),
    /// Pointer held for the long-press threshold
    LongPress(TriggerId),
}

impl TimerPurpose {
    fn tooltip(&self) -> Option<TooltipId> {
        match self {
            Self::Place(id) | Self::Close(id) => Some(*id),
            _ => None,
        }
    }

    fn trigger(&self) -> Option<TriggerId> {
        match self {
            Self::ShowDelay(id) | Self::AutoHide(id) | Self::LongPress(id) => Some(*id),
            _ => None,
        }
    }
}

type CloseListener = Box<dyn FnMut(TooltipId)>;

/// Close listeners that may be notified while their owner is not borrowed.
///
/// A listener may register further listeners while it runs; those are
/// first called on the next notification.
#[derive(Default)]
pub struct CloseListeners {
    listeners: RefCell<Vec<CloseListener>>,
}

impl CloseListeners {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn push(&self, listener: impl FnMut(TooltipId) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Run every listener for `id`.
    pub fn notify(&self, id: TooltipId) {
        let mut running = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in &mut running {
            listener(id);
        }
        let mut listeners = self.listeners.borrow_mut();
        let added = std::mem::replace(&mut *listeners, running);
        listeners.extend(added);
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

/// Single-slot tooltip service.
pub struct TooltipService<H: Surface, S: Scheduler> {
    host: H,
    scheduler: S,
    config: TooltipConfig,
    probe: Box<dyn DeviceProbe>,
    timers: TimerTable<TimerPurpose>,
    slot: Option<ActiveTooltip>,
    next_tooltip: u64,
    triggers: HashMap<TriggerId, TooltipTrigger<H::Anchor>>,
    next_trigger: u64,
    close_listeners: CloseListeners,
}

impl<H: Surface, S: Scheduler> TooltipService<H, S> {
    /// Create a service over the given collaborators.
    ///
    /// Fails when `config` does not validate.
    pub fn new(
        host: H,
        scheduler: S,
        config: TooltipConfig,
        probe: impl DeviceProbe + 'static,
    ) -> Result<Self, PerchError> {
        config.validate()?;
        tracing::debug!(placement = %config.placement, "Tooltip service initialized");

        Ok(Self {
            host,
            scheduler,
            config,
            probe: Box::new(probe),
            timers: TimerTable::new(),
            slot: None,
            next_tooltip: 0,
            triggers: HashMap::new(),
            next_trigger: 0,
            close_listeners: CloseListeners::new(),
        })
    }

    // ========== Programmatic API ==========

    /// Show `content` next to `anchor`. `None` uses the configured default
    /// placement.
    ///
    /// Any live tooltip is torn down first without running close listeners.
    pub fn show(
        &mut self,
        anchor: &H::Anchor,
        content: impl Into<String>,
        placement: impl Into<Option<Placement>>,
    ) -> TooltipId {
        let placement = placement.into().unwrap_or(self.config.placement);
        let rect = self.host.anchor_rect(anchor);
        let id = self.open(rect, content.into(), placement);
        if let Some(active) = self.slot.as_ref() {
            self.host.describe(anchor, &active.aria_id);
        }
        id
    }

    /// Show `content` at a viewport point, treated as a zero-size anchor.
    pub fn show_at(
        &mut self,
        x: f64,
        y: f64,
        content: impl Into<String>,
        placement: impl Into<Option<Placement>>,
    ) -> TooltipId {
        let placement = placement.into().unwrap_or(self.config.placement);
        self.open(AnchorRect::at_point(x, y), content.into(), placement)
    }

    /// Start hiding the live tooltip.
    ///
    /// Returns `false` when there was nothing to hide (no tooltip, or one
    /// already leaving), so repeated calls are harmless.
    pub fn hide(&mut self) -> bool {
        let Some(active) = self.slot.as_mut() else {
            return false;
        };
        if !active.controller.leave() {
            return false;
        }

        let id = active.id;
        self.host.set_classes(id, ClassSet::project(active.controller.state(), active.side));
        self.timers.arm(
            &mut self.scheduler,
            TimerPurpose::Close(id),
            Deferral::After(self.config.leave_duration()),
        );
        tracing::debug!(tooltip = %id, "Tooltip leaving");
        true
    }

    /// Register a listener run once per tooltip, after its leave animation
    /// completed and its element was unmounted.
    ///
    /// These run inside [`TooltipService::fire`] and must not call back
    /// into the service. Owners that share the service behind a `RefCell`
    /// keep their own [`CloseListeners`] instead and notify them with the
    /// id `fire` returns, after releasing the borrow.
    pub fn on_closed(&mut self, listener: impl FnMut(TooltipId) + 'static) {
        self.close_listeners.push(listener);
    }

    /// The live tooltip, if any.
    pub fn active(&self) -> Option<&ActiveTooltip> {
        self.slot.as_ref()
    }

    /// State of the live tooltip; `Hidden` when there is none.
    pub fn state(&self) -> TooltipState {
        self.slot.as_ref().map_or(TooltipState::Hidden, ActiveTooltip::state)
    }

    // ========== Triggers ==========

    /// Attach a trigger to `anchor`.
    ///
    /// The device probe decides once, here, whether the element reacts to
    /// hover or to long press.
    pub fn attach(
        &mut self,
        anchor: H::Anchor,
        content: impl Into<String>,
        placement: impl Into<Option<Placement>>,
    ) -> TriggerId {
        let placement = placement.into().unwrap_or(self.config.placement);
        let mode = if self.probe.is_touch() { TriggerMode::LongPress } else { TriggerMode::Hover };

        self.next_trigger += 1;
        let id = TriggerId(self.next_trigger);
        let detector = LongPressDetector::new(self.config.long_press());
        self.triggers.insert(id, TooltipTrigger::new(anchor, content.into(), placement, mode, detector));

        tracing::debug!(trigger = %id, ?mode, %placement, "Trigger attached");
        id
    }

    /// Detach a trigger, hiding the tooltip and dropping its timers.
    pub fn detach(&mut self, id: TriggerId) -> Option<TooltipTrigger<H::Anchor>> {
        let trigger = self.triggers.remove(&id)?;
        self.timers.cancel_where(&mut self.scheduler, |p| p.trigger() == Some(id));
        self.hide();
        tracing::debug!(trigger = %id, "Trigger detached");
        Some(trigger)
    }

    /// Look up an attached trigger.
    pub fn trigger(&self, id: TriggerId) -> Option<&TooltipTrigger<H::Anchor>> {
        self.triggers.get(&id)
    }

    /// Feed an element event to a trigger.
    pub fn handle_event(&mut self, id: TriggerId, event: &TriggerEvent) -> TriggerIntent {
        let Some(trigger) = self.triggers.get_mut(&id) else {
            tracing::warn!(trigger = %id, ?event, "Event for unknown trigger");
            return TriggerIntent::Ignore;
        };

        let intent = trigger.intent(event);
        match intent {
            TriggerIntent::Show => self.request_show(id),
            TriggerIntent::Hide => self.request_hide(id),
            TriggerIntent::Press => {
                let (previous, step) = trigger.long_press.press();
                if let Some(previous) = previous {
                    self.timers.cancel(&mut self.scheduler, previous);
                }
                if let PressStep::Arm(delay) = step {
                    let token = self.timers.arm(
                        &mut self.scheduler,
                        TimerPurpose::LongPress(id),
                        Deferral::After(delay),
                    );
                    trigger.long_press.armed(token);
                }
            }
            TriggerIntent::Release => {
                if let PressStep::Disarm(token) = trigger.long_press.release() {
                    self.timers.cancel(&mut self.scheduler, token);
                }
            }
            TriggerIntent::Ignore => {}
        }
        intent
    }

    // ========== Timers ==========

    /// Deliver an elapsed timer. Cancelled and unknown tokens are ignored.
    ///
    /// Returns the tooltip this token closed, if any.
    pub fn fire(&mut self, token: TimerToken) -> Option<TooltipId> {
        let Some(purpose) = self.timers.take(token) else {
            tracing::trace!(%token, "Ignoring stale timer");
            return None;
        };
        tracing::trace!(%token, ?purpose, "Timer fired");

        match purpose {
            TimerPurpose::Place(id) => self.place(id),
            TimerPurpose::Close(id) => return self.close(id).then_some(id),
            TimerPurpose::ShowDelay(trigger) => self.show_for_trigger(trigger),
            TimerPurpose::AutoHide(trigger) => self.request_hide(trigger),
            TimerPurpose::LongPress(trigger) => self.long_press_elapsed(trigger, token),
        }
        None
    }

    // ========== Lifecycle ==========

    /// Tear everything down: triggers, the live tooltip and all timers.
    ///
    /// The live tooltip is unmounted immediately and close listeners are not
    /// run.
    pub fn dispose(&mut self) {
        self.timers.cancel_where(&mut self.scheduler, |_| true);
        self.triggers.clear();
        if let Some(active) = self.slot.take() {
            self.host.unmount(active.id);
        }
        tracing::debug!("Tooltip service disposed");
    }

    // ========== Accessors ==========

    /// Active configuration.
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// The measurement/mutation collaborator.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the measurement/mutation collaborator.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The timer collaborator.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the timer collaborator.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Number of timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // ========== Internals ==========

    /// Put a tooltip on screen, reviving a leaving one for an identical
    /// request or replacing whatever is live.
    fn open(&mut self, rect: AnchorRect, content: String, placement: Placement) -> TooltipId {
        if let Some(active) = self.slot.as_mut() {
            if active.can_resume(&content, placement, rect) && active.controller.enter() {
                let id = active.id;
                self.timers.cancel_where(&mut self.scheduler, |p| p.tooltip() == Some(id));
                self.host.set_classes(id, ClassSet::project(active.controller.state(), active.side));
                self.timers.arm(&mut self.scheduler, TimerPurpose::Place(id), Deferral::NextFrame);
                tracing::debug!(tooltip = %id, "Tooltip resumed before close");
                return id;
            }
        }

        self.teardown();

        self.next_tooltip += 1;
        let id = TooltipId(self.next_tooltip);
        let mut tooltip = ActiveTooltip::new(id, content, placement, rect);
        tooltip.controller.enter();

        self.host.mount(id, &tooltip.aria_id, &tooltip.content);
        self.host.set_classes(id, ClassSet::project(tooltip.controller.state(), tooltip.side));
        // Size is only known after the element's first layout pass
        self.timers.arm(&mut self.scheduler, TimerPurpose::Place(id), Deferral::NextFrame);

        tracing::debug!(tooltip = %id, %placement, anchor = ?rect, "Tooltip shown");
        self.slot = Some(tooltip);
        id
    }

    /// Drop the live tooltip synchronously, skipping its close listeners.
    fn teardown(&mut self) {
        let Some(old) = self.slot.take() else {
            return;
        };
        let id = old.id;
        let cancelled = self.timers.cancel_where(&mut self.scheduler, |p| p.tooltip() == Some(id));
        self.host.unmount(id);
        tracing::debug!(tooltip = %id, cancelled, state = ?old.state(), "Tooltip replaced");
    }

    fn place(&mut self, id: TooltipId) {
        let Some(active) = self.slot.as_mut().filter(|t| t.id == id) else {
            tracing::warn!(tooltip = %id, "Placement for a tooltip that is gone");
            return;
        };

        let host = &self.host;
        let size = *active.size.get_or_insert_with(|| host.tooltip_size(id));
        if size.is_empty() {
            tracing::warn!(tooltip = %id, ?size, "Tooltip has no layout size yet");
        }

        let position = compute_position(active.anchor, size, self.host.viewport(), active.requested);
        self.host.set_shift(id, position.shift);
        self.host.set_offset(id, position.left, position.top);
        active.side = position.side;
        active.position = Some(position);

        // A hide that raced this write keeps the tooltip leaving
        active.controller.settle();
        self.host.set_classes(id, ClassSet::project(active.controller.state(), active.side));
        tracing::debug!(
            tooltip = %id,
            left = position.left,
            top = position.top,
            side = %position.side,
            "Tooltip placed"
        );
    }

    fn close(&mut self, id: TooltipId) -> bool {
        let Some(active) = self.slot.as_mut().filter(|t| t.id == id) else {
            tracing::warn!(tooltip = %id, "Close for a tooltip that is gone");
            return false;
        };
        if !active.controller.finish() {
            return false;
        }

        self.slot = None;
        self.host.unmount(id);
        tracing::debug!(tooltip = %id, "Tooltip closed");
        self.close_listeners.notify(id);
        true
    }

    fn request_show(&mut self, trigger: TriggerId) {
        self.request_hide(trigger);
        self.timers.arm(
            &mut self.scheduler,
            TimerPurpose::ShowDelay(trigger),
            Deferral::After(self.config.show_delay()),
        );
    }

    fn request_hide(&mut self, trigger: TriggerId) {
        self.timers.cancel_where(&mut self.scheduler, |p| *p == TimerPurpose::ShowDelay(trigger));
        self.hide();
    }

    fn show_for_trigger(&mut self, id: TriggerId) {
        let Some(trigger) = self.triggers.get(&id) else {
            return;
        };
        let rect = self.host.anchor_rect(&trigger.anchor);
        let (content, placement) = (trigger.content.clone(), trigger.placement);

        self.open(rect, content, placement);
        if let (Some(active), Some(trigger)) = (self.slot.as_ref(), self.triggers.get(&id)) {
            self.host.describe(&trigger.anchor, &active.aria_id);
        }
    }

    fn long_press_elapsed(&mut self, id: TriggerId, token: TimerToken) {
        let Some(trigger) = self.triggers.get_mut(&id) else {
            return;
        };
        if !trigger.long_press.elapsed(token) {
            return;
        }
        tracing::debug!(trigger = %id, "Long press detected");

        self.request_show(id);
        self.timers.cancel_where(&mut self.scheduler, |p| *p == TimerPurpose::AutoHide(id));
        self.timers.arm(
            &mut self.scheduler,
            TimerPurpose::AutoHide(id),
            Deferral::After(self.config.long_press_hide()),
        );
    }
}

impl<H: Surface> TooltipService<H, ManualScheduler> {
    /// Move the manual clock forward by `by`, firing every timer that comes
    /// due on the way, including ones scheduled while firing.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(token) = self.scheduler.pop_due(until) {
            self.fire(token);
        }
        self.scheduler.set_now(until);
    }
}
