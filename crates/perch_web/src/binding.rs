//! Shared tooltip service for a page, plus element bindings.
//!
//! [`WebTooltips`] wraps one service in `Rc<RefCell<..>>` so timer and
//! event callbacks can reach it. [`ElementBinding`] owns the listeners
//! attached to one element; dropping it removes them and detaches the
//! trigger.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use perch_core::{
    CloseListeners, PerchError, Placement, TimerToken, TooltipConfig, TooltipId, TooltipService, TriggerEvent,
    TriggerId, TriggerIntent, UserAgentProbe,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, Window};

use crate::dom::DomHost;
use crate::scheduler::BrowserScheduler;

/// Attribute holding a bound element's tooltip content.
pub const CONTENT_ATTRIBUTE: &str = "data-tooltip";

/// Attribute holding a bound element's placement.
pub const PLACEMENT_ATTRIBUTE: &str = "data-tooltip-placement";

const EVENTS: [&str; 7] =
    ["mouseover", "mouseout", "keyup", "blur", "pointerdown", "pointerup", "pointercancel"];

/// Service over the live document.
pub type DomService = TooltipService<DomHost, BrowserScheduler>;

/// Probe the navigator's user agent.
pub fn navigator_probe(window: &Window) -> Result<UserAgentProbe, PerchError> {
    let user_agent = window
        .navigator()
        .user_agent()
        .map_err(|err| PerchError::host(format!("navigator.userAgent unavailable: {err:?}")))?;
    Ok(UserAgentProbe::new(user_agent))
}

/// Page-wide tooltip service handle. Clones share the same service.
#[derive(Clone)]
pub struct WebTooltips {
    inner: Rc<RefCell<DomService>>,
    closed: Rc<CloseListeners>,
}

impl WebTooltips {
    /// Set up the service over the current document.
    pub fn new(config: TooltipConfig) -> Result<Self, PerchError> {
        let host = DomHost::new()?;
        let probe = navigator_probe(host.window())?;
        let scheduler = BrowserScheduler::new();
        let sink = scheduler.sink();

        let inner = Rc::new(RefCell::new(TooltipService::new(host, scheduler, config, probe)?));
        let closed = Rc::new(CloseListeners::new());
        let weak = Rc::downgrade(&inner);
        let listeners = closed.clone();
        *sink.borrow_mut() = Some(Box::new(move |token: TimerToken| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let finished = inner.borrow_mut().fire(token);
            // Listeners run unborrowed so they can use this handle
            if let Some(id) = finished {
                listeners.notify(id);
            }
        }));

        tracing::info!("Perch tooltips ready");
        Ok(Self { inner, closed })
    }

    /// Show `content` next to `anchor`.
    pub fn show(&self, anchor: &Element, content: &str, placement: Option<Placement>) -> TooltipId {
        self.inner.borrow_mut().show(anchor, content, placement)
    }

    /// Show `content` at a viewport point.
    pub fn show_at(&self, x: f64, y: f64, content: &str, placement: Option<Placement>) -> TooltipId {
        self.inner.borrow_mut().show_at(x, y, content, placement)
    }

    /// Hide the live tooltip.
    pub fn hide(&self) -> bool {
        self.inner.borrow_mut().hide()
    }

    /// Run `listener` after each tooltip has fully closed.
    ///
    /// The listener may call back into this handle, for example to show a
    /// follow-up tooltip or drop an [`ElementBinding`].
    pub fn on_closed(&self, listener: impl FnMut(TooltipId) + 'static) {
        self.closed.push(listener);
    }

    /// Bind `element` using its `data-tooltip` and `data-tooltip-placement`
    /// attributes.
    ///
    /// An unknown placement value is a configuration error.
    pub fn bind(&self, element: &Element) -> Result<ElementBinding, PerchError> {
        let content = element.get_attribute(CONTENT_ATTRIBUTE).unwrap_or_default();
        let placement = element
            .get_attribute(PLACEMENT_ATTRIBUTE)
            .map(|value| value.parse::<Placement>())
            .transpose()?;
        self.bind_with(element, content, placement)
    }

    /// Bind `element` with explicit content and placement.
    pub fn bind_with(
        &self,
        element: &Element,
        content: impl Into<String>,
        placement: Option<Placement>,
    ) -> Result<ElementBinding, PerchError> {
        let trigger = self.inner.borrow_mut().attach(element.clone(), content, placement);
        let mut binding = ElementBinding {
            service: Rc::downgrade(&self.inner),
            trigger,
            element: element.clone(),
            listeners: Vec::with_capacity(EVENTS.len()),
        };

        for name in EVENTS {
            let service = Rc::downgrade(&self.inner);
            let target = element.clone();
            let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(service) = service.upgrade() else {
                    return;
                };
                let Some(trigger_event) = to_trigger_event(&event, &target) else {
                    return;
                };
                let intent = service.borrow_mut().handle_event(trigger, &trigger_event);
                if matches!(intent, TriggerIntent::Show | TriggerIntent::Hide) {
                    event.stop_propagation();
                }
            });
            element
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                .map_err(|err| PerchError::host(format!("failed to listen for {name}: {err:?}")))?;
            binding.listeners.push((name, listener));
        }

        tracing::debug!(%trigger, "Element bound");
        Ok(binding)
    }

    /// Tear down every trigger, the live tooltip and all timers.
    pub fn dispose(&self) {
        self.inner.borrow_mut().dispose();
    }
}

/// Listeners attached to one element.
pub struct ElementBinding {
    service: Weak<RefCell<DomService>>,
    trigger: TriggerId,
    element: Element,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl ElementBinding {
    /// The trigger driven by this element.
    pub fn trigger(&self) -> TriggerId {
        self.trigger
    }
}

impl Drop for ElementBinding {
    fn drop(&mut self) {
        for (name, listener) in self.listeners.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        if let Some(service) = self.service.upgrade() {
            service.borrow_mut().detach(self.trigger);
        }
    }
}

fn to_trigger_event(event: &Event, target: &Element) -> Option<TriggerEvent> {
    let trigger_event = match event.type_().as_str() {
        "mouseover" => TriggerEvent::MouseOver,
        "mouseout" => TriggerEvent::MouseOut,
        "blur" => TriggerEvent::Blur,
        "pointerdown" => TriggerEvent::PointerDown,
        "pointerup" => TriggerEvent::PointerUp,
        "pointercancel" => TriggerEvent::PointerCancel,
        "keyup" => {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            let focused = target
                .owner_document()
                .and_then(|document| document.active_element())
                .is_some_and(|active| &active == target);
            TriggerEvent::KeyUp { key, focused }
        }
        _ => return None,
    };
    Some(trigger_event)
}
