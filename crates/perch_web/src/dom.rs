//! Document-backed measurement and mutation.
//!
//! Each tooltip is a container appended to `document.body`:
//!
//! ```html
//! <div class="perch-tooltip-container">
//!   <div class="perch-tooltip enter bottom" id="__a1b2c3d4e5__" role="tooltip">
//!     <div class="perch-tooltip__body">content</div>
//!     <div class="perch-tooltip__arrow"></div>
//!   </div>
//! </div>
//! ```
//!
//! The inner `.perch-tooltip` element is the one measured and positioned.

use std::collections::HashMap;

use perch_core::{
    arrow_style, AnchorRect, ClassSet, Measure, PerchError, Shift, Surface, TooltipId, TooltipSize,
    ViewportSize,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

const CONTAINER_CLASS: &str = "perch-tooltip-container";
const TOOLTIP_CLASS: &str = "perch-tooltip";
const BODY_CLASS: &str = "perch-tooltip__body";
const ARROW_CLASS: &str = "perch-tooltip__arrow";

struct MountedTooltip {
    container: Element,
    tooltip: HtmlElement,
    arrow: HtmlElement,
}

/// Measurement and mutation over the live document.
pub struct DomHost {
    window: Window,
    document: Document,
    mounted: HashMap<TooltipId, MountedTooltip>,
}

impl DomHost {
    /// Bind to the global window and document.
    pub fn new() -> Result<Self, PerchError> {
        let window = web_sys::window().ok_or_else(|| PerchError::host("no global window"))?;
        let document = window.document().ok_or_else(|| PerchError::host("window has no document"))?;
        if document.body().is_none() {
            return Err(PerchError::host("document has no body"));
        }
        Ok(Self { window, document, mounted: HashMap::new() })
    }

    /// The bound window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The bound document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn build(&self, aria_id: &str, content: &str) -> Result<MountedTooltip, JsValue> {
        let container = self.document.create_element("div")?;
        container.set_class_name(CONTAINER_CLASS);

        let tooltip: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        tooltip.set_class_name(TOOLTIP_CLASS);
        tooltip.set_id(aria_id);
        tooltip.set_attribute("role", "tooltip")?;

        let body = self.document.create_element("div")?;
        body.set_class_name(BODY_CLASS);
        // Content may carry markup
        body.set_inner_html(content);

        let arrow: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        arrow.set_class_name(ARROW_CLASS);

        tooltip.append_child(&body)?;
        tooltip.append_child(&arrow)?;
        container.append_child(&tooltip)?;

        let root = self.document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;
        root.append_child(&container)?;

        Ok(MountedTooltip { container, tooltip, arrow })
    }

    fn tooltip(&self, id: TooltipId) -> Option<&MountedTooltip> {
        let mounted = self.mounted.get(&id);
        if mounted.is_none() {
            tracing::warn!(tooltip = %id, "No element for tooltip");
        }
        mounted
    }
}

impl Measure for DomHost {
    type Anchor = Element;

    fn anchor_rect(&self, anchor: &Element) -> AnchorRect {
        let rect = anchor.get_bounding_client_rect();
        AnchorRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn tooltip_size(&self, id: TooltipId) -> TooltipSize {
        self.tooltip(id)
            .map(|m| {
                let rect = m.tooltip.get_bounding_client_rect();
                TooltipSize::new(rect.width(), rect.height())
            })
            .unwrap_or_default()
    }

    fn viewport(&self) -> ViewportSize {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        ViewportSize::new(width, height)
    }
}

impl Surface for DomHost {
    fn mount(&mut self, id: TooltipId, aria_id: &str, content: &str) {
        match self.build(aria_id, content) {
            Ok(mounted) => {
                self.mounted.insert(id, mounted);
            }
            Err(err) => tracing::warn!(tooltip = %id, ?err, "Failed to mount tooltip"),
        }
    }

    fn unmount(&mut self, id: TooltipId) {
        if let Some(mounted) = self.mounted.remove(&id) {
            mounted.container.remove();
        }
    }

    fn set_classes(&mut self, id: TooltipId, classes: ClassSet) {
        let Some(mounted) = self.tooltip(id) else {
            return;
        };
        let list = mounted.tooltip.class_list();
        for class in ClassSet::MANAGED {
            warn_js("remove tooltip class", list.remove_1(class));
        }
        for class in classes.iter() {
            warn_js("add tooltip class", list.add_1(class));
        }
    }

    fn set_offset(&mut self, id: TooltipId, left: f64, top: f64) {
        let Some(mounted) = self.tooltip(id) else {
            return;
        };
        let style = mounted.tooltip.style();
        warn_js("set left", style.set_property("left", &format!("{left}px")));
        warn_js("set top", style.set_property("top", &format!("{top}px")));
    }

    fn set_shift(&mut self, id: TooltipId, shift: Option<Shift>) {
        let Some(mounted) = self.tooltip(id) else {
            return;
        };
        let style = mounted.tooltip.style();
        match shift {
            Some(shift) => warn_js("set transform", style.set_property("transform", &shift.transform_css())),
            None => warn_js("clear transform", style.remove_property("transform").map(drop)),
        }

        // Both arrow offsets are rewritten; neither may outlive its shift
        let arrow = mounted.arrow.style();
        for (property, value) in arrow_style(shift) {
            match value {
                Some(value) => warn_js("move arrow", arrow.set_property(property, &value)),
                None => warn_js("reset arrow", arrow.remove_property(property).map(drop)),
            }
        }
    }

    fn describe(&mut self, anchor: &Element, aria_id: &str) {
        warn_js("set aria-describedby", anchor.set_attribute("aria-describedby", aria_id));
    }
}

fn warn_js(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(?err, "DOM call failed: {action}");
    }
}
