//! Recording fakes for the host collaborators.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::TooltipConfig;
use crate::device::FixedProbe;
use crate::host::{Measure, Surface, TooltipId};
use crate::models::{AnchorRect, ClassSet, TooltipSize, ViewportSize};
use crate::placement::Shift;
use crate::service::TooltipService;
use crate::timers::ManualScheduler;

/// Element handle: an id plus where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeAnchor {
    pub id: u32,
    pub rect: AnchorRect,
}

/// Anchor `id` at (`left`, `top`), 50x20.
pub fn anchor(id: u32, left: f64, top: f64) -> FakeAnchor {
    FakeAnchor { id, rect: AnchorRect::new(left, top, 50.0, 20.0) }
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// What the fake document holds for one tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeElement {
    pub aria_id: String,
    pub content: String,
    pub classes: Option<ClassSet>,
    pub offset: Option<(f64, f64)>,
    pub shift: Option<Shift>,
}

#[derive(Debug)]
pub struct FakeHost {
    pub viewport: ViewportSize,
    pub tooltip_size: TooltipSize,
    pub elements: BTreeMap<TooltipId, FakeElement>,
    pub mounted: Vec<TooltipId>,
    pub unmounted: Vec<TooltipId>,
    pub described: Vec<(u32, String)>,
    pub placements: u32,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            viewport: ViewportSize::new(1000.0, 800.0),
            tooltip_size: TooltipSize::new(100.0, 40.0),
            elements: BTreeMap::new(),
            mounted: Vec::new(),
            unmounted: Vec::new(),
            described: Vec::new(),
            placements: 0,
        }
    }
}

impl FakeHost {
    pub fn element(&self, id: TooltipId) -> Option<&FakeElement> {
        self.elements.get(&id)
    }

    fn element_mut(&mut self, id: TooltipId) -> &mut FakeElement {
        self.elements.get_mut(&id).unwrap_or_else(|| panic!("{id} is not mounted"))
    }
}

impl Measure for FakeHost {
    type Anchor = FakeAnchor;

    fn anchor_rect(&self, anchor: &FakeAnchor) -> AnchorRect {
        anchor.rect
    }

    fn tooltip_size(&self, _id: TooltipId) -> TooltipSize {
        self.tooltip_size
    }

    fn viewport(&self) -> ViewportSize {
        self.viewport
    }
}

impl Surface for FakeHost {
    fn mount(&mut self, id: TooltipId, aria_id: &str, content: &str) {
        let element = FakeElement {
            aria_id: aria_id.to_string(),
            content: content.to_string(),
            classes: None,
            offset: None,
            shift: None,
        };
        assert!(self.elements.insert(id, element).is_none(), "{id} mounted twice");
        self.mounted.push(id);
    }

    fn unmount(&mut self, id: TooltipId) {
        assert!(self.elements.remove(&id).is_some(), "{id} unmounted twice");
        self.unmounted.push(id);
    }

    fn set_classes(&mut self, id: TooltipId, classes: ClassSet) {
        self.element_mut(id).classes = Some(classes);
    }

    fn set_offset(&mut self, id: TooltipId, left: f64, top: f64) {
        self.element_mut(id).offset = Some((left, top));
        self.placements += 1;
    }

    fn set_shift(&mut self, id: TooltipId, shift: Option<Shift>) {
        self.element_mut(id).shift = shift;
    }

    fn describe(&mut self, anchor: &FakeAnchor, aria_id: &str) {
        self.described.push((anchor.id, aria_id.to_string()));
    }
}

pub type FakeService = TooltipService<FakeHost, ManualScheduler>;

pub fn service_with(host: FakeHost, touch: bool) -> FakeService {
    TooltipService::new(host, ManualScheduler::new(), TooltipConfig::default(), FixedProbe(touch))
        .unwrap()
}

pub fn desktop_service() -> FakeService {
    service_with(FakeHost::default(), false)
}

pub fn touch_service() -> FakeService {
    service_with(FakeHost::default(), true)
}
