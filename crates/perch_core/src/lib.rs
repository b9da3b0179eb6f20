//! Core of Perch, an anchored tooltip library.
//!
//! This crate is framework-free; hosts plug in through collaborator traits:
//!
//! - **placement**: Pure positioning with flip and shift overflow correction
//! - **controller**: Per-tooltip visibility state machine
//! - **service**: Single-slot tooltip service and element triggers
//! - **host** / **timers** / **device**: Collaborator traits for layout,
//!   element mutation, deferred work and device detection
//! - **config**: Timing and default placement
//! - **error**: Error handling
//! - **logging**: Structured logging setup

pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod host;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod long_press;
pub mod models;
pub mod placement;
pub mod service;
pub mod timers;
pub mod tooltip;
pub mod trigger;

#[cfg(test)]
mod testing;

pub use config::TooltipConfig;
pub use controller::VisibilityController;
pub use device::{DeviceProbe, FixedProbe, UserAgentProbe};
pub use error::PerchError;
pub use host::{Measure, Surface, TooltipId};
pub use models::{AnchorRect, Axis, ClassSet, Placement, TooltipSize, TooltipState, ViewportSize};
pub use placement::{arrow_style, compute_position, Position, Shift};
pub use service::{CloseListeners, TooltipService};
pub use timers::{Deferral, ManualScheduler, Scheduler, TimerToken};
pub use tooltip::ActiveTooltip;
pub use trigger::{TooltipTrigger, TriggerEvent, TriggerId, TriggerIntent, TriggerMode};
