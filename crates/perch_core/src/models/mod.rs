//! Data models for Perch.
//!
//! This module contains the core value types:
//! - `geometry` - AnchorRect, TooltipSize, ViewportSize
//! - `placement` - Placement, Axis
//! - `state` - TooltipState and its CSS class projection

pub mod geometry;
pub mod placement;
pub mod state;

pub use geometry::{AnchorRect, TooltipSize, ViewportSize};
pub use placement::{Axis, Placement};
pub use state::{ClassSet, TooltipState};
