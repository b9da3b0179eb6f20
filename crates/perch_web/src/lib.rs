//! Browser binding for Perch tooltips.
//!
//! - **dom**: `DomHost`, measuring and mutating the live document
//! - **scheduler**: `BrowserScheduler`, timeouts on the event loop
//! - **binding**: `WebTooltips` and per-element event bindings

pub mod binding;
pub mod dom;
pub mod scheduler;

pub use binding::{navigator_probe, DomService, ElementBinding, WebTooltips};
pub use dom::DomHost;
pub use scheduler::BrowserScheduler;
