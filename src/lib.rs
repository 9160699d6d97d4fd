//! widget-rs: renderable widgets over a shadow-scope render pipeline.
//!
//! The crate centers on one component, the [`api::RenderHost`]: it owns an
//! isolated rendering scope for a widget, decides when and how rendering
//! happens, and mediates access to the widget's observable fields. The
//! shipped widgets (greeting, donut chart, timeline chart) are thin
//! consumers of that contract.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod widgets;

pub use api::{RenderHost, TemplateOptions, Widget};
pub use error::{WidgetError, WidgetResult};
