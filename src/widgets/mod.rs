//! The leaf widgets shipped with the crate.
//!
//! Each one stays thin and exercises a different host capability: greeting
//! rides the default templating step, the donut chart supplies a custom
//! render hook, the timeline chart adds a pre-render normalization pass.

pub mod donut;
pub mod greeting;
pub mod timeline;

pub use donut::{DonutChartWidget, DonutSegment, DonutSlice};
pub use greeting::GreetingWidget;
pub use timeline::{TimelineChartWidget, TimelineEvent};
