pub mod host;
pub mod host_config;
pub mod scheduler;
pub mod widget;

pub use host::{PipelineStep, RenderHost};
pub use host_config::TemplateOptions;
pub use scheduler::RenderScheduler;
pub use widget::{FieldSeed, HookProfile, RenderContext, Widget};
