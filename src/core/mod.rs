pub mod properties;
pub mod scope;
pub mod state;
pub mod template;

pub use properties::{FieldKind, PropertyStore};
pub use scope::RenderScope;
pub use state::{PauseScope, PipelineState};
pub use template::{CompiledTemplate, TemplateError};
