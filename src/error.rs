use thiserror::Error;

use crate::core::template::TemplateError;

pub type WidgetResult<T> = Result<T, WidgetError>;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("render hook `{hook}` failed: {reason}")]
    Hook { hook: &'static str, reason: String },

    #[error("invalid widget data: {0}")]
    InvalidData(String),
}

impl WidgetError {
    /// Convenience constructor for widget hook failures.
    #[must_use]
    pub fn hook(hook: &'static str, reason: impl Into<String>) -> Self {
        Self::Hook {
            hook,
            reason: reason.into(),
        }
    }
}
