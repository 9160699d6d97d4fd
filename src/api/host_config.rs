use serde::{Deserialize, Serialize};

/// Options accepted by `RenderHost::configure_template`.
///
/// Serializable so host applications can persist widget setup without
/// inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateOptions {
    /// Register the widget's observed fields for change interception.
    #[serde(default = "default_true")]
    pub watch_for_field_changes: bool,
    /// Run the render pipeline synchronously before returning.
    #[serde(default = "default_true")]
    pub immediate_render: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            watch_for_field_changes: true,
            immediate_render: true,
        }
    }
}

impl TemplateOptions {
    #[must_use]
    pub const fn with_watch_for_field_changes(mut self, watch: bool) -> Self {
        self.watch_for_field_changes = watch;
        self
    }

    #[must_use]
    pub const fn with_immediate_render(mut self, immediate: bool) -> Self {
        self.immediate_render = immediate;
        self
    }
}

const fn default_true() -> bool {
    true
}
