use serde_json::Value;

use crate::api::{FieldSeed, RenderHost, Widget};
use crate::error::WidgetResult;

pub const GREETING_TEMPLATE: &str = "<span class=\"greeting\">Hello, ${this.name}!</span>";
pub const GREETING_STYLES: &str = ".greeting{font-weight:bold}";

/// Hook-less widget: the host's default templating step does all rendering,
/// and writes to `name` re-render automatically once watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingWidget {
    pub name: String,
}

impl GreetingWidget {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Builds a configured host around this widget, the attach path.
    pub fn attach(self) -> WidgetResult<RenderHost<Self>> {
        RenderHost::with_assets(self, GREETING_TEMPLATE, GREETING_STYLES)
    }
}

impl Widget for GreetingWidget {
    fn observed_fields(&self) -> &[&str] {
        &["name"]
    }

    fn field_snapshot(&self) -> Vec<FieldSeed> {
        vec![FieldSeed::plain("name", Value::String(self.name.clone()))]
    }
}
