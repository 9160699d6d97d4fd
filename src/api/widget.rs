//! The contract between the pipeline host and a leaf widget.
//!
//! Hooks are declared statically through [`HookProfile`] rather than probed
//! at runtime: the host assembles its step sequence once, at construction,
//! from the profile. Hooks the profile does not declare are never invoked,
//! even though the trait gives every widget default no-op bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{FieldKind, PropertyStore, RenderScope};
use crate::error::WidgetResult;

/// Which optional hooks a widget implements.
///
/// `render: true` replaces the host's default templating step with the
/// widget's own `render`; the two are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HookProfile {
    #[serde(default)]
    pub pre_render: bool,
    #[serde(default)]
    pub render: bool,
    #[serde(default)]
    pub post_render: bool,
}

impl HookProfile {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            pre_render: false,
            render: false,
            post_render: false,
        }
    }

    #[must_use]
    pub const fn with_pre_render(mut self) -> Self {
        self.pre_render = true;
        self
    }

    #[must_use]
    pub const fn with_render(mut self) -> Self {
        self.render = true;
        self
    }

    #[must_use]
    pub const fn with_post_render(mut self) -> Self {
        self.post_render = true;
        self
    }
}

/// One field in a widget's initial snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSeed {
    pub name: String,
    pub value: Value,
    pub kind: FieldKind,
}

impl FieldSeed {
    /// A data-valued field, eligible for change interception.
    #[must_use]
    pub fn plain(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            kind: FieldKind::Plain,
        }
    }

    /// A derived field; registration skips it and writes never notify.
    #[must_use]
    pub fn computed(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            kind: FieldKind::Computed,
        }
    }
}

/// Hook-time view of the host: the scope mutably, the store read-only.
///
/// The read-only store is deliberate — a render step cannot write a watched
/// field mid-render, which removes the recursive re-render hazard of
/// descriptor-based interception. Batch follow-up writes go through
/// `RenderHost::update_properties` after the pass.
#[derive(Debug)]
pub struct RenderContext<'host> {
    scope: &'host mut RenderScope,
    properties: &'host PropertyStore,
}

impl<'host> RenderContext<'host> {
    pub(crate) fn new(scope: &'host mut RenderScope, properties: &'host PropertyStore) -> Self {
        Self { scope, properties }
    }

    #[must_use]
    pub fn scope(&self) -> &RenderScope {
        self.scope
    }

    pub fn scope_mut(&mut self) -> &mut RenderScope {
        self.scope
    }

    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        self.properties
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// A leaf widget driven by a [`crate::api::RenderHost`].
pub trait Widget {
    /// Field names eligible for change interception. Names missing from the
    /// snapshot, or seeded as computed, are skipped silently.
    fn observed_fields(&self) -> &[&str] {
        &[]
    }

    /// Initial field values copied into the host's property store.
    fn field_snapshot(&self) -> Vec<FieldSeed> {
        Vec::new()
    }

    /// Which hooks the host should wire into its step sequence.
    fn hook_profile(&self) -> HookProfile {
        HookProfile::none()
    }

    fn pre_render(&mut self, _context: &mut RenderContext<'_>) -> WidgetResult<()> {
        Ok(())
    }

    /// Custom render step. Only invoked when `hook_profile().render` is set,
    /// in which case the default templating step is never used.
    fn render(&mut self, _context: &mut RenderContext<'_>) -> WidgetResult<()> {
        Ok(())
    }

    fn post_render(&mut self, _context: &mut RenderContext<'_>) -> WidgetResult<()> {
        Ok(())
    }
}
