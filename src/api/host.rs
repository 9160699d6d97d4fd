use smallvec::SmallVec;
use serde_json::Value;
use tracing::{debug, error, trace, warn};

use crate::core::template::CompiledTemplate;
use crate::core::{PauseScope, PipelineState, PropertyStore, RenderScope};
use crate::error::WidgetResult;

use super::host_config::TemplateOptions;
use super::widget::{RenderContext, Widget};

/// One entry in the host's fixed step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    PreRender,
    CustomRender,
    DefaultRender,
    PostRender,
}

/// Owns the isolated rendering scope for one widget, decides when and how
/// rendering happens, and mediates access to the widget's observable fields.
///
/// The step sequence is assembled once, at construction, from the widget's
/// declared hook profile: an optional pre step, then either the widget's
/// custom render or the default templating step, then an optional post step.
#[derive(Debug)]
pub struct RenderHost<W: Widget> {
    widget: W,
    scope: RenderScope,
    properties: PropertyStore,
    state: PipelineState,
    steps: SmallVec<[PipelineStep; 3]>,
    template_source: Option<String>,
    compiled: Option<CompiledTemplate>,
    styles: Option<String>,
}

impl<W: Widget> RenderHost<W> {
    /// Builds a host around `widget` without rendering.
    ///
    /// Seeds the property store from the widget's field snapshot; every slot
    /// starts plain until `watch_for_field_changes` registers it.
    pub fn new(widget: W) -> Self {
        let profile = widget.hook_profile();
        let mut steps = SmallVec::new();
        if profile.pre_render {
            steps.push(PipelineStep::PreRender);
        }
        steps.push(if profile.render {
            PipelineStep::CustomRender
        } else {
            PipelineStep::DefaultRender
        });
        if profile.post_render {
            steps.push(PipelineStep::PostRender);
        }

        let mut properties = PropertyStore::new();
        for seed in widget.field_snapshot() {
            properties.seed(seed.name, seed.value, seed.kind);
        }
        debug!(
            steps = steps.len(),
            fields = properties.len(),
            "render host constructed"
        );

        Self {
            widget,
            scope: RenderScope::new(),
            properties,
            state: PipelineState::Active,
            steps,
            template_source: None,
            compiled: None,
            styles: None,
        }
    }

    /// Builds a host and configures template assets with default options
    /// (watch fields, render immediately).
    pub fn with_assets(
        widget: W,
        template: impl Into<String>,
        styles: impl Into<String>,
    ) -> WidgetResult<Self> {
        let mut host = Self::new(widget);
        host.configure_template(template, styles, TemplateOptions::default())?;
        Ok(host)
    }

    /// Overwrites stored template and styles unconditionally, then applies
    /// the requested side effects: field watching and an immediate render.
    ///
    /// A template that fails to parse is kept as configured; the default
    /// render step reports the failure and produces empty markup instead.
    pub fn configure_template(
        &mut self,
        template: impl Into<String>,
        styles: impl Into<String>,
        options: TemplateOptions,
    ) -> WidgetResult<()> {
        let template = template.into();
        self.compiled = match CompiledTemplate::parse(&template) {
            Ok(compiled) => Some(compiled),
            Err(parse_error) => {
                warn!(
                    error = %parse_error,
                    "template failed to parse; default render will produce empty markup"
                );
                None
            }
        };
        self.template_source = Some(template);
        self.styles = Some(styles.into());

        if options.watch_for_field_changes {
            self.watch_for_field_changes();
        }
        if options.immediate_render {
            self.run_render_pipeline()?;
        }
        Ok(())
    }

    /// Registers each of the widget's observed fields for change
    /// interception. Idempotent per field; names that are absent from the
    /// snapshot or seeded as computed are skipped silently.
    pub fn watch_for_field_changes(&mut self) {
        let observed = self.widget.observed_fields().to_vec();
        let mut registered = 0_usize;
        for name in observed {
            if self.properties.register(name) {
                registered += 1;
            }
        }
        debug!(registered, "observed fields registered");
    }

    /// Runs the fixed step sequence, synchronously, in order.
    ///
    /// No-op while paused. Missing template or styles is a recoverable
    /// condition: logged, scope untouched, `Ok` returned. A step returning
    /// `Err` propagates immediately and aborts the remaining steps.
    pub fn run_render_pipeline(&mut self) -> WidgetResult<()> {
        if !self.state.is_active() {
            trace!("render pipeline invoked while paused; skipping");
            return Ok(());
        }
        if self.template_source.is_none() || self.styles.is_none() {
            warn!(
                has_template = self.template_source.is_some(),
                has_styles = self.styles.is_some(),
                "render skipped: template or styles not configured"
            );
            return Ok(());
        }

        let steps = self.steps.clone();
        for step in steps {
            match step {
                PipelineStep::PreRender => {
                    let mut context = RenderContext::new(&mut self.scope, &self.properties);
                    self.widget.pre_render(&mut context)?;
                }
                PipelineStep::CustomRender => {
                    let mut context = RenderContext::new(&mut self.scope, &self.properties);
                    self.widget.render(&mut context)?;
                }
                PipelineStep::DefaultRender => self.run_default_render(),
                PipelineStep::PostRender => {
                    let mut context = RenderContext::new(&mut self.scope, &self.properties);
                    self.widget.post_render(&mut context)?;
                }
            }
        }
        trace!("render pipeline completed");
        Ok(())
    }

    /// Templating step used when the widget declares no custom render:
    /// style block plus evaluated template, replacing the whole scope.
    fn run_default_render(&mut self) {
        let body = match &self.compiled {
            Some(template) => match template.evaluate(|name| self.properties.get(name)) {
                Ok(markup) => markup,
                Err(eval_error) => {
                    error!(
                        error = %eval_error,
                        "template evaluation failed; rendering empty markup"
                    );
                    String::new()
                }
            },
            None => {
                error!("template unparsable; rendering empty markup");
                String::new()
            }
        };
        let styles = self.styles.as_deref().unwrap_or("");
        self.scope.replace_content(format!("<style>{styles}</style>{body}"));
    }

    /// Pauses the pipeline. Does not render.
    pub fn pause_render_pipeline(&mut self) {
        self.state.pause();
    }

    /// Resumes the pipeline. Does not render.
    pub fn resume_render_pipeline(&mut self) {
        self.state.resume();
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Writes one field, then invokes the pipeline when the write hit a
    /// watched slot. Unwatched and unknown names store without rendering;
    /// unknown names create a plain slot.
    pub fn set_property(&mut self, name: &str, value: Value) -> WidgetResult<()> {
        let watched = self.properties.write(name, value);
        if watched {
            return self.run_render_pipeline();
        }
        Ok(())
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Applies a batch of field writes with exactly one render at the end.
    ///
    /// The pipeline is paused for the duration of the writes through a
    /// scoped guard, so the per-write render trigger no-ops; the guard
    /// restores the prior state on every exit path, including unwinds from
    /// a change subscriber, and the single render follows the resume.
    pub fn update_properties<I, K>(&mut self, patch: I) -> WidgetResult<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        {
            let _paused = PauseScope::enter(&mut self.state);
            for (name, value) in patch {
                self.properties.write(name.as_ref(), value);
            }
        }
        self.run_render_pipeline()
    }

    #[must_use]
    pub fn scope(&self) -> &RenderScope {
        &self.scope
    }

    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Mutable store access for wiring change subscribers.
    pub fn properties_mut(&mut self) -> &mut PropertyStore {
        &mut self.properties
    }

    #[must_use]
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    #[must_use]
    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Discards the host, handing the widget back. Mirrors widget
    /// detachment: the scope and property store die with the host.
    #[must_use]
    pub fn into_widget(self) -> W {
        self.widget
    }
}
