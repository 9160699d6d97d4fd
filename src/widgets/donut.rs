use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{FieldSeed, HookProfile, RenderContext, RenderHost, Widget};
use crate::error::WidgetResult;

pub const DONUT_STYLES: &str = ".donut{display:block;width:100%}";

/// One labeled input value for the donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
}

impl DonutSlice {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Projected donut segment in angular coordinates (degrees, clockwise from
/// twelve o'clock).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSegment {
    pub label: String,
    pub fraction: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

/// Projects slices into adjacent angular segments.
///
/// Deterministic and side-effect free so both rendering and tests consume
/// the same geometry. Non-finite and non-positive values are dropped; a
/// degenerate total yields an empty ring.
#[must_use]
pub fn project_donut_segments(slices: &[DonutSlice]) -> Vec<DonutSegment> {
    let total: f64 = slices
        .iter()
        .filter(|slice| slice.value.is_finite() && slice.value > 0.0)
        .map(|slice| slice.value)
        .sum();
    if !(total > 0.0) {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(slices.len());
    let mut cursor = 0.0_f64;
    for slice in slices {
        if !slice.value.is_finite() || slice.value <= 0.0 {
            continue;
        }
        let fraction = slice.value / total;
        let sweep = fraction * 360.0;
        segments.push(DonutSegment {
            label: slice.label.clone(),
            fraction,
            start_angle: cursor,
            sweep_angle: sweep,
        });
        cursor += sweep;
    }
    segments
}

/// Donut chart: custom render hook emits the segment markup; the post-render
/// hook locates the drawing surface the render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutChartWidget {
    pub title: String,
    pub slices: Vec<DonutSlice>,
    surface_located: bool,
}

impl DonutChartWidget {
    #[must_use]
    pub fn new(title: impl Into<String>, slices: Vec<DonutSlice>) -> Self {
        Self {
            title: title.into(),
            slices,
            surface_located: false,
        }
    }

    /// Builds a configured host around this widget.
    pub fn attach(self) -> WidgetResult<RenderHost<Self>> {
        // Custom-render widgets still configure assets: the pipeline gate
        // requires both, and styles feed the widget's own markup.
        RenderHost::with_assets(self, "", DONUT_STYLES)
    }

    /// Whether the last post-render pass found the `<svg>` drawing surface.
    #[must_use]
    pub const fn surface_located(&self) -> bool {
        self.surface_located
    }
}

impl Widget for DonutChartWidget {
    fn observed_fields(&self) -> &[&str] {
        &["title"]
    }

    fn field_snapshot(&self) -> Vec<FieldSeed> {
        vec![FieldSeed::plain(
            "title",
            Value::String(self.title.clone()),
        )]
    }

    fn hook_profile(&self) -> HookProfile {
        HookProfile::none().with_render().with_post_render()
    }

    fn render(&mut self, context: &mut RenderContext<'_>) -> WidgetResult<()> {
        let title = context
            .field("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let segments = project_donut_segments(&self.slices);
        let mut markup = String::new();
        let _ = write!(markup, "<figure class=\"donut\"><figcaption>{title}</figcaption><svg>");
        for segment in &segments {
            let _ = write!(
                markup,
                "<path data-label=\"{}\" data-start=\"{:.2}\" data-sweep=\"{:.2}\"/>",
                segment.label, segment.start_angle, segment.sweep_angle
            );
        }
        markup.push_str("</svg></figure>");
        context.scope_mut().replace_content(markup);
        Ok(())
    }

    fn post_render(&mut self, context: &mut RenderContext<'_>) -> WidgetResult<()> {
        self.surface_located = context.scope().find_element("svg").is_some();
        Ok(())
    }
}
