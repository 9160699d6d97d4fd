use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{FieldSeed, HookProfile, RenderContext, RenderHost, Widget};
use crate::error::{WidgetError, WidgetResult};

pub const TIMELINE_STYLES: &str = ".timeline{position:relative;height:2em}";

/// One labeled moment on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub time: DateTime<Utc>,
    pub label: String,
}

impl TimelineEvent {
    #[must_use]
    pub fn new(time: DateTime<Utc>, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }
}

/// Maps a timestamp onto a horizontal pixel position, clamped to the track.
///
/// Events outside the configured range land on the nearest edge rather than
/// overflowing the drawing area.
#[must_use]
pub fn time_to_pixel(
    time: DateTime<Utc>,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    width_px: f64,
) -> f64 {
    let span = (range_end - range_start).num_milliseconds();
    if span <= 0 || !(width_px > 0.0) {
        return 0.0;
    }
    let offset = (time - range_start).num_milliseconds();
    let normalized = (offset as f64 / span as f64).clamp(0.0, 1.0);
    normalized * width_px
}

/// Timeline chart: a pre-render hook normalizes the event list, a custom
/// render hook projects events onto the horizontal track.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineChartWidget {
    pub events: Vec<TimelineEvent>,
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
    pub track_width_px: f64,
}

impl TimelineChartWidget {
    pub fn new(
        events: Vec<TimelineEvent>,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        track_width_px: f64,
    ) -> WidgetResult<Self> {
        if range_end <= range_start {
            return Err(WidgetError::InvalidData(
                "timeline range end must be after range start".to_owned(),
            ));
        }
        if !track_width_px.is_finite() || track_width_px <= 0.0 {
            return Err(WidgetError::InvalidData(
                "timeline track width must be finite and positive".to_owned(),
            ));
        }
        Ok(Self {
            events,
            range_start,
            range_end,
            track_width_px,
        })
    }

    /// Builds a configured host around this widget.
    pub fn attach(self) -> WidgetResult<RenderHost<Self>> {
        RenderHost::with_assets(self, "", TIMELINE_STYLES)
    }
}

impl Widget for TimelineChartWidget {
    fn observed_fields(&self) -> &[&str] {
        &["caption"]
    }

    fn field_snapshot(&self) -> Vec<FieldSeed> {
        vec![FieldSeed::plain("caption", Value::String(String::new()))]
    }

    fn hook_profile(&self) -> HookProfile {
        HookProfile::none().with_pre_render().with_render()
    }

    fn pre_render(&mut self, _context: &mut RenderContext<'_>) -> WidgetResult<()> {
        // Stable sort keeps same-instant events in insertion order.
        self.events.sort_by_key(|event| event.time);
        Ok(())
    }

    fn render(&mut self, context: &mut RenderContext<'_>) -> WidgetResult<()> {
        let caption = context
            .field("caption")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let mut markup = String::new();
        let _ = write!(markup, "<div class=\"timeline\" aria-label=\"{caption}\">");
        for event in &self.events {
            let x = time_to_pixel(
                event.time,
                self.range_start,
                self.range_end,
                self.track_width_px,
            );
            let _ = write!(
                markup,
                "<span class=\"event\" style=\"left:{x:.1}px\">{}</span>",
                event.label
            );
        }
        markup.push_str("</div>");
        context.scope_mut().replace_content(markup);
        Ok(())
    }
}
