//! Coalesced render scheduling.
//!
//! Widgets that react to bursty signals (window resize, rapid data pushes)
//! queue render requests here instead of invoking the pipeline per event.
//! `flush` collapses however many requests accumulated into at most one
//! pipeline run, the deferred-to-next-turn debounce made explicit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::host::RenderHost;
use super::widget::Widget;
use crate::error::WidgetResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RenderScheduler {
    pending: u32,
}

impl RenderScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one render request. Requests accumulate until `flush`.
    pub fn request_render(&mut self) {
        self.pending = self.pending.saturating_add(1);
    }

    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending > 0
    }

    #[must_use]
    pub const fn pending_requests(&self) -> u32 {
        self.pending
    }

    /// Runs the host's pipeline at most once for all queued requests.
    ///
    /// Returns `true` when a flush happened (the pipeline was invoked),
    /// `false` when nothing was pending. Pipeline errors propagate after
    /// the queue is cleared, so a failed flush is not retried implicitly.
    pub fn flush<W: Widget>(&mut self, host: &mut RenderHost<W>) -> WidgetResult<bool> {
        if self.pending == 0 {
            return Ok(false);
        }
        let coalesced = self.pending;
        self.pending = 0;
        debug!(coalesced, "flushing coalesced render requests");
        host.run_render_pipeline()?;
        Ok(true)
    }
}
