//! Pipeline enablement as an explicit two-state machine.
//!
//! `Active`/`Paused` transitions happen only through the designated
//! operations; batch updates go through [`PauseScope`], which restores the
//! prior state on every exit path.

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PipelineState {
    #[default]
    Active,
    Paused,
}

impl PipelineState {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn pause(&mut self) {
        if self.is_active() {
            trace!("render pipeline paused");
        }
        *self = Self::Paused;
    }

    pub fn resume(&mut self) {
        if !self.is_active() {
            trace!("render pipeline resumed");
        }
        *self = Self::Active;
    }
}

/// RAII pause: enters `Paused` and restores the previous state on drop.
///
/// Nested scopes compose: an inner scope restores `Paused`, the outer one
/// restores whatever held before it.
#[derive(Debug)]
pub struct PauseScope<'state> {
    state: &'state mut PipelineState,
    previous: PipelineState,
}

impl<'state> PauseScope<'state> {
    pub fn enter(state: &'state mut PipelineState) -> Self {
        let previous = *state;
        state.pause();
        Self { state, previous }
    }
}

impl Drop for PauseScope<'_> {
    fn drop(&mut self) {
        *self.state = self.previous;
    }
}
