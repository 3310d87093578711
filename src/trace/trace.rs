use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::submit::response::ResponseState;

/// Guard lifecycle step recorded in the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TracePhase {
    Initialized,
    Edit,
    GateClosed,
    GateOpened,
    SubmitPending,
    SubmitSucceeded,
    SubmitFailed,
    UnloadWarned,
    Teardown,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub form_id: String,
    pub phase: TracePhase,
    pub response_state: ResponseState,
    pub dirty: bool,

    pub field: Option<String>,
    pub status: Option<u16>,
    pub detail: Option<String>,
}

impl TraceEvent {
    /// Event stamped with the current time. `step` is assigned when the
    /// logger records it.
    pub fn now(form_id: &str, phase: TracePhase, state: ResponseState) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step: 0,
            form_id: form_id.to_string(),
            phase,
            response_state: state,
            dirty: false,
            field: None,
            status: None,
            detail: None,
        }
    }

    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    pub fn with_field(mut self, field: impl ToString) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
