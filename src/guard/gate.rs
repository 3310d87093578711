use crate::event::listeners::ListenerId;
use crate::form::form_model::{Form, FormControl};

pub const DISABLED_CLASS: &str = "mdl-button--disabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Open,
    Closed,
}

/// Enablement of the submit control. Closed only while the required field
/// has never been touched; once opened it stays open.
#[derive(Debug, Clone)]
pub struct SubmitGate {
    required_field: String,
    state: GateState,
    opener: Option<ListenerId>,
}

impl SubmitGate {
    pub fn new(required_field: &str) -> Self {
        Self {
            required_field: required_field.to_string(),
            state: GateState::Open,
            opener: None,
        }
    }

    pub fn required_field(&self) -> &str {
        &self.required_field
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == GateState::Open
    }

    /// The one-time change listener waiting to open the gate.
    pub fn opener(&self) -> Option<ListenerId> {
        self.opener
    }

    pub fn close(&mut self, opener: ListenerId) {
        self.state = GateState::Closed;
        self.opener = Some(opener);
    }

    /// Returns true if the gate was closed before this call.
    pub fn open(&mut self) -> bool {
        let was_closed = self.state == GateState::Closed;
        self.state = GateState::Open;
        self.opener = None;
        was_closed
    }

    /// Extra classes carried by the submit control.
    pub fn button_classes(&self) -> Vec<&'static str> {
        match self.state {
            GateState::Open => vec![],
            GateState::Closed => vec![DISABLED_CLASS],
        }
    }
}

/// Whether `field` holds a non-empty value: the checked option of a radio
/// group, or the text of a named control.
pub fn field_is_set(form: &Form, field: &str) -> bool {
    if form.has_radio_group(field) {
        return form.radio_value(field).is_some_and(|v| !v.is_empty());
    }

    form.controls.iter().any(|c| match c {
        FormControl::Textarea { name, value }
        | FormControl::Text { name, value }
        | FormControl::Hidden { name, value } => name == field && !value.is_empty(),
        FormControl::Radio { .. } => false,
    })
}
