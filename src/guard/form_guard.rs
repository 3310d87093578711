use tracing::{debug, info, warn};

use crate::{
    event::listeners::{EventTarget, ListenerAction, ListenerId, ListenerRegistry, PageEvent},
    form::{
        form_model::{FieldKey, Form, FormError},
        serialize::serialize_form,
        snapshot::FieldSnapshot,
    },
    guard::{
        gate::{SubmitGate, field_is_set},
        unload::{BeforeUnloadEvent, UnloadGuard},
    },
    submit::{
        error::SubmitError,
        response::{ResponseRegion, ResponseState},
        transport::{SubmitTransport, TransportResponse},
    },
    trace::{
        logger::TraceLogger,
        trace::{TraceEvent, TracePhase},
    },
};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/save-judgment";
pub const DEFAULT_REQUIRED_FIELD: &str = "j";
pub const DEFAULT_UNLOAD_MESSAGE: &str = "You have some unsaved changes.";
pub const DEFAULT_PENDING_HTML: &str = "<b>Saving judgment...</b> <div class=\"mdl-spinner mdl-spinner--single-color mdl-js-spinner is-active\"></div>";
pub const DEFAULT_FAILURE_FALLBACK_HTML: &str = "<b>Could not save judgment.</b> Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub endpoint: String,
    pub required_field: String,
    pub unload_message: String,
    pub pending_html: String,
    /// Rendered on failure when there is no response body to show
    pub failure_fallback_html: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            required_field: DEFAULT_REQUIRED_FIELD.to_string(),
            unload_message: DEFAULT_UNLOAD_MESSAGE.to_string(),
            pending_html: DEFAULT_PENDING_HTML.to_string(),
            failure_fallback_html: DEFAULT_FAILURE_FALLBACK_HTML.to_string(),
        }
    }
}

/// A request that has been issued but not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub endpoint: String,
    pub body: String,
}

/// What a dispatched page event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    GateOpened,
    UnloadWarning(Option<String>),
    Submitted(Result<TransportResponse, SubmitError>),
}

/// Owns the form, its committed snapshot, the submit gate, the response
/// region and every listener it registers.
pub struct FormGuard<T: SubmitTransport> {
    form: Form,
    snapshot: FieldSnapshot,
    gate: SubmitGate,
    unload: UnloadGuard,
    region: ResponseRegion,
    next_visible: bool,
    listeners: ListenerRegistry,
    config: GuardConfig,
    transport: T,
    tracer: TraceLogger,
}

impl<T: SubmitTransport> FormGuard<T> {
    pub fn initialize(form: Form, config: GuardConfig, transport: T) -> Self {
        Self::initialize_traced(form, config, transport, TraceLogger::disabled())
    }

    pub fn initialize_traced(
        form: Form,
        config: GuardConfig,
        transport: T,
        tracer: TraceLogger,
    ) -> Self {
        let snapshot = FieldSnapshot::capture(&form);
        let mut listeners = ListenerRegistry::new();
        listeners.subscribe(EventTarget::BeforeUnload, ListenerAction::WarnOnUnload);
        listeners.subscribe(EventTarget::Submit, ListenerAction::SubmitForm);

        let mut guard = Self {
            gate: SubmitGate::new(&config.required_field),
            unload: UnloadGuard::new(&config.unload_message),
            form,
            snapshot,
            region: ResponseRegion::new(),
            next_visible: false,
            listeners,
            config,
            transport,
            tracer,
        };

        debug!(
            form = %guard.form.id,
            tracked = guard.snapshot.len(),
            "captured baseline snapshot"
        );
        guard.trace(TracePhase::Initialized, |e| e);
        guard.update_submit_gate();
        guard
    }

    // ---- Accessors ----

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn snapshot(&self) -> &FieldSnapshot {
        &self.snapshot
    }

    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    pub fn response(&self) -> &ResponseRegion {
        &self.region
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether the "proceed to next" affordance is shown.
    pub fn next_visible(&self) -> bool {
        self.next_visible
    }

    pub fn can_submit(&self) -> bool {
        self.gate.is_open()
    }

    // ---- Dirty tracking ----

    pub fn compute_dirty(&self) -> bool {
        self.snapshot.is_dirty(&self.form)
    }

    pub fn dirty_fields(&self) -> Vec<FieldKey> {
        self.snapshot.dirty_fields(&self.form)
    }

    pub fn on_unload(&mut self, event: &mut BeforeUnloadEvent) -> Option<String> {
        let message = self.unload.intercept(self.compute_dirty(), event);
        if message.is_some() {
            debug!(form = %self.form.id, "unsaved changes, asking before unload");
            self.trace(TracePhase::UnloadWarned, |e| e);
        }
        message
    }

    // ---- Gate ----

    /// Close the gate if the required field is unset, and wait for its first
    /// change to open it again.
    pub fn update_submit_gate(&mut self) {
        let field = self.config.required_field.clone();
        if field_is_set(&self.form, &field) || !self.gate.is_open() {
            return;
        }

        let opener = self.listeners.subscribe_once(
            EventTarget::Change {
                field: field.clone(),
            },
            ListenerAction::OpenSubmitGate,
        );
        self.gate.close(opener);
        debug!(form = %self.form.id, field = %field, "submit disabled until required field is set");
        self.trace(TracePhase::GateClosed, |e| e.with_field(&field));
    }

    // ---- Events ----

    /// Change a field the way a user would, then notify change listeners.
    pub fn edit(&mut self, field: &str, value: &str) -> Result<Vec<EventOutcome>, FormError> {
        self.form.set_field(field, value)?;
        self.trace(TracePhase::Edit, |e| e.with_field(field));
        Ok(self.dispatch(PageEvent::Change {
            field: field.to_string(),
        }))
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Vec<EventOutcome> {
        let fired = self.listeners.deliver(&event);
        let mut outcomes = Vec::with_capacity(fired.len());

        for (id, action) in fired {
            match action {
                ListenerAction::OpenSubmitGate => {
                    if self.open_gate(id) {
                        outcomes.push(EventOutcome::GateOpened);
                    }
                }
                ListenerAction::WarnOnUnload => {
                    let mut unload = BeforeUnloadEvent::new();
                    outcomes.push(EventOutcome::UnloadWarning(self.on_unload(&mut unload)));
                }
                ListenerAction::SubmitForm => {
                    if self.can_submit() {
                        outcomes.push(EventOutcome::Submitted(self.submit()));
                    }
                }
            }
        }

        outcomes
    }

    fn open_gate(&mut self, id: ListenerId) -> bool {
        if self.gate.opener() != Some(id) {
            return false;
        }
        let opened = self.gate.open();
        if opened {
            let field = self.gate.required_field().to_string();
            debug!(form = %self.form.id, field = %field, "submit enabled");
            self.trace(TracePhase::GateOpened, |e| e.with_field(&field));
        }
        opened
    }

    /// Unregister every listener. Returns how many were removed.
    pub fn teardown(&mut self) -> usize {
        let removed = self.listeners.clear();
        self.trace(TracePhase::Teardown, |e| e.with_detail(format!("{} listeners", removed)));
        removed
    }

    // ---- Submission ----

    /// Show the in-progress indicator and serialize the form.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        if !self.gate.is_open() {
            return Err(SubmitError::GateClosed {
                field: self.gate.required_field().to_string(),
            });
        }

        self.region.show_pending(&self.config.pending_html);
        let pending = PendingSubmission {
            endpoint: self.config.endpoint.clone(),
            body: serialize_form(&self.form),
        };
        debug!(form = %self.form.id, endpoint = %pending.endpoint, "posting form");
        self.trace(TracePhase::SubmitPending, |e| e);
        Ok(pending)
    }

    /// Render the answer to a pending submission. The snapshot is only
    /// re-captured on success.
    pub fn complete_submit(
        &mut self,
        result: Result<TransportResponse, SubmitError>,
    ) -> Result<TransportResponse, SubmitError> {
        match result {
            Ok(response) => {
                self.region.show_success(&response.body);
                self.snapshot.recapture(&self.form);
                self.next_visible = true;
                info!(form = %self.form.id, status = response.status, "judgment saved");
                self.trace(TracePhase::SubmitSucceeded, |e| e.with_status(response.status));
                Ok(response)
            }
            Err(error) => {
                let html = error
                    .body()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.config.failure_fallback_html.clone());
                self.region.show_failure(&html);
                warn!(form = %self.form.id, "submission failed: {}", error);

                let status = match &error {
                    SubmitError::Server { status, .. } => Some(*status),
                    _ => None,
                };
                let detail = error.to_string();
                self.trace(TracePhase::SubmitFailed, |e| {
                    let e = e.with_detail(&detail);
                    match status {
                        Some(s) => e.with_status(s),
                        None => e,
                    }
                });
                Err(error)
            }
        }
    }

    /// Post the form and render the outcome. Not retried on failure.
    pub fn submit(&mut self) -> Result<TransportResponse, SubmitError> {
        let pending = self.begin_submit()?;
        let result = self.transport.post_form(&pending.endpoint, &pending.body);
        self.complete_submit(result)
    }

    pub fn response_state(&self) -> ResponseState {
        self.region.state()
    }

    fn trace(&mut self, phase: TracePhase, build: impl FnOnce(TraceEvent) -> TraceEvent) {
        if !self.tracer.is_enabled() {
            return;
        }
        let event = TraceEvent::now(&self.form.id, phase, self.region.state())
            .with_dirty(self.compute_dirty());
        self.tracer.record(build(event));
    }
}
