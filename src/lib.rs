pub mod cli;
pub mod event;
pub mod form;
pub mod guard;
pub mod submit;
pub mod trace;

pub use form::form_model::{FieldKey, Form, FormControl, FormError};
pub use guard::form_guard::{EventOutcome, FormGuard, GuardConfig, PendingSubmission};
pub use guard::unload::BeforeUnloadEvent;
pub use submit::{
    error::SubmitError,
    response::{ResponseRegion, ResponseState},
    transport::{HttpTransport, SubmitTransport, TransportResponse},
};
