use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The request could not be completed (connect, DNS, timeout, body read)
    #[error("request to {endpoint} could not be completed: {message}")]
    Network { endpoint: String, message: String },

    /// The request completed with a non-success status
    #[error("server answered with status {status}")]
    Server { status: u16, body: String },

    /// The submit control is disabled until the required field is set
    #[error("submit is disabled until '{field}' is set")]
    GateClosed { field: String },
}

impl SubmitError {
    /// Response body to show in the response region, if the failure carried one.
    pub fn body(&self) -> Option<&str> {
        match self {
            SubmitError::Server { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}
