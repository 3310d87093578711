use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::submit::error::SubmitError;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// A completed request that the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Delivers a serialized form to the save endpoint.
pub trait SubmitTransport {
    fn post_form(&self, endpoint: &str, body: &str) -> Result<TransportResponse, SubmitError>;
}

/// Blocking reqwest transport. No timeout is configured beyond the client's
/// own default.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl SubmitTransport for HttpTransport {
    fn post_form(&self, endpoint: &str, body: &str) -> Result<TransportResponse, SubmitError> {
        let network = |e: reqwest::Error| SubmitError::Network {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.to_string())
            .send()
            .map_err(network)?;

        let status = response.status();
        let text = response.text().map_err(network)?;

        if is_success(status) {
            Ok(TransportResponse {
                status: status.as_u16(),
                body: text,
            })
        } else {
            Err(SubmitError::Server {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

/// 2xx, plus 304 Not Modified, count as a completed save.
pub fn is_success(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::NOT_MODIFIED
}
