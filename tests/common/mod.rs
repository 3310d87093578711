#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use form_guard::{
    Form, FormControl, FormGuard, GuardConfig, SubmitError, SubmitTransport, TransportResponse,
};

pub const ENDPOINT: &str = "http://judge.test/save-judgment";

/// Transport that answers from a script and records every request.
#[derive(Default)]
pub struct FakeTransport {
    replies: RefCell<VecDeque<Result<TransportResponse, SubmitError>>>,
    pub requests: RefCell<Vec<(String, String)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(TransportResponse {
            status: 200,
            body: body.to_string(),
        }));
        self
    }

    pub fn server_error(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(SubmitError::Server {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn network_error(self) -> Self {
        self.replies.borrow_mut().push_back(Err(SubmitError::Network {
            endpoint: ENDPOINT.to_string(),
            message: "connection refused".to_string(),
        }));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_body(&self) -> Option<String> {
        self.requests.borrow().last().map(|(_, body)| body.clone())
    }
}

impl SubmitTransport for FakeTransport {
    fn post_form(&self, endpoint: &str, body: &str) -> Result<TransportResponse, SubmitError> {
        self.requests
            .borrow_mut()
            .push((endpoint.to_string(), body.to_string()));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("FakeTransport has no scripted reply"))
    }
}

pub fn radio(name: &str, value: &str, checked: bool) -> FormControl {
    FormControl::Radio {
        name: name.into(),
        value: value.into(),
        checked,
    }
}

pub fn textarea(name: &str, value: &str) -> FormControl {
    FormControl::Textarea {
        name: name.into(),
        value: value.into(),
    }
}

pub fn hidden(name: &str, value: &str) -> FormControl {
    FormControl::Hidden {
        name: name.into(),
        value: value.into(),
    }
}

/// The judgment form: query/report ids, a relevance radio group `j` and an
/// explanation textarea.
pub fn judgment_form(checked: Option<&str>, explanation: &str) -> Form {
    let mut controls = vec![hidden("qid", "q7"), hidden("rid", "r-1024")];
    for value in ["2", "1", "0"] {
        controls.push(radio("j", value, checked == Some(value)));
    }
    controls.push(textarea("explanation", explanation));
    Form::new("judgment", controls)
}

pub fn config() -> GuardConfig {
    GuardConfig {
        endpoint: ENDPOINT.to_string(),
        ..GuardConfig::default()
    }
}

pub fn guard(form: Form, transport: FakeTransport) -> FormGuard<FakeTransport> {
    FormGuard::initialize(form, config(), transport)
}
