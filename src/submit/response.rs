use serde::Serialize;

pub const HIDDEN_CLASS: &str = "hidden";
pub const PENDING_CLASS: &str = "mdl-color--yellow-100";
pub const SUCCESS_CLASS: &str = "mdl-color--green-100";
pub const FAILURE_CLASS: &str = "mdl-color--red-100";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseState {
    Idle,
    Pending,
    Success,
    Failure,
}

impl ResponseState {
    /// Colour class applied to the response region in this state.
    pub fn color_class(&self) -> Option<&'static str> {
        match self {
            ResponseState::Idle => None,
            ResponseState::Pending => Some(PENDING_CLASS),
            ResponseState::Success => Some(SUCCESS_CLASS),
            ResponseState::Failure => Some(FAILURE_CLASS),
        }
    }
}

/// The area the submission outcome is rendered into. Hidden and empty until
/// the first submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRegion {
    state: ResponseState,
    html: String,
}

impl Default for ResponseRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseRegion {
    pub fn new() -> Self {
        Self {
            state: ResponseState::Idle,
            html: String::new(),
        }
    }

    pub fn state(&self) -> ResponseState {
        self.state
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_visible(&self) -> bool {
        self.state != ResponseState::Idle
    }

    /// Classes on the region: exactly one colour class once shown, `hidden` before.
    pub fn css_classes(&self) -> Vec<&'static str> {
        match self.state.color_class() {
            Some(class) => vec![class],
            None => vec![HIDDEN_CLASS],
        }
    }

    pub fn show_pending(&mut self, indicator_html: &str) {
        self.render(ResponseState::Pending, indicator_html);
    }

    pub fn show_success(&mut self, body: &str) {
        self.render(ResponseState::Success, body);
    }

    pub fn show_failure(&mut self, body: &str) {
        self.render(ResponseState::Failure, body);
    }

    fn render(&mut self, state: ResponseState, html: &str) {
        self.state = state;
        self.html = html.to_string();
    }
}
