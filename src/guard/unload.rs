/// The navigation-away event handed to the unload interceptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeforeUnloadEvent {
    /// Confirmation text requested from the browser. Some browsers show a
    /// generic prompt instead of this text.
    pub return_value: Option<String>,
}

impl BeforeUnloadEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmation_requested(&self) -> bool {
        self.return_value.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct UnloadGuard {
    message: String,
}

impl UnloadGuard {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Ask for confirmation when there are unsaved changes.
    pub fn intercept(&self, dirty: bool, event: &mut BeforeUnloadEvent) -> Option<String> {
        if !dirty {
            return None;
        }
        event.return_value = Some(self.message.clone());
        Some(self.message.clone())
    }
}
