use std::collections::BTreeMap;

use crate::form::form_model::{FieldKey, Form};

/// Committed values of every tracked field, as of initialization or the last
/// successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSnapshot {
    values: BTreeMap<FieldKey, String>,
}

impl FieldSnapshot {
    pub fn capture(form: &Form) -> Self {
        Self {
            values: form.tracked_values(),
        }
    }

    /// Replace the committed values with the form's current ones.
    pub fn recapture(&mut self, form: &Form) {
        self.values = form.tracked_values();
    }

    pub fn get(&self, key: &FieldKey) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &BTreeMap<FieldKey, String> {
        &self.values
    }

    /// Tracked fields whose current value differs from the committed one.
    ///
    /// A field missing from the snapshot counts as changed. Snapshot entries
    /// for fields no longer in the form are ignored.
    pub fn dirty_fields(&self, form: &Form) -> Vec<FieldKey> {
        form.tracked_values()
            .into_iter()
            .filter(|(key, current)| self.get(key) != Some(current.as_str()))
            .map(|(key, _)| key)
            .collect()
    }

    pub fn is_dirty(&self, form: &Form) -> bool {
        form.tracked_values()
            .iter()
            .any(|(key, current)| self.get(key) != Some(current.as_str()))
    }
}
