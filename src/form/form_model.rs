use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single form control, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormControl {
    /// One option of a radio group. Options sharing a `name` form the group.
    Radio {
        name: String,
        value: String,
        #[serde(default)]
        checked: bool,
    },

    /// Free-text area
    Textarea {
        #[serde(default)]
        name: String,
        #[serde(default)]
        value: String,
    },

    /// Single-line text input (serialized, not tracked)
    Text {
        name: String,
        #[serde(default)]
        value: String,
    },

    /// Hidden input such as a query or report identifier (serialized, not tracked)
    Hidden {
        name: String,
        #[serde(default)]
        value: String,
    },
}

impl FormControl {
    pub fn name(&self) -> &str {
        match self {
            FormControl::Radio { name, .. }
            | FormControl::Textarea { name, .. }
            | FormControl::Text { name, .. }
            | FormControl::Hidden { name, .. } => name,
        }
    }
}

/// Identity of a field whose value is watched for unsaved changes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    RadioGroup(String),
    /// Textarea name plus its position among textareas sharing that name
    Textarea(String, usize),
}

impl FieldKey {
    /// Key of the first (usually only) textarea called `name`.
    pub fn textarea(name: &str) -> Self {
        FieldKey::Textarea(name.to_string(), 0)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::RadioGroup(name) => write!(f, "radio:{}", name),
            FieldKey::Textarea(name, 0) => write!(f, "textarea:{}", name),
            FieldKey::Textarea(name, nth) => write!(f, "textarea:{}[{}]", name, nth),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no field named '{0}' in form")]
    UnknownField(String),

    #[error("radio group '{group}' has no option with value '{value}'")]
    UnknownOption { group: String, value: String },

    #[error("expected NAME=VALUE, got '{0}'")]
    MalformedAssignment(String),
}

/// The judgment form as the page presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    #[serde(default)]
    pub controls: Vec<FormControl>,
}

impl Form {
    pub fn new(id: &str, controls: Vec<FormControl>) -> Self {
        Self {
            id: id.to_string(),
            controls,
        }
    }

    /// Index of the option a browser treats as checked: the last one marked
    /// `checked`, since checking an option unchecks the ones before it.
    pub fn checked_radio_index(&self, group: &str) -> Option<usize> {
        self.controls.iter().rposition(|c| {
            matches!(c, FormControl::Radio { name, checked: true, .. } if name == group)
        })
    }

    /// Value of the checked option in a radio group, if any option is checked.
    pub fn radio_value(&self, group: &str) -> Option<&str> {
        match self.controls.get(self.checked_radio_index(group)?) {
            Some(FormControl::Radio { value, .. }) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn has_radio_group(&self, group: &str) -> bool {
        self.controls
            .iter()
            .any(|c| matches!(c, FormControl::Radio { name, .. } if name == group))
    }

    /// Current value of every tracked field: one entry per radio group (the
    /// checked value, or `""`) and one per textarea, including textareas that
    /// share a name.
    pub fn tracked_values(&self) -> BTreeMap<FieldKey, String> {
        let mut values = BTreeMap::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for (index, control) in self.controls.iter().enumerate() {
            match control {
                FormControl::Radio { name, .. } => {
                    values
                        .entry(FieldKey::RadioGroup(name.clone()))
                        .or_insert_with(|| self.radio_value(name).unwrap_or("").to_string());
                }
                FormControl::Textarea { name, value } => {
                    let key = if name.is_empty() {
                        FieldKey::Textarea(format!("#{}", index), 0)
                    } else {
                        let nth = seen.entry(name.as_str()).or_insert(0);
                        let key = FieldKey::Textarea(name.clone(), *nth);
                        *nth += 1;
                        key
                    };
                    values.insert(key, value.clone());
                }
                FormControl::Text { .. } | FormControl::Hidden { .. } => {}
            }
        }

        values
    }

    /// Check `option` in radio group `group`, unchecking its siblings.
    pub fn select_radio(&mut self, group: &str, option: &str) -> Result<(), FormError> {
        if !self.has_radio_group(group) {
            return Err(FormError::UnknownField(group.to_string()));
        }

        let exists = self.controls.iter().any(|c| {
            matches!(c, FormControl::Radio { name, value, .. } if name == group && value == option)
        });
        if !exists {
            return Err(FormError::UnknownOption {
                group: group.to_string(),
                value: option.to_string(),
            });
        }

        for control in self.controls.iter_mut() {
            if let FormControl::Radio {
                name,
                value,
                checked,
            } = control
            {
                if name == group {
                    *checked = value == option;
                }
            }
        }
        Ok(())
    }

    /// Set the value of a named radio group, textarea, text or hidden input.
    pub fn set_field(&mut self, field: &str, new_value: &str) -> Result<(), FormError> {
        if self.has_radio_group(field) {
            return self.select_radio(field, new_value);
        }

        for control in self.controls.iter_mut() {
            match control {
                FormControl::Textarea { name, value }
                | FormControl::Text { name, value }
                | FormControl::Hidden { name, value }
                    if name == field =>
                {
                    *value = new_value.to_string();
                    return Ok(());
                }
                _ => {}
            }
        }

        Err(FormError::UnknownField(field.to_string()))
    }
}

/// Parse a `NAME=VALUE` assignment as given on the command line.
pub fn parse_assignment(raw: &str) -> Result<(String, String), FormError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(FormError::MalformedAssignment(raw.to_string())),
    }
}
