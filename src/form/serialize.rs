use crate::form::form_model::{Form, FormControl};

/// Successful controls as `(name, value)` pairs, in document order.
///
/// Only the effective checked option of a radio group contributes, and
/// unnamed controls are skipped. Line breaks in values are normalised to CRLF
/// the way browsers submit them.
pub fn form_pairs(form: &Form) -> Vec<(String, String)> {
    form.controls
        .iter()
        .enumerate()
        .filter_map(|(index, control)| {
            let value = match control {
                FormControl::Radio { name, value, .. } => {
                    if form.checked_radio_index(name) != Some(index) {
                        return None;
                    }
                    value
                }
                FormControl::Textarea { value, .. }
                | FormControl::Text { value, .. }
                | FormControl::Hidden { value, .. } => value,
            };
            let name = control.name();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), normalize_line_breaks(value)))
        })
        .collect()
}

/// `application/x-www-form-urlencoded` body for the form.
pub fn serialize_form(form: &Form) -> String {
    form_pairs(form)
        .iter()
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

fn normalize_line_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', "\r\n")
}
