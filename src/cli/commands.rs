use crate::cli::config::{AppConfig, build_guard_config};
use crate::form::form_model::{Form, parse_assignment};
use crate::form::serialize::serialize_form;
use crate::guard::form_guard::{FormGuard, GuardConfig};
use crate::guard::unload::BeforeUnloadEvent;
use crate::submit::transport::{HttpTransport, SubmitTransport};
use crate::trace::logger::TraceLogger;

// ============================================================================
// check subcommand
// ============================================================================

/// Apply edits without submitting. Prints the guard's view of the form.
pub fn cmd_check(
    form_path: &str,
    edits: &[String],
    config: &AppConfig,
    trace_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = load_form(form_path)?;
    let guard_config = build_guard_config(config, None);
    let mut guard = open_guard(form, guard_config, HttpTransport::new(), trace_file, config);

    apply_edits(&mut guard, edits)?;
    print!("{}", format_check_report(&mut guard));
    guard.teardown();
    Ok(())
}

// ============================================================================
// submit subcommand
// ============================================================================

/// Apply edits and post the form. Returns whether the save succeeded.
pub fn cmd_submit(
    form_path: &str,
    edits: &[String],
    endpoint: Option<&str>,
    config: &AppConfig,
    trace_file: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let form = load_form(form_path)?;
    let guard_config = build_guard_config(config, endpoint);
    let mut guard = open_guard(form, guard_config, HttpTransport::new(), trace_file, config);

    apply_edits(&mut guard, edits)?;
    let saved = run_submit(&mut guard);
    guard.teardown();
    Ok(saved)
}

/// Submit once and print the rendered response region.
pub fn run_submit<T: SubmitTransport>(guard: &mut FormGuard<T>) -> bool {
    let result = guard.submit();
    let region = guard.response();

    match &result {
        Ok(_) => {
            println!("[{:?}] {}", region.state(), region.html());
            if guard.next_visible() {
                println!("Next judgment available.");
            }
        }
        Err(e) if region.is_visible() => {
            println!("[{:?}] {}", region.state(), region.html());
            eprintln!("Submission failed: {}", e);
        }
        Err(e) => eprintln!("Submission not sent: {}", e),
    }

    result.is_ok()
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a form definition from YAML.
pub fn load_form(path: &str) -> Result<Form, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let form: Form = serde_yaml::from_str(&content)?;
    Ok(form)
}

/// Apply `NAME=VALUE` edits in order, as change events.
pub fn apply_edits<T: SubmitTransport>(
    guard: &mut FormGuard<T>,
    edits: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    for raw in edits {
        let (name, value) = parse_assignment(raw)?;
        guard.edit(&name, &value)?;
    }
    Ok(())
}

/// Human-readable summary of gate status, dirty fields and the request body.
pub fn format_check_report<T: SubmitTransport>(guard: &mut FormGuard<T>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Form: {}\n", guard.form().id));

    let gate = if guard.can_submit() {
        "enabled".to_string()
    } else {
        format!("disabled (set '{}' first)", guard.gate().required_field())
    };
    out.push_str(&format!("Submit: {}\n", gate));

    let dirty = guard.dirty_fields();
    if dirty.is_empty() {
        out.push_str("No unsaved changes\n");
    } else {
        out.push_str(&format!("Unsaved changes in {} field(s):\n", dirty.len()));
        for key in &dirty {
            out.push_str(&format!("  - {}\n", key));
        }
    }

    let mut event = BeforeUnloadEvent::new();
    if let Some(message) = guard.on_unload(&mut event) {
        out.push_str(&format!("On leave: {}\n", message));
    }

    out.push_str(&format!("Body: {}\n", serialize_form(guard.form())));
    out
}

fn open_guard<T: SubmitTransport>(
    form: Form,
    guard_config: GuardConfig,
    transport: T,
    trace_file: Option<&str>,
    config: &AppConfig,
) -> FormGuard<T> {
    let tracer = match trace_file.or(config.trace_file.as_deref()) {
        Some(path) => TraceLogger::to_file(path),
        None => TraceLogger::disabled(),
    };
    FormGuard::initialize_traced(form, guard_config, transport, tracer)
}
