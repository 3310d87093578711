mod common;

use clap::Parser;
use common::{FakeTransport, guard, judgment_form};
use form_guard::cli::commands::{apply_edits, format_check_report, load_form, run_submit};
use form_guard::cli::config::{AppConfig, Cli, Commands, build_guard_config, load_config};
use form_guard::guard::form_guard::{DEFAULT_ENDPOINT, DEFAULT_UNLOAD_MESSAGE};
use form_guard::ResponseState;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_check_minimal() {
    let cli = Cli::parse_from(["form-guard", "check", "--form", "judgment.yaml"]);
    match cli.command {
        Commands::Check { form, edits } => {
            assert_eq!(form, "judgment.yaml");
            assert!(edits.is_empty());
        }
        _ => panic!("Expected Check command"),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
    assert!(cli.trace_file.is_none());
}

#[test]
fn cli_parse_submit_all_args() {
    let cli = Cli::parse_from([
        "form-guard",
        "-vv",
        "--config",
        "custom.yaml",
        "--trace-file",
        "trace.jsonl",
        "submit",
        "--form",
        "judgment.yaml",
        "--set",
        "j=2",
        "--set",
        "explanation=clearly relevant",
        "--endpoint",
        "http://judge.test/save-judgment",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
    assert_eq!(cli.trace_file.as_deref(), Some("trace.jsonl"));
    match cli.command {
        Commands::Submit {
            form,
            edits,
            endpoint,
        } => {
            assert_eq!(form, "judgment.yaml");
            assert_eq!(edits, vec!["j=2", "explanation=clearly relevant"]);
            assert_eq!(endpoint.as_deref(), Some("http://judge.test/save-judgment"));
        }
        _ => panic!("Expected Submit command"),
    }
}

#[test]
fn cli_requires_form() {
    assert!(Cli::try_parse_from(["form-guard", "submit"]).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn load_config_missing_file_gives_defaults() {
    let config = load_config(Some("/nonexistent/form-guard.yaml"));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.required_field, "j");
    assert_eq!(config.unload_message, DEFAULT_UNLOAD_MESSAGE);
}

#[test]
fn load_config_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form-guard.yaml");
    std::fs::write(
        &path,
        "endpoint: http://judge.test/save\nrequired_field: relevance\ntrace_file: t.jsonl\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.endpoint, "http://judge.test/save");
    assert_eq!(config.required_field, "relevance");
    assert_eq!(config.trace_file.as_deref(), Some("t.jsonl"));
    assert_eq!(config.unload_message, DEFAULT_UNLOAD_MESSAGE);
}

#[test]
fn load_config_malformed_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form-guard.yaml");
    std::fs::write(&path, "endpoint: [unclosed").unwrap();

    assert_eq!(load_config(path.to_str()), AppConfig::default());
}

#[test]
fn endpoint_flag_overrides_config() {
    let config = AppConfig {
        endpoint: "http://from-config/save".into(),
        ..AppConfig::default()
    };
    assert_eq!(build_guard_config(&config, None).endpoint, "http://from-config/save");
    assert_eq!(
        build_guard_config(&config, Some("http://from-flag/save")).endpoint,
        "http://from-flag/save"
    );
}

// ============================================================================
// Command helpers
// ============================================================================

#[test]
fn load_form_reads_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("judgment.yaml");
    let yaml = serde_yaml::to_string(&judgment_form(Some("1"), "abc")).unwrap();
    std::fs::write(&path, yaml).unwrap();

    let form = load_form(path.to_str().unwrap()).unwrap();
    assert_eq!(form, judgment_form(Some("1"), "abc"));
}

#[test]
fn load_form_missing_file_is_error() {
    assert!(load_form("/nonexistent/judgment.yaml").is_err());
}

#[test]
fn apply_edits_runs_in_order_and_opens_gate() {
    let mut g = guard(judgment_form(None, ""), FakeTransport::new());
    apply_edits(&mut g, &["j=2".into(), "explanation=first".into(), "explanation=second".into()])
        .unwrap();

    assert!(g.can_submit());
    assert_eq!(g.form().radio_value("j"), Some("2"));
    assert!(g.compute_dirty());
}

#[test]
fn apply_edits_stops_at_malformed_assignment() {
    let mut g = guard(judgment_form(None, ""), FakeTransport::new());
    let result = apply_edits(&mut g, &["explanation".into(), "j=2".into()]);

    assert!(result.is_err());
    assert!(!g.can_submit(), "later edits not applied");
}

#[test]
fn check_report_lists_gate_dirty_fields_and_body() {
    let mut g = guard(judgment_form(None, "abc"), FakeTransport::new());
    g.edit("explanation", "abcd").unwrap();

    let report = format_check_report(&mut g);
    assert!(report.contains("Form: judgment"));
    assert!(report.contains("Submit: disabled (set 'j' first)"));
    assert!(report.contains("Unsaved changes in 1 field(s):"));
    assert!(report.contains("  - textarea:explanation"));
    assert!(report.contains(&format!("On leave: {}", DEFAULT_UNLOAD_MESSAGE)));
    assert!(report.contains("Body: qid=q7&rid=r-1024&explanation=abcd"));
}

#[test]
fn check_report_clean_form() {
    let mut g = guard(judgment_form(Some("0"), ""), FakeTransport::new());
    let report = format_check_report(&mut g);

    assert!(report.contains("Submit: enabled"));
    assert!(report.contains("No unsaved changes"));
    assert!(!report.contains("On leave"));
}

#[test]
fn run_submit_reports_outcome() {
    let mut ok = guard(judgment_form(Some("2"), ""), FakeTransport::new().ok("<b>Saved</b>"));
    assert!(run_submit(&mut ok));
    assert_eq!(ok.response_state(), ResponseState::Success);

    let mut failed = guard(
        judgment_form(Some("2"), ""),
        FakeTransport::new().server_error(500, "error: invalid"),
    );
    assert!(!run_submit(&mut failed));
    assert_eq!(failed.response_state(), ResponseState::Failure);

    let mut gated = guard(judgment_form(None, ""), FakeTransport::new());
    assert!(!run_submit(&mut gated));
    assert_eq!(gated.response_state(), ResponseState::Idle);
}
