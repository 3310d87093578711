use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::guard::form_guard::{
    DEFAULT_ENDPOINT, DEFAULT_FAILURE_FALLBACK_HTML, DEFAULT_PENDING_HTML, DEFAULT_REQUIRED_FIELD,
    DEFAULT_UNLOAD_MESSAGE, GuardConfig,
};

pub const DEFAULT_CONFIG_PATH: &str = "form-guard.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-guard",
    version,
    about = "Track unsaved judgment form edits and submit them to the save endpoint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-guard.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append a JSONL trace of guard events to this file
    #[arg(long, global = true)]
    pub trace_file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply edits to a form and report dirty fields and gate status
    Check {
        /// Path to the form YAML file
        #[arg(long)]
        form: String,

        /// Field edit, NAME=VALUE (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        edits: Vec<String>,
    },

    /// Apply edits to a form and post it to the save endpoint
    Submit {
        /// Path to the form YAML file
        #[arg(long)]
        form: String,

        /// Field edit, NAME=VALUE (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        edits: Vec<String>,

        /// Save endpoint URL (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-guard.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_required_field")]
    pub required_field: String,

    #[serde(default = "default_unload_message")]
    pub unload_message: String,

    #[serde(default = "default_pending_html")]
    pub pending_html: String,

    #[serde(default = "default_failure_fallback_html")]
    pub failure_fallback_html: String,

    #[serde(default)]
    pub trace_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            required_field: default_required_field(),
            unload_message: default_unload_message(),
            pending_html: default_pending_html(),
            failure_fallback_html: default_failure_fallback_html(),
            trace_file: None,
        }
    }
}

// Serde default helpers
fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }
fn default_required_field() -> String { DEFAULT_REQUIRED_FIELD.to_string() }
fn default_unload_message() -> String { DEFAULT_UNLOAD_MESSAGE.to_string() }
fn default_pending_html() -> String { DEFAULT_PENDING_HTML.to_string() }
fn default_failure_fallback_html() -> String { DEFAULT_FAILURE_FALLBACK_HTML.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = config_path, "malformed config, using defaults: {}", e);
                AppConfig::default()
            }
        },
        Err(_) => {
            tracing::debug!(path = config_path, "no config file, using defaults");
            AppConfig::default()
        }
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Build a GuardConfig from resolved CLI/config values.
pub fn build_guard_config(config: &AppConfig, endpoint: Option<&str>) -> GuardConfig {
    GuardConfig {
        endpoint: endpoint.unwrap_or(&config.endpoint).to_string(),
        required_field: config.required_field.clone(),
        unload_message: config.unload_message.clone(),
        pending_html: config.pending_html.clone(),
        failure_fallback_html: config.failure_fallback_html.clone(),
    }
}
