use clap::Parser;
use form_guard::cli::commands::{cmd_check, cmd_submit};
use form_guard::cli::config::{Cli, Commands, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());
    // CLI > config > defaults
    let trace_file = cli.trace_file.as_deref();

    match cli.command {
        Commands::Check { form, edits } => {
            cmd_check(&form, &edits, &config, trace_file)?;
        }
        Commands::Submit {
            form,
            edits,
            endpoint,
        } => {
            let saved = cmd_submit(&form, &edits, endpoint.as_deref(), &config, trace_file)?;
            if !saved {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise -v raises the level from warn.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
