//! CLI entrypoint for `archive-config`.

use archive_config_cli::cli::Args;
use archive_config_cli::error::CliError;
use archive_config_cli::{output, run};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    init_tracing(args.is_verbose);
    let json = run(&args)?;
    output::write(args.output.as_deref(), &json)
}

/// Logs to standard error; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(is_verbose: bool) {
    let fallback = if is_verbose {
        "archive_config=debug,archive_config_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
