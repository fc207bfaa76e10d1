// CLI binary entry point for tta-tag

mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Config;

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(&config);

    match cli::run(&config) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            tracing::debug!(failed, "some files could not be read");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked from the flags
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
