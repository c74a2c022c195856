use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use view_secret::cli::Cli;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "VIEW_SECRET_LOG";

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.generate_completions {
        Some(ref shell) => {
            view_secret::cli::commands::completions::execute(shell, &mut io::stdout())
        }
        None => view_secret::cli::commands::view::execute(&cli),
    };

    if let Err(e) = result {
        view_secret::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; stdout carries only decoded output.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
