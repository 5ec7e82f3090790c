use std::process::ExitCode;

use clap::Parser;
use habit_app::app::{run, AppConfig, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let config = AppConfig::from_env();
    if let Err(err) = run(&config, cli.command(), &mut std::io::stdout().lock()) {
        tracing::error!(%err, "habit tracker failed");
        eprintln!("habit_tracker: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
