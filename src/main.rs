//! alias-index CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use alias_index::cli::{Cli, Commands};
use alias_index::commands::{run_build, run_disambig, CommandContext};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// Logs go to stderr so stdout carries only the report.
/// `RUST_LOG` directives are applied on top of the default level.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("alias_index={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> alias_index::Result<String> {
    let ctx = CommandContext::from_cli(cli.format, cli.verbose, cli.progress, cli.workers);

    match &cli.command {
        Commands::Build(args) => run_build(args, &ctx),
        Commands::Disambig(args) => run_disambig(args, &ctx),
    }
}
