mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries codec output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pfc=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let alphabet = cli::resolve_alphabet(cli.config.as_deref(), cli.max_prefix, cli.first_symbol)?;

    match cli.command {
        Commands::Compress { input, output } => {
            cli::compress_file(input.as_deref(), output.as_deref(), alphabet)?;
        }
        Commands::Expand { input, output } => {
            cli::expand_file(input.as_deref(), output.as_deref(), alphabet)?;
        }
        Commands::Stats { input, format } => {
            cli::show_stats(input.as_deref(), alphabet, &format)?;
        }
        Commands::Batch {
            operation,
            files,
            out_dir,
        } => {
            cli::run_batch(operation, &files, &out_dir, alphabet)?;
        }
    }

    Ok(())
}
