use anyhow::{Context, Result};
use clap::Parser;
use debtscore::cli::{AnalyzeArgs, Cli, Commands};
use debtscore::commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Init { force } => {
            commands::init_config(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` flags pick the level
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn configure_thread_pool(jobs: usize) -> Result<()> {
    if jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure thread pool")?;
    }
    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<ExitCode> {
    configure_thread_pool(args.jobs)?;

    let config = args.to_config()?;
    let report = commands::handle_analyze(config, args.output_options())?;

    match args.fail_under {
        Some(threshold) if report.score.overall < threshold => {
            eprintln!(
                "Overall score {:.2} is below the required {:.2}",
                report.score.overall, threshold
            );
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
