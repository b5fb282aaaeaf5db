//! dualsig CLI - Command-line interface for dual-domain signal measurements.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::common::load_defaults;
use dualsig_core::BinaryOp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dualsig")]
#[command(author, version, about = "Dual-domain signal measurement CLI", long_about = None)]
struct Cli {
    /// Defaults file to use instead of the user/system one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display WAV file information and signal summary
    Info(commands::info::InfoArgs),

    /// Compute a transfer function by frequency-domain division
    Divide(commands::divide::DivideArgs),

    /// Add two signals (or a signal and a constant) in the time domain
    Add(commands::arith::ArithArgs),

    /// Subtract two signals (or a constant) in the time domain
    Sub(commands::arith::ArithArgs),

    /// Average all channels of a file into one
    Mean(commands::mean::MeanArgs),

    /// Show or initialise the measurement defaults
    Defaults(commands::defaults::DefaultsArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Info(args) => commands::info::run(args, &load_defaults(config)?),
        Commands::Divide(args) => commands::divide::run(args, &load_defaults(config)?),
        Commands::Add(args) => commands::arith::run(BinaryOp::Add, args, &load_defaults(config)?),
        Commands::Sub(args) => commands::arith::run(BinaryOp::Sub, args, &load_defaults(config)?),
        Commands::Mean(args) => commands::mean::run(args, &load_defaults(config)?),
        Commands::Defaults(args) => commands::defaults::run(args, config),
    }
}
