//! Channel averaging.

use super::common::{load_signal, save_signal};
use clap::Args;
use dualsig_config::Defaults;
use std::path::PathBuf;

#[derive(Args)]
pub struct MeanArgs {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file (mono)
    #[arg(short, long)]
    output: PathBuf,

    /// Output bit depth (16, 24 or 32 float)
    #[arg(long, default_value = "32")]
    bits: u16,
}

pub fn run(args: MeanArgs, defaults: &Defaults) -> anyhow::Result<()> {
    let signal = load_signal(&args.input, defaults)?;
    let averaged = signal.mean()?;
    println!("Averaged {} channel(s) into 1", signal.num_channels());
    save_signal(&args.output, &averaged, args.bits)
}
