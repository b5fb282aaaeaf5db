//! Time-domain addition and subtraction.

use super::common::{load_signal, save_signal};
use clap::Args;
use dualsig_config::Defaults;
use dualsig_core::{BinaryOp, Signal, apply};
use std::path::PathBuf;

#[derive(Args)]
pub struct ArithArgs {
    /// Left operand file
    #[arg(value_name = "LEFT")]
    left: PathBuf,

    /// Right operand: a WAV file or a number
    #[arg(value_name = "RIGHT")]
    right: String,

    /// Output WAV file
    #[arg(short, long)]
    output: PathBuf,

    /// Output bit depth (16, 24 or 32 float)
    #[arg(long, default_value = "32")]
    bits: u16,
}

pub fn run(op: BinaryOp, args: ArithArgs, defaults: &Defaults) -> anyhow::Result<()> {
    let left = load_signal(&args.left, defaults)?;

    // A number stands for a constant mono signal of matching length
    let right = match args.right.parse::<f64>() {
        Ok(value) => Signal::from_mono(vec![value; left.num_samples()], left.sample_rate())?,
        Err(_) => load_signal(&PathBuf::from(&args.right), defaults)?,
    };
    let result = apply(op, &left, &right)?.with_info(defaults.signal_info());

    save_signal(&args.output, &result, args.bits)
}
