//! Transfer function measurement by spectral division.

use super::common::{load_signal, save_signal};
use anyhow::Context;
use clap::Args;
use dualsig_config::Defaults;
use dualsig_core::{divide, export::export_frd, magnitude_at, smoothed_magnitude_at};
use std::path::PathBuf;

#[derive(Args)]
pub struct DivideArgs {
    /// Numerator file, usually the recorded response
    #[arg(value_name = "NUMERATOR")]
    numerator: PathBuf,

    /// Denominator file, usually the excitation
    #[arg(value_name = "DENOMINATOR")]
    denominator: PathBuf,

    /// Output WAV file for the time-domain result (impulse response)
    #[arg(short, long)]
    output: PathBuf,

    /// Output bit depth (16, 24 or 32 float)
    #[arg(long, default_value = "32")]
    bits: u16,

    /// Also export the magnitude/phase response as an FRD file
    #[arg(long, value_name = "FILE")]
    frd: Option<PathBuf>,

    /// Result channel used for the FRD export and the band report
    #[arg(long, default_value = "0")]
    channel: usize,

    /// Smooth the band report over this many bins
    #[arg(long, value_name = "BINS")]
    smooth: Option<usize>,
}

pub fn run(args: DivideArgs, defaults: &Defaults) -> anyhow::Result<()> {
    let numerator = load_signal(&args.numerator, defaults)?;
    let denominator = load_signal(&args.denominator, defaults)?;

    let h = divide(&numerator, &denominator)
        .context("dividing spectra")?
        .with_info(defaults.signal_info());
    println!(
        "Transfer function: {} channel(s), {} bins",
        h.num_channels(),
        h.num_samples()
    );

    let info = h.info();
    let edges = [info.freq_min, info.freq_max];
    if let Some(window) = args.smooth {
        println!("  (smoothed over {window} bins)");
    }
    for freq in edges {
        let db = match args.smooth {
            Some(window) => smoothed_magnitude_at(&h, args.channel, freq, window)?,
            None => magnitude_at(&h, args.channel, freq)?,
        };
        println!("  |H({freq} Hz)| = {db:.2} dB");
    }

    save_signal(&args.output, &h, args.bits)?;

    if let Some(frd) = &args.frd {
        export_frd(&h, args.channel, frd)
            .with_context(|| format!("exporting {}", frd.display()))?;
        println!("FRD written to {}", frd.display());
    }

    Ok(())
}
