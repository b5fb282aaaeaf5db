//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use dualsig_config::Defaults;
use dualsig_core::Signal;
use dualsig_io::{read_wav, write_wav};
use std::path::Path;

/// Load the measurement defaults.
///
/// An explicit `--config` path must exist. Without one, the user/system
/// defaults file is used when present, otherwise the built-in values.
pub fn load_defaults(config: Option<&Path>) -> anyhow::Result<Defaults> {
    let defaults = match config {
        Some(path) => Defaults::load(path)?,
        None => Defaults::load_or_default()?,
    };
    tracing::debug!(sample_rate = defaults.sample_rate, "effective defaults");
    Ok(defaults)
}

/// Read a WAV file as a signal annotated with the defaults.
///
/// The file's own sample rate always wins over the configured one.
pub fn load_signal(path: &Path, defaults: &Defaults) -> anyhow::Result<Signal> {
    let signal = read_wav(path).with_context(|| format!("reading {}", path.display()))?;
    if signal.sample_rate() != defaults.sample_rate {
        tracing::debug!(
            file_rate = signal.sample_rate(),
            default_rate = defaults.sample_rate,
            "file sample rate differs from defaults"
        );
    }
    Ok(signal.with_info(defaults.signal_info()))
}

/// Write a signal to a WAV file.
pub fn save_signal(path: &Path, signal: &Signal, bits: u16) -> anyhow::Result<()> {
    write_wav(path, signal, bits).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        channels = signal.num_channels(),
        samples = signal.num_samples(),
        "wrote signal"
    );
    Ok(())
}
