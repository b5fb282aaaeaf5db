//! Text export of signals for external measurement and plotting tools.
//!
//! - FRD format (frequency response data, compatible with REW)
//! - CSV format for the time-domain samples

use crate::Signal;
use crate::fft::{magnitude_db, phase_rad};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Export one channel's spectrum to FRD format (REW compatible).
///
/// FRD (Frequency Response Data) is a simple text format:
/// - One bin per line, DC up to Nyquist
/// - Three space-separated values: frequency_hz magnitude_db phase_deg
///
/// # Example
///
/// ```rust,ignore
/// use dualsig_core::export::export_frd;
///
/// let h = (&response / &excitation)?;
/// export_frd(&h, 0, "response.frd")?;
/// ```
pub fn export_frd(signal: &Signal, channel: usize, path: impl AsRef<Path>) -> std::io::Result<()> {
    let spectrum = signal
        .freq_channel(channel)
        .map_err(std::io::Error::other)?
        .to_vec();
    let bins = signal.num_samples() / 2 + 1;
    let magnitude = magnitude_db(&spectrum[..bins]);
    let phase = phase_rad(&spectrum[..bins]);
    let freqs = signal.freq_axis();

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "* Frequency Response Data exported by dualsig")?;
    writeln!(file, "* {}", signal.info().comment)?;

    for i in 0..bins {
        writeln!(
            file,
            "{:.6} {:.6} {:.6}",
            freqs[i],
            magnitude[i],
            phase[i].to_degrees()
        )?;
    }

    Ok(())
}

/// One line of an FRD file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrdPoint {
    /// Frequency in Hz
    pub frequency_hz: f64,
    /// Magnitude in dB
    pub magnitude_db: f64,
    /// Phase in degrees
    pub phase_deg: f64,
}

/// Read the points of an FRD file.
///
/// Comment lines (`*` or `#`) and malformed lines are skipped.
pub fn import_frd(path: impl AsRef<Path>) -> std::io::Result<Vec<FrdPoint>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut points = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with('*') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 3
            && let (Ok(frequency_hz), Ok(magnitude_db), Ok(phase_deg)) = (
                parts[0].parse::<f64>(),
                parts[1].parse::<f64>(),
                parts[2].parse::<f64>(),
            )
        {
            points.push(FrdPoint {
                frequency_hz,
                magnitude_db,
                phase_deg,
            });
        }
    }

    Ok(points)
}

/// Export time samples to CSV.
///
/// First column is the time axis in seconds, then one column per channel.
pub fn export_csv(signal: &Signal, path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    let samples = signal.time_columns();

    write!(file, "time_s")?;
    for channel in 0..signal.num_channels() {
        write!(file, ",ch{}", channel)?;
    }
    writeln!(file)?;

    for (t, row) in signal.time_axis().iter().zip(samples.rows()) {
        write!(file, "{:.9}", t)?;
        for value in row {
            write!(file, ",{:.9}", value)?;
        }
        writeln!(file)?;
    }

    Ok(())
}
