//! Display-side views of a signal's spectrum

use crate::error::Result;
use crate::fft::magnitude_db;
use crate::signal::Signal;

/// Amplitude spectrum of one channel in dB, `20·log10(|2/N · X[k]|)`.
///
/// The `2/N` factor maps a full-scale sinusoid to roughly 0 dB. Bins are
/// two-sided; the caller decides whether to show the mirrored half.
pub fn scaled_magnitude_db(signal: &Signal, channel: usize) -> Result<Vec<f64>> {
    let scale = 2.0 / signal.num_samples() as f64;
    Ok(signal
        .freq_channel(channel)?
        .iter()
        .map(|c| 20.0 * (c.norm() * scale).max(1e-12).log10())
        .collect())
}

/// Smooth data with a centred moving average.
///
/// Even window sizes are widened by one. Near the edges the window shrinks
/// to the samples available.
pub fn smooth(data: &[f64], window_size: usize) -> Vec<f64> {
    if data.is_empty() || window_size == 0 {
        return data.to_vec();
    }

    let half_window = window_size / 2;
    let mut smoothed = Vec::with_capacity(data.len());

    for i in 0..data.len() {
        let start = i.saturating_sub(half_window);
        let end = (i + half_window + 1).min(data.len());
        let sum: f64 = data[start..end].iter().sum();
        smoothed.push(sum / (end - start) as f64);
    }

    smoothed
}

/// Magnitude in dB of one channel at an arbitrary frequency.
///
/// Linearly interpolated between bins of the one-sided spectrum (DC up to
/// Nyquist). Frequencies outside that range clamp to the end bins.
pub fn magnitude_at(signal: &Signal, channel: usize, freq_hz: f64) -> Result<f64> {
    let db = magnitude_db(&signal.freq_channel(channel)?.to_vec());
    Ok(one_sided_lookup(signal, &db, freq_hz))
}

/// Magnitude spectrum of one channel in dB after smoothing across bins.
///
/// `|X[k]|` is smoothed with [`smooth`] before the conversion to dB, so a
/// narrow notch or peak is spread over `window_size` bins.
pub fn smoothed_magnitude_db(
    signal: &Signal,
    channel: usize,
    window_size: usize,
) -> Result<Vec<f64>> {
    let magnitudes: Vec<f64> = signal
        .freq_channel(channel)?
        .iter()
        .map(|c| c.norm())
        .collect();
    Ok(smooth(&magnitudes, window_size)
        .into_iter()
        .map(|m| 20.0 * m.max(1e-12).log10())
        .collect())
}

/// Like [`magnitude_at`], read from the smoothed spectrum.
pub fn smoothed_magnitude_at(
    signal: &Signal,
    channel: usize,
    freq_hz: f64,
    window_size: usize,
) -> Result<f64> {
    let db = smoothed_magnitude_db(signal, channel, window_size)?;
    Ok(one_sided_lookup(signal, &db, freq_hz))
}

fn one_sided_lookup(signal: &Signal, db: &[f64], freq_hz: f64) -> f64 {
    let freqs = signal.freq_axis().to_vec();
    let bins = signal.num_samples() / 2 + 1;
    interpolate(&freqs[..bins], &db[..bins], freq_hz)
}

/// Linear interpolation helper
fn interpolate(x: &[f64], y: &[f64], target_x: f64) -> f64 {
    if x.is_empty() {
        return 0.0;
    }

    if target_x <= x[0] {
        return y[0];
    }

    for i in 1..x.len() {
        if target_x <= x[i] {
            let t = (target_x - x[i - 1]) / (x[i] - x[i - 1]);
            return y[i - 1] + t * (y[i] - y[i - 1]);
        }
    }

    y[y.len() - 1]
}
