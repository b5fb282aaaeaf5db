//! WAV file reading and writing.

use crate::{Error, Result};
use dualsig_core::Signal;
use hound::{SampleFormat, WavReader, WavWriter};
use ndarray::{Array1, Array2};
use std::io::Read;
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format: spec.sample_format.into(),
    })
}

/// Read a WAV file into a time-domain signal.
///
/// Every channel is kept. A mono file becomes a rank-1 signal, a file with
/// `N` channels a rank-2 signal of shape `[frames, N]`. Integer PCM is scaled
/// to `[-1, 1)`.
///
/// # Example
/// ```ignore
/// let signal = read_wav("input.wav")?;
/// println!("Loaded {} samples at {} Hz", signal.num_samples(), signal.sample_rate());
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<Signal> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved = read_interleaved(reader)?;
    let frames = interleaved.len() / channels;

    tracing::debug!(
        path = %path.display(),
        channels,
        frames,
        sample_rate = spec.sample_rate,
        "read wav"
    );

    let signal = if channels == 1 {
        Signal::from_time(Array1::from_vec(interleaved), spec.sample_rate)?
    } else {
        // A trailing partial frame is dropped
        let samples =
            Array2::from_shape_fn((frames, channels), |(i, c)| interleaved[i * channels + c]);
        Signal::from_time(samples, spec.sample_rate)?
    };
    Ok(signal)
}

fn read_interleaved<R: Read>(reader: WavReader<R>) -> Result<Vec<f64>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

fn int_scale(bits_per_sample: u16) -> f64 {
    f64::from(1u32 << (bits_per_sample - 1))
}

/// Write a signal's time samples to a WAV file.
///
/// Channels are interleaved frame by frame. A `bits_per_sample` of 32 writes
/// IEEE float; 16 and 24 write integer PCM, clamping samples to the
/// representable range.
///
/// # Example
/// ```ignore
/// let silence = Signal::from_mono(vec![0.0; 48000], 48000)?;
/// write_wav("output.wav", &silence, 16)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, signal: &Signal, bits_per_sample: u16) -> Result<()> {
    let sample_format = match bits_per_sample {
        32 => SampleFormat::Float,
        16 | 24 => SampleFormat::Int,
        other => return Err(Error::UnsupportedBitDepth(other)),
    };
    let channels = u16::try_from(signal.num_channels())
        .map_err(|_| Error::TooManyChannels(signal.num_channels()))?;

    let path = path.as_ref();
    let hound_spec = hound::WavSpec {
        channels,
        sample_rate: signal.sample_rate(),
        bits_per_sample,
        sample_format,
    };
    let mut writer = WavWriter::create(path, hound_spec)?;

    // Row-major iteration over [frames, channels] is interleaved order
    let samples = signal.time_columns();
    if sample_format == SampleFormat::Float {
        for &sample in samples {
            writer.write_sample(sample as f32)?;
        }
    } else {
        let max_val = int_scale(bits_per_sample);
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        channels,
        frames = signal.num_samples(),
        bits_per_sample,
        "wrote wav"
    );
    Ok(())
}
