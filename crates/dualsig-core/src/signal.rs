//! Multi-channel signal kept consistent across the time and frequency domains.
//!
//! A [`Signal`] stores both representations at all times. Writing either one
//! recomputes the other in full, together with the sample count, FFT degree,
//! duration and both axis vectors.
//!
//! Buffers are `[samples]` (mono, rank 1) or `[samples, channels]` (rank 2).
//! Internally both shapes are held as `[samples, channels]` columns and the
//! original rank is remembered so the caller gets back what they put in.

use std::fmt;

use ndarray::{Array, Array1, Array2, ArrayD, ArrayView1, ArrayViewD, Axis, Dimension, Ix1, Ix2};
use rustfft::num_complex::Complex64;

use crate::error::{Result, SignalError};
use crate::fft::Fft;

/// Which buffer was last written authoritatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Time samples were set; coefficients were derived from them.
    Time,
    /// Frequency coefficients were set; samples were derived from them.
    Frequency,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Time => f.write_str("time"),
            Domain::Frequency => f.write_str("frequency"),
        }
    }
}

/// Dimensionality of the buffers a signal was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    /// `[samples]`
    Mono,
    /// `[samples, channels]`
    Multi,
}

impl Rank {
    /// Number of array dimensions (1 or 2).
    pub fn ndim(self) -> usize {
        match self {
            Rank::Mono => 1,
            Rank::Multi => 2,
        }
    }
}

/// Descriptive annotations carried alongside the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalInfo {
    /// Lower bound of the band of interest in Hz.
    pub freq_min: f64,
    /// Upper bound of the band of interest in Hz.
    pub freq_max: f64,
    /// Free-text note about the signal or how it was obtained.
    pub comment: String,
}

impl Default for SignalInfo {
    fn default() -> Self {
        Self {
            freq_min: 20.0,
            freq_max: 20000.0,
            comment: "No comments.".to_string(),
        }
    }
}

/// Both representations plus every value derived from them.
///
/// Built complete or not at all, then swapped into the signal with a single
/// assignment.
#[derive(Debug, Clone)]
struct Buffers {
    time: Array2<f64>,
    freq: Array2<Complex64>,
    rank: Rank,
    domain: Domain,
    num_samples: usize,
    fft_degree: f64,
    duration: f64,
    time_axis: Array1<f64>,
    freq_axis: Array1<f64>,
}

impl Buffers {
    fn from_time(samples: ArrayD<f64>, sample_rate: u32) -> Result<Self> {
        let (time, rank) = into_columns(samples)?;
        let freq = Fft::new(time.nrows()).forward_columns(&time);
        Ok(Self::derive(time, freq, rank, Domain::Time, sample_rate))
    }

    fn from_freq(coefficients: ArrayD<Complex64>, sample_rate: u32) -> Result<Self> {
        let (freq, rank) = into_columns(coefficients)?;
        let time = Fft::new(freq.nrows()).inverse_columns(&freq);
        Ok(Self::derive(time, freq, rank, Domain::Frequency, sample_rate))
    }

    fn derive(
        time: Array2<f64>,
        freq: Array2<Complex64>,
        rank: Rank,
        domain: Domain,
        sample_rate: u32,
    ) -> Self {
        let num_samples = time.nrows();
        let rate = f64::from(sample_rate);
        let n = num_samples as f64;

        // [0, duration): the endpoint is excluded
        let time_axis = Array1::from_shape_fn(num_samples, |k| k as f64 / rate);
        let freq_axis = Array1::from_shape_fn(num_samples, |k| k as f64 * rate / n);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            samples = num_samples,
            channels = time.ncols(),
            %domain,
            "signal buffers derived"
        );

        Self {
            time,
            freq,
            rank,
            domain,
            num_samples,
            fft_degree: n.log2(),
            duration: n / rate,
            time_axis,
            freq_axis,
        }
    }
}

/// Validate a rank-1 or rank-2 buffer and reshape it to `[samples, channels]`.
fn into_columns<A>(buffer: ArrayD<A>) -> Result<(Array2<A>, Rank)> {
    let ndim = buffer.ndim();
    let (columns, rank) = match ndim {
        1 => {
            let mono = buffer
                .into_dimensionality::<Ix1>()
                .map_err(|_| SignalError::Dimension { rank: ndim })?;
            (mono.insert_axis(Axis(1)), Rank::Mono)
        }
        2 => {
            let multi = buffer
                .into_dimensionality::<Ix2>()
                .map_err(|_| SignalError::Dimension { rank: ndim })?;
            (multi, Rank::Multi)
        }
        _ => return Err(SignalError::Dimension { rank: ndim }),
    };

    if columns.nrows() == 0 || columns.ncols() == 0 {
        return Err(SignalError::EmptySignal);
    }
    Ok((columns, rank))
}

/// A sampled signal with synchronized time and frequency representations.
///
/// # Example
///
/// ```rust
/// use dualsig_core::{Domain, Signal};
/// use ndarray::array;
///
/// let mut signal = Signal::from_time(array![1.0, 0.0, 0.0, 0.0], 8).unwrap();
/// assert_eq!(signal.num_samples(), 4);
/// assert_eq!(signal.time_axis().to_vec(), vec![0.0, 0.125, 0.25, 0.375]);
///
/// // An impulse has a flat spectrum
/// assert!(signal.freq_coefficients().iter().all(|c| (c.norm() - 1.0).abs() < 1e-12));
///
/// signal.set_time_samples(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(signal.num_channels(), 2);
/// assert_eq!(signal.domain(), Domain::Time);
/// ```
#[derive(Debug, Clone)]
pub struct Signal {
    sample_rate: u32,
    buffers: Buffers,
    info: SignalInfo,
}

impl Signal {
    /// Build a signal from time samples (`[samples]` or `[samples, channels]`).
    pub fn from_time<D: Dimension>(samples: Array<f64, D>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SignalError::InvalidSampleRate);
        }
        Ok(Self {
            sample_rate,
            buffers: Buffers::from_time(samples.into_dyn(), sample_rate)?,
            info: SignalInfo::default(),
        })
    }

    /// Build a signal from frequency coefficients (`[bins]` or `[bins, channels]`).
    pub fn from_freq<D: Dimension>(
        coefficients: Array<Complex64, D>,
        sample_rate: u32,
    ) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SignalError::InvalidSampleRate);
        }
        Ok(Self {
            sample_rate,
            buffers: Buffers::from_freq(coefficients.into_dyn(), sample_rate)?,
            info: SignalInfo::default(),
        })
    }

    /// Build a mono signal from a plain sample vector.
    pub fn from_mono(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        Self::from_time(Array1::from(samples), sample_rate)
    }

    /// Replace the annotations.
    pub fn with_info(mut self, info: SignalInfo) -> Self {
        self.info = info;
        self
    }

    /// Set the band of interest in Hz.
    pub fn with_freq_limits(mut self, freq_min: f64, freq_max: f64) -> Self {
        self.info.freq_min = freq_min;
        self.info.freq_max = freq_max;
        self
    }

    /// Attach a free-text comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.info.comment = comment.into();
        self
    }

    /// Replace the time samples and re-derive everything else.
    ///
    /// On error the signal is left exactly as it was.
    pub fn set_time_samples<D: Dimension>(&mut self, samples: Array<f64, D>) -> Result<()> {
        self.buffers = Buffers::from_time(samples.into_dyn(), self.sample_rate)?;
        Ok(())
    }

    /// Replace the frequency coefficients and re-derive everything else.
    ///
    /// The inverse transform's imaginary part is discarded; a spectrum that
    /// is not conjugate-symmetric loses information here.
    /// On error the signal is left exactly as it was.
    pub fn set_freq_coefficients<D: Dimension>(
        &mut self,
        coefficients: Array<Complex64, D>,
    ) -> Result<()> {
        self.buffers = Buffers::from_freq(coefficients.into_dyn(), self.sample_rate)?;
        Ok(())
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length of the sample axis.
    pub fn num_samples(&self) -> usize {
        self.buffers.num_samples
    }

    /// 1 for mono buffers, otherwise the size of the channel axis.
    pub fn num_channels(&self) -> usize {
        self.buffers.time.ncols()
    }

    /// Rank of the buffers as supplied by the caller.
    pub fn rank(&self) -> Rank {
        self.buffers.rank
    }

    /// Buffer last written authoritatively.
    pub fn domain(&self) -> Domain {
        self.buffers.domain
    }

    /// `log2(num_samples)`, fractional for non power-of-two lengths.
    pub fn fft_degree(&self) -> f64 {
        self.buffers.fft_degree
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.buffers.duration
    }

    /// Sample instants in seconds, `k / sample_rate`.
    pub fn time_axis(&self) -> ArrayView1<'_, f64> {
        self.buffers.time_axis.view()
    }

    /// Bin frequencies in Hz, `k * sample_rate / num_samples`.
    pub fn freq_axis(&self) -> ArrayView1<'_, f64> {
        self.buffers.freq_axis.view()
    }

    /// Time samples in the caller's original shape.
    pub fn time_samples(&self) -> ArrayViewD<'_, f64> {
        match self.buffers.rank {
            Rank::Mono => self.buffers.time.column(0).into_dyn(),
            Rank::Multi => self.buffers.time.view().into_dyn(),
        }
    }

    /// Frequency coefficients in the caller's original shape.
    pub fn freq_coefficients(&self) -> ArrayViewD<'_, Complex64> {
        match self.buffers.rank {
            Rank::Mono => self.buffers.freq.column(0).into_dyn(),
            Rank::Multi => self.buffers.freq.view().into_dyn(),
        }
    }

    /// Time samples as `[samples, channels]` regardless of rank.
    pub fn time_columns(&self) -> &Array2<f64> {
        &self.buffers.time
    }

    /// Frequency coefficients as `[bins, channels]` regardless of rank.
    pub fn freq_columns(&self) -> &Array2<Complex64> {
        &self.buffers.freq
    }

    /// Time samples of one channel.
    pub fn time_channel(&self, index: usize) -> Result<ArrayView1<'_, f64>> {
        self.check_channel(index)?;
        Ok(self.buffers.time.column(index))
    }

    /// Frequency coefficients of one channel.
    pub fn freq_channel(&self, index: usize) -> Result<ArrayView1<'_, Complex64>> {
        self.check_channel(index)?;
        Ok(self.buffers.freq.column(index))
    }

    fn check_channel(&self, index: usize) -> Result<()> {
        let channels = self.num_channels();
        if index >= channels {
            return Err(SignalError::ChannelOutOfRange { index, channels });
        }
        Ok(())
    }

    /// Annotations.
    pub fn info(&self) -> &SignalInfo {
        &self.info
    }

    /// Mutable annotations. Samples are not reachable through this.
    pub fn info_mut(&mut self) -> &mut SignalInfo {
        &mut self.info
    }

    /// Average all channels into a mono signal with the same sample rate.
    pub fn mean(&self) -> Result<Signal> {
        let averaged = self
            .buffers
            .time
            .mean_axis(Axis(1))
            .ok_or(SignalError::EmptySignal)?;
        Ok(Signal::from_time(averaged, self.sample_rate)?.with_info(self.info.clone()))
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sample Rate: {} Hz", self.sample_rate)?;
        writeln!(f, "Samples:     {}", self.num_samples())?;
        writeln!(f, "Channels:    {}", self.num_channels())?;
        writeln!(f, "Duration:    {:.3}s", self.duration())?;
        writeln!(f, "FFT Degree:  {:.2}", self.fft_degree())?;
        writeln!(f, "Domain:      {}", self.domain())?;
        writeln!(
            f,
            "Band:        {} - {} Hz",
            self.info.freq_min, self.info.freq_max
        )?;
        write!(f, "Comment:     {}", self.info.comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, array};

    #[test]
    fn test_time_axis_excludes_endpoint() {
        let signal = Signal::from_time(array![0.0, 1.0, 0.0, -1.0], 8).unwrap();
        assert_eq!(signal.time_axis().to_vec(), vec![0.0, 0.125, 0.25, 0.375]);
        assert!((signal.duration() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_freq_axis_spacing() {
        let signal = Signal::from_time(Array1::zeros(4), 8).unwrap();
        assert_eq!(signal.freq_axis().to_vec(), vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_fft_degree_fractional() {
        let signal = Signal::from_time(Array1::zeros(48), 48000).unwrap();
        assert!((signal.fft_degree() - 48f64.log2()).abs() < 1e-12);

        let signal = Signal::from_time(Array1::zeros(1024), 48000).unwrap();
        assert_eq!(signal.fft_degree(), 10.0);
    }

    #[test]
    fn test_rank_and_channels() {
        let mono = Signal::from_time(array![1.0, 2.0, 3.0], 44100).unwrap();
        assert_eq!(mono.rank(), Rank::Mono);
        assert_eq!(mono.num_channels(), 1);
        assert_eq!(mono.time_samples().ndim(), 1);

        let stereo = Signal::from_time(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]], 44100).unwrap();
        assert_eq!(stereo.rank(), Rank::Multi);
        assert_eq!(stereo.num_channels(), 2);
        assert_eq!(stereo.num_samples(), 3);
        assert_eq!(stereo.freq_coefficients().shape(), &[3, 2]);
    }

    #[test]
    fn test_single_column_keeps_rank_two() {
        let signal = Signal::from_time(array![[1.0], [2.0]], 44100).unwrap();
        assert_eq!(signal.rank(), Rank::Multi);
        assert_eq!(signal.num_channels(), 1);
        assert_eq!(signal.time_samples().shape(), &[2, 1]);
    }

    #[test]
    fn test_empty_rejected_and_state_kept() {
        let mut signal = Signal::from_time(array![1.0, 2.0], 8).unwrap();
        let before = signal.time_samples().to_owned();

        let err = signal.set_time_samples(Array1::<f64>::zeros(0)).unwrap_err();
        assert_eq!(err, SignalError::EmptySignal);
        assert_eq!(signal.time_samples(), before.view());
        assert_eq!(signal.num_samples(), 2);
        assert_eq!(signal.time_axis().len(), 2);
    }

    #[test]
    fn test_zero_channels_rejected() {
        let err = Signal::from_time(Array2::<f64>::zeros((4, 0)), 8).unwrap_err();
        assert_eq!(err, SignalError::EmptySignal);
    }

    #[test]
    fn test_rank_three_rejected() {
        let mut signal = Signal::from_time(array![1.0], 8).unwrap();
        let err = signal
            .set_time_samples(Array3::<f64>::zeros((2, 2, 2)))
            .unwrap_err();
        assert_eq!(err, SignalError::Dimension { rank: 3 });
        assert_eq!(signal.num_samples(), 1);
    }

    #[test]
    fn test_scalar_rejected() {
        let err = Signal::from_time(ndarray::arr0(1.0), 8).unwrap_err();
        assert_eq!(err, SignalError::Dimension { rank: 0 });
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let err = Signal::from_time(array![1.0], 0).unwrap_err();
        assert_eq!(err, SignalError::InvalidSampleRate);
    }

    #[test]
    fn test_domain_tracks_last_write() {
        let mut signal = Signal::from_time(array![1.0, 0.0], 8).unwrap();
        assert_eq!(signal.domain(), Domain::Time);

        let spectrum = signal.freq_coefficients().to_owned();
        signal.set_freq_coefficients(spectrum).unwrap();
        assert_eq!(signal.domain(), Domain::Frequency);
    }

    #[test]
    fn test_freq_write_rederives_time_and_axes() {
        let mut signal = Signal::from_time(array![1.0, 2.0], 8).unwrap();
        signal
            .set_freq_coefficients(array![
                Complex64::new(4.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 0.0)
            ])
            .unwrap();

        assert_eq!(signal.num_samples(), 4);
        assert_eq!(signal.freq_axis().len(), 4);
        for &x in signal.time_samples().iter() {
            assert!((x - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_channel_access() {
        let signal = Signal::from_time(array![[1.0, 10.0], [2.0, 20.0]], 8).unwrap();
        assert_eq!(signal.time_channel(1).unwrap().to_vec(), vec![10.0, 20.0]);
        assert!((signal.freq_channel(0).unwrap()[0].re - 3.0).abs() < 1e-12);
        assert_eq!(
            signal.time_channel(2).unwrap_err(),
            SignalError::ChannelOutOfRange {
                index: 2,
                channels: 2
            }
        );
    }

    #[test]
    fn test_mean_across_channels() {
        let signal = Signal::from_time(array![[1.0, 3.0], [2.0, 6.0]], 8)
            .unwrap()
            .with_comment("stereo pair");
        let mono = signal.mean().unwrap();

        assert_eq!(mono.rank(), Rank::Mono);
        let samples: Vec<f64> = mono.time_samples().iter().copied().collect();
        assert_eq!(samples, vec![2.0, 4.0]);
        assert_eq!(mono.sample_rate(), 8);
        assert_eq!(mono.info().comment, "stereo pair");
    }

    #[test]
    fn test_default_info() {
        let signal = Signal::from_mono(vec![0.0; 4], 44100).unwrap();
        assert_eq!(signal.info(), &SignalInfo::default());

        let signal = signal.with_freq_limits(100.0, 8000.0);
        assert_eq!(signal.info().freq_min, 100.0);
        assert_eq!(signal.info().freq_max, 8000.0);
    }

    #[test]
    fn test_display_summary() {
        let signal = Signal::from_mono(vec![0.0; 8], 8).unwrap();
        let text = signal.to_string();
        assert!(text.contains("Sample Rate: 8 Hz"), "got: {text}");
        assert!(text.contains("Samples:     8"), "got: {text}");
        assert!(text.contains("Domain:      time"), "got: {text}");
        assert!(text.contains("No comments."), "got: {text}");
    }
}
