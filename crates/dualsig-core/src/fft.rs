//! FFT wrapper applied per channel along the sample axis

use ndarray::{Array2, ArrayView1, Axis};
use rustfft::{FftPlanner, num_complex::Complex64};
use std::sync::Arc;

/// Forward and inverse FFT planned for a single length.
///
/// Unlike a spectrum analyzer this keeps the full two-sided spectrum: a
/// signal of `N` samples maps to `N` complex bins so that the inverse
/// transform can reproduce the samples exactly.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        Self { fft, ifft, size }
    }

    /// Forward transform of a real sequence (unnormalized, all `size` bins).
    ///
    /// Input shorter than the FFT size is zero-padded, longer input is truncated.
    pub fn forward(&self, input: ArrayView1<'_, f64>) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));

        self.fft.process(&mut buffer);
        buffer
    }

    /// Inverse transform scaled by `1/size`, keeping only the real part.
    ///
    /// The imaginary residue is dropped without checking the spectrum for
    /// conjugate symmetry.
    pub fn inverse(&self, spectrum: ArrayView1<'_, Complex64>) -> Vec<f64> {
        let mut buffer: Vec<Complex64> = spectrum.iter().copied().collect();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));

        self.inverse_complex(&mut buffer);
        buffer.iter().map(|c| c.re).collect()
    }

    /// Perform inverse FFT on complex buffer (in-place)
    pub fn inverse_complex(&self, buffer: &mut [Complex64]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f64;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }

    /// Forward transform of every column of a `[samples, channels]` buffer.
    pub fn forward_columns(&self, samples: &Array2<f64>) -> Array2<Complex64> {
        let mut out = Array2::from_elem((self.size, samples.ncols()), Complex64::new(0.0, 0.0));
        for (src, mut dst) in samples.axis_iter(Axis(1)).zip(out.axis_iter_mut(Axis(1))) {
            for (d, s) in dst.iter_mut().zip(self.forward(src)) {
                *d = s;
            }
        }
        out
    }

    /// Inverse transform of every column of a `[bins, channels]` buffer.
    pub fn inverse_columns(&self, coefficients: &Array2<Complex64>) -> Array2<f64> {
        let mut out = Array2::zeros((self.size, coefficients.ncols()));
        for (src, mut dst) in coefficients
            .axis_iter(Axis(1))
            .zip(out.axis_iter_mut(Axis(1)))
        {
            for (d, s) in dst.iter_mut().zip(self.inverse(src)) {
                *d = s;
            }
        }
        out
    }
}

/// Compute magnitude spectrum in dB
pub fn magnitude_db(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-12).log10())
        .collect()
}

/// Compute phase spectrum in radians
pub fn phase_rad(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.arg()).collect()
}
