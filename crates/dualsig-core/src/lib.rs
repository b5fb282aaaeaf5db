//! Dualsig Core - signals with synchronized time and frequency domains
//!
//! This crate provides a multi-channel [`Signal`] that is always available in
//! both domains, and arithmetic that combines two signals channel by channel:
//!
//! - [`signal`] - The dual-domain signal and its derived axes
//! - [`arithmetic`] - Add, subtract (time domain) and divide (frequency domain)
//! - [`fft`] - Per-channel FFT wrapper
//! - [`spectrum`] - Display-side spectrum helpers
//! - [`export`] - FRD and CSV export
//! - [`error`] - Error types
//!
//! ## Example Workflow
//!
//! ```rust
//! use dualsig_core::Signal;
//! use ndarray::array;
//!
//! // Excitation and the response recorded through a system that doubles it
//! let excitation = Signal::from_time(array![1.0, 0.0, 0.0, 0.0], 48000).unwrap();
//! let response = Signal::from_time(array![2.0, 0.0, 0.0, 0.0], 48000).unwrap();
//!
//! // Transfer function: spectral division
//! let h = (&response / &excitation).unwrap();
//! assert!((h.freq_channel(0).unwrap()[1].re - 2.0).abs() < 1e-12);
//! ```
//!
//! ## Broadcasting
//!
//! Mono operands pair with every channel of the other operand. Two
//! multi-channel operands combine every channel of the left with every
//! channel of the right; see [`arithmetic`].

pub mod arithmetic;
pub mod error;
pub mod export;
pub mod fft;
pub mod signal;
pub mod spectrum;

// Re-export main types
pub use arithmetic::{BinaryOp, Operand, add, apply, divide, subtract};
pub use error::{Result, SignalError};
pub use fft::{Fft, magnitude_db, phase_rad};
pub use rustfft::num_complex::Complex64;
pub use signal::{Domain, Rank, Signal, SignalInfo};
pub use spectrum::{
    magnitude_at, scaled_magnitude_db, smooth, smoothed_magnitude_at, smoothed_magnitude_db,
};
