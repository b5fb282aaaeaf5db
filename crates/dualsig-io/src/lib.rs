//! WAV file I/O for dualsig signals.
//!
//! This crate provides:
//!
//! - **Reading**: [`read_wav`] loads every channel of a WAV file into a [`Signal`]
//! - **Writing**: [`write_wav`] stores a signal's time samples as float or integer PCM
//! - **Metadata**: [`read_wav_info`] reads the header without loading samples
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dualsig_io::{read_wav, write_wav};
//!
//! let response = read_wav("response.wav")?;
//! let excitation = read_wav("sweep.wav")?;
//!
//! let h = dualsig_core::divide(&response, &excitation)?;
//! write_wav("impulse_response.wav", &h, 32)?;
//! ```
//!
//! [`Signal`]: dualsig_core::Signal

mod wav;

pub use wav::{WavFormat, WavInfo, read_wav, read_wav_info, write_wav};

/// Error types for WAV I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The samples could not form a valid signal.
    #[error("Invalid signal: {0}")]
    Signal(#[from] dualsig_core::SignalError),

    /// The requested bit depth cannot be written.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// More channels than a WAV header can describe.
    #[error("Too many channels for WAV: {0}")]
    TooManyChannels(usize),
}

/// Convenience result type for WAV I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
