//! Validation of measurement defaults.
//!
//! Checks that a [`Defaults`] value can actually be used to build signals and
//! route channels. All problems are collected, not just the first one.
//!
//! # Example
//!
//! ```rust
//! use dualsig_config::{Defaults, validate_defaults};
//!
//! validate_defaults(&Defaults::default()).expect("built-in defaults are valid");
//!
//! let broken = Defaults { sample_rate: 0, ..Defaults::default() };
//! assert!(validate_defaults(&broken).is_err());
//! ```

use crate::defaults::Defaults;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Sample rate of zero.
    #[error("sample rate must be positive")]
    SampleRate,

    /// Frequency limits that are negative or not increasing.
    #[error("frequency limits [{min}, {max}] must satisfy 0 <= min < max")]
    FreqLimits {
        /// Configured lower limit.
        min: f64,
        /// Configured upper limit.
        max: f64,
    },

    /// Upper frequency limit past Nyquist.
    #[error("upper frequency limit {max} Hz exceeds Nyquist ({nyquist} Hz)")]
    AboveNyquist {
        /// Configured upper limit.
        max: f64,
        /// Half the configured sample rate.
        nyquist: f64,
    },

    /// A channel map with no entries.
    #[error("{which} channel map is empty")]
    EmptyChannelMap {
        /// `"input"` or `"output"`.
        which: &'static str,
    },

    /// A channel map entry of zero; channel numbers start at 1.
    #[error("{which} channel map contains 0; channels are numbered from 1")]
    ZeroChannel {
        /// `"input"` or `"output"`.
        which: &'static str,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a set of defaults.
pub fn validate_defaults(defaults: &Defaults) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if defaults.sample_rate == 0 {
        errors.push(ValidationError::SampleRate);
    }

    let (min, max) = (defaults.freq_min, defaults.freq_max);
    if !(min >= 0.0 && min < max) {
        errors.push(ValidationError::FreqLimits { min, max });
    } else if defaults.sample_rate > 0 {
        let nyquist = f64::from(defaults.sample_rate) / 2.0;
        if max > nyquist {
            errors.push(ValidationError::AboveNyquist { max, nyquist });
        }
    }

    for (which, map) in [
        ("input", &defaults.in_channel),
        ("output", &defaults.out_channel),
    ] {
        if map.is_empty() {
            errors.push(ValidationError::EmptyChannelMap { which });
        } else if map.contains(&0) {
            errors.push(ValidationError::ZeroChannel { which });
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
