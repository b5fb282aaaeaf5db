//! Measurement defaults file format and operations.

use dualsig_core::{Complex64, Signal, SignalInfo};
use ndarray::{Array, Dimension};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::paths;
use crate::validation::validate_defaults;

/// Settings applied to every signal and measurement unless overridden.
///
/// Stored as TOML. Any key left out falls back to its built-in value, except
/// that an omitted `freq_max` is capped at the Nyquist frequency of the
/// configured `sample_rate`.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 48000
/// freq_min = 20.0
/// freq_max = 20000.0
/// in_channel = [1, 2]
/// out_channel = [1]
/// comment = "Lab B, measurement mic"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Defaults {
    /// Sample rate in Hz.
    pub sample_rate: u32,

    /// Lower bound of the band of interest in Hz.
    pub freq_min: f64,

    /// Upper bound of the band of interest in Hz.
    pub freq_max: f64,

    /// Device input channels used for recording, numbered from 1.
    pub in_channel: Vec<u16>,

    /// Device output channels used for playback, numbered from 1.
    pub out_channel: Vec<u16>,

    /// Comment attached to new signals.
    pub comment: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            freq_min: 20.0,
            freq_max: 20000.0,
            in_channel: vec![1],
            out_channel: vec![1],
            comment: "No comments.".to_string(),
        }
    }
}

impl Defaults {
    /// Load defaults from a TOML file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let defaults = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded defaults");
        Ok(defaults)
    }

    /// Parse and validate defaults from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut defaults: Defaults = toml::from_str(toml_str)?;
        let keys: toml::Table = toml::from_str(toml_str)?;
        if !keys.contains_key("freq_max") {
            defaults.cap_freq_max();
        }
        defaults.validate()?;
        Ok(defaults)
    }

    fn cap_freq_max(&mut self) {
        if self.sample_rate > 0 {
            self.freq_max = self.freq_max.min(f64::from(self.sample_rate) / 2.0);
        }
    }

    /// Load the user's defaults file, or the built-in defaults if there is none.
    ///
    /// A defaults file that exists but cannot be read or parsed is an error,
    /// not a silent fallback.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match paths::find_defaults() {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("no defaults file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save the defaults to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the defaults to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the values for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_defaults(self)?;
        Ok(())
    }

    /// Annotations for new signals.
    pub fn signal_info(&self) -> SignalInfo {
        SignalInfo {
            freq_min: self.freq_min,
            freq_max: self.freq_max,
            comment: self.comment.clone(),
        }
    }

    /// Build a signal from time samples at the default sample rate.
    pub fn time_signal<D: Dimension>(&self, samples: Array<f64, D>) -> Result<Signal, ConfigError> {
        Ok(Signal::from_time(samples, self.sample_rate)?.with_info(self.signal_info()))
    }

    /// Build a signal from frequency coefficients at the default sample rate.
    pub fn freq_signal<D: Dimension>(
        &self,
        coefficients: Array<Complex64, D>,
    ) -> Result<Signal, ConfigError> {
        Ok(Signal::from_freq(coefficients, self.sample_rate)?.with_info(self.signal_info()))
    }
}
