//! Measurement defaults for dualsig signals.
//!
//! This crate supplies the configuration a measurement workflow applies when
//! it creates signals: sample rate, band of interest, device channel routing
//! and a comment.
//!
//! # Features
//!
//! - **Defaults file**: Load and save [`Defaults`] as TOML
//! - **Validation**: Reject unusable rates, limits and channel maps
//! - **Paths**: Platform-specific user and system config directories
//! - **Signal construction**: Build core signals with the defaults applied
//!
//! # Example
//!
//! ```rust,no_run
//! use dualsig_config::{Defaults, paths};
//! use ndarray::array;
//!
//! // User file if present, otherwise built-in values
//! let defaults = Defaults::load_or_default().unwrap();
//!
//! let excitation = defaults.time_signal(array![1.0, 0.0, 0.0, 0.0]).unwrap();
//! assert_eq!(excitation.sample_rate(), defaults.sample_rate);
//!
//! // Persist a customised copy
//! let custom = Defaults { sample_rate: 48000, ..defaults };
//! custom.save(paths::defaults_path()).unwrap();
//! ```

mod defaults;
mod error;

/// Platform-specific paths for the defaults file.
pub mod paths;

/// Defaults validation.
pub mod validation;

pub use defaults::Defaults;
pub use error::ConfigError;
pub use paths::{defaults_path, ensure_user_config_dir, find_defaults, user_config_dir};
pub use validation::{ValidationError, ValidationResult, validate_defaults};
