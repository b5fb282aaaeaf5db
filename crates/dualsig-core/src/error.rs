//! Error types for signal construction and arithmetic.

use thiserror::Error;

/// Errors raised by [`Signal`](crate::Signal) and the arithmetic operators.
///
/// Every variant is a contract violation by the caller. Nothing is retried
/// and a failed mutation leaves the signal exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The buffer is not one- or two-dimensional.
    #[error("signal buffers must have 1 or 2 dimensions, got {rank}")]
    Dimension {
        /// Number of dimensions of the rejected buffer.
        rank: usize,
    },

    /// The buffer holds no samples (or no channels).
    #[error("signal buffers must hold at least one sample per channel")]
    EmptySignal,

    /// An arithmetic operand is not a signal.
    #[error("a signal can only be combined with another signal, got {found}")]
    TypeOperand {
        /// Kind of the rejected operand.
        found: &'static str,
    },

    /// Arithmetic operands differ in length.
    #[error("operands must have the same number of samples ({left} vs {right})")]
    LengthMismatch {
        /// Sample count of the left operand.
        left: usize,
        /// Sample count of the right operand.
        right: usize,
    },

    /// A channel index past the last channel.
    #[error("channel {index} out of range for a {channels}-channel signal")]
    ChannelOutOfRange {
        /// Requested channel.
        index: usize,
        /// Channels available.
        channels: usize,
    },

    /// Sample rate of zero.
    #[error("sample rate must be positive")]
    InvalidSampleRate,
}

/// Convenience result type for signal operations.
pub type Result<T> = std::result::Result<T, SignalError>;
