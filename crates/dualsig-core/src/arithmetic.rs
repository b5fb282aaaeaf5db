//! Channel-wise arithmetic between two signals.
//!
//! Addition and subtraction combine time samples; division combines
//! frequency coefficients pointwise, which is how a transfer function is
//! estimated from a response and its excitation.
//!
//! # Broadcasting
//!
//! | left        | right       | result                              |
//! |-------------|-------------|-------------------------------------|
//! | mono        | mono        | mono, element-wise                  |
//! | `n` channels| mono        | `n` channels, each against the mono |
//! | mono        | `m` channels| `m` channels                        |
//! | `n` channels| `m` channels| `n * m` channels, every pair        |
//!
//! The last row is an outer product, not a zip: channel counts never have to
//! match. Output channel `a * m + b` holds `left[a] ∘ right[b]`.
//!
//! The result takes the left operand's sample rate. The right operand's rate
//! is not checked.

use std::ops::{Add, Div, Sub};

use ndarray::{Array2, ArrayD, ArrayViewD, Axis};
use rustfft::num_complex::Complex64;

use crate::error::{Result, SignalError};
use crate::signal::{Domain, Rank, Signal};

/// The three supported binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Time-domain addition.
    Add,
    /// Time-domain subtraction.
    Sub,
    /// Frequency-domain complex division.
    Div,
}

impl BinaryOp {
    /// Domain the operation reads from and writes to.
    pub fn domain(self) -> Domain {
        match self {
            BinaryOp::Add | BinaryOp::Sub => Domain::Time,
            BinaryOp::Div => Domain::Frequency,
        }
    }
}

/// Right-hand side of [`apply`].
///
/// Only [`Operand::Signal`] can take part in arithmetic; the other variants
/// exist so callers holding loosely typed values get a
/// [`SignalError::TypeOperand`] instead of a panic.
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    /// Another signal.
    Signal(&'a Signal),
    /// A bare number.
    Scalar(f64),
    /// A raw sample array without sample rate.
    Samples(ArrayViewD<'a, f64>),
}

impl Operand<'_> {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Signal(_) => "signal",
            Operand::Scalar(_) => "scalar",
            Operand::Samples(_) => "sample array",
        }
    }
}

impl<'a> From<&'a Signal> for Operand<'a> {
    fn from(signal: &'a Signal) -> Self {
        Operand::Signal(signal)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<ArrayViewD<'a, f64>> for Operand<'a> {
    fn from(samples: ArrayViewD<'a, f64>) -> Self {
        Operand::Samples(samples)
    }
}

/// Apply `op` to `lhs` and an operand of any kind.
pub fn apply<'a>(op: BinaryOp, lhs: &Signal, rhs: impl Into<Operand<'a>>) -> Result<Signal> {
    match rhs.into() {
        Operand::Signal(rhs) => match op {
            BinaryOp::Add => add(lhs, rhs),
            BinaryOp::Sub => subtract(lhs, rhs),
            BinaryOp::Div => divide(lhs, rhs),
        },
        other => Err(SignalError::TypeOperand {
            found: other.kind(),
        }),
    }
}

/// Time-domain sum of two signals.
pub fn add(lhs: &Signal, rhs: &Signal) -> Result<Signal> {
    check_operands(lhs, rhs)?;
    let samples = broadcast(
        (lhs.time_columns(), lhs.rank()),
        (rhs.time_columns(), rhs.rank()),
        |a, b| a + b,
    );
    Signal::from_time(samples, lhs.sample_rate())
}

/// Time-domain difference `lhs - rhs`.
pub fn subtract(lhs: &Signal, rhs: &Signal) -> Result<Signal> {
    check_operands(lhs, rhs)?;
    let samples = broadcast(
        (lhs.time_columns(), lhs.rank()),
        (rhs.time_columns(), rhs.rank()),
        |a, b| a - b,
    );
    Signal::from_time(samples, lhs.sample_rate())
}

/// Pointwise spectral quotient `lhs / rhs`.
///
/// Bins where `rhs` is zero come out as non-finite values, as plain complex
/// division would produce.
pub fn divide(lhs: &Signal, rhs: &Signal) -> Result<Signal> {
    check_operands(lhs, rhs)?;
    let coefficients = broadcast(
        (lhs.freq_columns(), lhs.rank()),
        (rhs.freq_columns(), rhs.rank()),
        |a: Complex64, b: Complex64| a / b,
    );
    Signal::from_freq(coefficients, lhs.sample_rate())
}

fn check_operands(lhs: &Signal, rhs: &Signal) -> Result<()> {
    if lhs.num_samples() != rhs.num_samples() {
        return Err(SignalError::LengthMismatch {
            left: lhs.num_samples(),
            right: rhs.num_samples(),
        });
    }

    #[cfg(feature = "tracing")]
    if lhs.sample_rate() != rhs.sample_rate() {
        tracing::warn!(
            left = lhs.sample_rate(),
            right = rhs.sample_rate(),
            "operands differ in sample rate; keeping the left one"
        );
    }

    Ok(())
}

/// Channel pairs `(left, right)` combined into each output channel, in output order.
fn channel_pairs(left: (usize, Rank), right: (usize, Rank)) -> Vec<(usize, usize)> {
    match (left.1, right.1) {
        (Rank::Mono, Rank::Mono) => vec![(0, 0)],
        (Rank::Multi, Rank::Mono) => (0..left.0).map(|a| (a, 0)).collect(),
        (Rank::Mono, Rank::Multi) => (0..right.0).map(|b| (0, b)).collect(),
        (Rank::Multi, Rank::Multi) => (0..left.0)
            .flat_map(|a| (0..right.0).map(move |b| (a, b)))
            .collect(),
    }
}

/// Combine two `[samples, channels]` buffers under the broadcasting policy.
///
/// Both buffers must have the same number of rows.
fn broadcast<A, F>(left: (&Array2<A>, Rank), right: (&Array2<A>, Rank), op: F) -> ArrayD<A>
where
    A: Copy,
    F: Fn(A, A) -> A,
{
    let (lhs, lrank) = left;
    let (rhs, rrank) = right;
    let pairs = channel_pairs((lhs.ncols(), lrank), (rhs.ncols(), rrank));

    let out = Array2::from_shape_fn((lhs.nrows(), pairs.len()), |(i, c)| {
        let (a, b) = pairs[c];
        op(lhs[[i, a]], rhs[[i, b]])
    });

    match (lrank, rrank) {
        (Rank::Mono, Rank::Mono) => out.index_axis_move(Axis(1), 0).into_dyn(),
        _ => out.into_dyn(),
    }
}

impl Add for &Signal {
    type Output = Result<Signal>;

    fn add(self, rhs: &Signal) -> Result<Signal> {
        add(self, rhs)
    }
}

impl Sub for &Signal {
    type Output = Result<Signal>;

    fn sub(self, rhs: &Signal) -> Result<Signal> {
        subtract(self, rhs)
    }
}

impl Div for &Signal {
    type Output = Result<Signal>;

    fn div(self, rhs: &Signal) -> Result<Signal> {
        divide(self, rhs)
    }
}

impl Add for Signal {
    type Output = Result<Signal>;

    fn add(self, rhs: Signal) -> Result<Signal> {
        add(&self, &rhs)
    }
}

impl Sub for Signal {
    type Output = Result<Signal>;

    fn sub(self, rhs: Signal) -> Result<Signal> {
        subtract(&self, &rhs)
    }
}

impl Div for Signal {
    type Output = Result<Signal>;

    fn div(self, rhs: Signal) -> Result<Signal> {
        divide(&self, &rhs)
    }
}
