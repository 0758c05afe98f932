//! Error types for simdarr operations.
//!
//! Every public operation validates its inputs and reports failures through
//! [`ArrayError`] instead of panicking, so callers can decide how to recover
//! from overflow, division by zero or malformed arguments.

use std::fmt;

/// Errors that can occur during simdarr operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// The (possibly `max_len`-limited) input contained no elements.
    EmptyArray,
    /// Two arrays that must be processed pairwise have different lengths.
    LengthMismatch {
        /// Length of the primary array.
        expected: usize,
        /// Length of the secondary array.
        found: usize,
    },
    /// The output buffer cannot hold every element the operation may write.
    OutputTooShort {
        /// Number of slots the operation needs.
        required: usize,
        /// Number of slots the caller provided.
        available: usize,
    },
    /// The operand combination is not meaningful (e.g. scalar compared to scalar).
    InvalidOperands {
        /// Human-readable error message.
        message: String,
    },
    /// An integer result does not fit the element type.
    Overflow {
        /// Name of the operation that overflowed.
        op: &'static str,
    },
    /// An integer division with a zero divisor.
    ZeroDivision {
        /// Name of the operation.
        op: &'static str,
    },
    /// A floating point result was infinite or NaN while checks were enabled.
    ArithmeticError {
        /// Name of the operation.
        op: &'static str,
    },
    /// A configuration value could not be parsed or is out of range.
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::EmptyArray => write!(f, "Array length error: input array is empty"),
            ArrayError::LengthMismatch { expected, found } => write!(
                f,
                "Array length error: arrays must have the same length (expected {}, found {})",
                expected, found
            ),
            ArrayError::OutputTooShort {
                required,
                available,
            } => write!(
                f,
                "Output array too short: {} slots required, {} available",
                required, available
            ),
            ArrayError::InvalidOperands { message } => {
                write!(f, "Invalid operands: {}", message)
            }
            ArrayError::Overflow { op } => write!(f, "Arithmetic overflow in {}", op),
            ArrayError::ZeroDivision { op } => write!(f, "Division by zero in {}", op),
            ArrayError::ArithmeticError { op } => {
                write!(f, "Arithmetic error in {}: result is not finite", op)
            }
            ArrayError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for ArrayError {}

/// Result type alias for simdarr operations.
pub type Result<T> = std::result::Result<T, ArrayError>;

/// Creates a length mismatch error.
pub fn length_mismatch(expected: usize, found: usize) -> ArrayError {
    ArrayError::LengthMismatch { expected, found }
}

/// Creates an output capacity error.
pub fn output_too_short(required: usize, available: usize) -> ArrayError {
    ArrayError::OutputTooShort {
        required,
        available,
    }
}

/// Creates an invalid operands error.
pub fn invalid_operands(message: impl Into<String>) -> ArrayError {
    ArrayError::InvalidOperands {
        message: message.into(),
    }
}

/// Creates a configuration error.
pub fn invalid_config(message: impl Into<String>) -> ArrayError {
    ArrayError::InvalidConfig {
        message: message.into(),
    }
}
