//! Error handling for the verifier

#[cfg(not(feature = "std"))]
use core::fmt;
#[cfg(feature = "std")]
use std::fmt;

/// The error type for verifier operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Error::Parameter { name, reason }
    }
}

/// Result type for verifier operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub mod validate;
