//! Error types for memocache

use std::fmt;

/// Result type alias for memocache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache and evaluator operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache capacity must be at least 1
    InvalidCapacity(usize),

    /// Range bounds are reversed or past the end of the array
    InvalidRange {
        /// Left bound (inclusive)
        left: usize,
        /// Right bound (inclusive)
        right: usize,
        /// Array length
        len: usize,
    },

    /// Point update outside the array
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Array length
        len: usize,
    },

    /// Evaluated result does not fit in a u128
    Overflow(u64),

    /// Range sum does not fit in an i64
    SumOverflow {
        /// Left bound (inclusive)
        left: usize,
        /// Right bound (inclusive)
        right: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {} (must be at least 1)", capacity)
            }
            Error::InvalidRange { left, right, len } => {
                write!(f, "Invalid range: [{}, {}] for array of length {}", left, right, len)
            }
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "Index out of bounds: {} for array of length {}", index, len)
            }
            Error::Overflow(n) => write!(f, "Result overflows u128 at n = {}", n),
            Error::SumOverflow { left, right } => {
                write!(f, "Sum of [{}, {}] overflows i64", left, right)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InvalidCapacity(0).to_string(),
            "Invalid capacity: 0 (must be at least 1)"
        );
        assert_eq!(
            Error::InvalidRange { left: 5, right: 2, len: 10 }.to_string(),
            "Invalid range: [5, 2] for array of length 10"
        );
        assert_eq!(Error::Overflow(187).to_string(), "Result overflows u128 at n = 187");
        assert_eq!(
            Error::SumOverflow { left: 0, right: 1 }.to_string(),
            "Sum of [0, 1] overflows i64"
        );
    }
}
