//! Error type shared by all counter operations.
//!
//! Every fallible operation on a [`KeyedCounter`](crate::counters::KeyedCounter)
//! reports one of two failure kinds:
//!
//! - [`CounterError::InvalidArgument`] when the caller passes a value outside
//!   the operation's contract (an absent key, a non-positive addend, a
//!   negative assignment, a negative capacity).
//! - [`CounterError::Overflow`] when an addition would push a count past the
//!   maximum value of the count type.
//!
//! Both are raised before any state is touched, so a failed call always
//! leaves the counter exactly as it was.
//!
//! # Example
//!
//! ```rust
//! use contachiavi::counters::KeyedCounter;
//! use contachiavi::error::CounterError;
//!
//! let mut counter: KeyedCounter<&str> = KeyedCounter::new();
//! counter.set("abc", i32::MAX).unwrap();
//!
//! assert_eq!(counter.add("abc"), Err(CounterError::Overflow));
//! assert_eq!(counter.get(&"abc"), i32::MAX);
//! ```

use thiserror::Error;

/// Errors returned by counter operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CounterError {
    /// An argument was outside the operation's contract.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Human readable description of the violated constraint.
        reason: &'static str,
    },

    /// The addition would exceed the maximum representable count.
    #[error("count overflow: result exceeds the maximum representable count")]
    Overflow,
}

impl CounterError {
    pub(crate) const fn invalid(argument: &'static str, reason: &'static str) -> Self {
        CounterError::InvalidArgument { argument, reason }
    }

    /// Returns `true` for [`CounterError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CounterError::InvalidArgument { .. })
    }

    /// Returns `true` for [`CounterError::Overflow`].
    pub fn is_overflow(&self) -> bool {
        matches!(self, CounterError::Overflow)
    }
}

/// Result type for counter operations.
pub type Result<T> = std::result::Result<T, CounterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = CounterError::invalid("addend", "addend must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid argument `addend`: addend must be at least 1"
        );
        assert!(err.is_invalid_argument());
        assert!(!err.is_overflow());
    }

    #[test]
    fn test_overflow_display() {
        let err = CounterError::Overflow;
        assert!(err.to_string().contains("overflow"));
        assert!(err.is_overflow());
        assert!(!err.is_invalid_argument());
    }
}
