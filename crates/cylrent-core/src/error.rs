//! # Foundational Error Types
//!
//! Errors raised while constructing the foundational value types. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations and carry the offending input so callers can surface
//! actionable messages.
//!
//! Domain-specific failures (settlement rejections, transfer workflow
//! rejections) live in their own crates next to the logic that raises
//! them; this module only covers the primitives.

use thiserror::Error;

/// Error constructing or parsing a [`crate::Timestamp`].
#[derive(Error, Debug)]
pub enum TimestampError {
    /// The input carried a timezone offset other than `Z`.
    #[error("timestamp must use Z suffix (UTC only), got: {input:?}")]
    NonUtcOffset {
        /// The rejected input.
        input: String,
    },

    /// The input was not valid RFC 3339.
    #[error("invalid RFC 3339 timestamp {input:?}: {reason}")]
    Unparseable {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The epoch value is outside the representable range.
    #[error("unix timestamp out of range: {secs}")]
    EpochOutOfRange {
        /// The rejected epoch seconds.
        secs: i64,
    },
}

/// Error constructing or parsing an [`crate::Amount`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoneyError {
    /// The input string was empty or whitespace.
    #[error("amount string is empty")]
    Empty,

    /// The input was not a plain decimal number.
    #[error("malformed amount: {input:?}")]
    Malformed {
        /// The rejected input.
        input: String,
    },

    /// The input carried more than two fractional digits.
    #[error("amount {input:?} has more than two decimal places")]
    TooManyDecimals {
        /// The rejected input.
        input: String,
    },

    /// The value does not fit in the minor-unit representation.
    #[error("amount overflows the minor-unit range")]
    Overflow,
}
