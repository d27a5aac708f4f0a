//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines [`Timestamp`], a UTC-only timestamp truncated to whole seconds.
//!
//! Lease deadlines and transfer audit times are compared across outlets in
//! different locales; a single canonical representation (ISO8601 with `Z`
//! suffix, seconds precision) removes timezone ambiguity from overdue
//! derivation and late-fee counting. Non-UTC inputs are **rejected at
//! construction** by the strict parser — there is no silent conversion on
//! the strict path.
//!
//! The domain engines never read a clock themselves. They take a
//! `Timestamp` parameter, so the same lease resolves identically for the
//! same reference time, in production and in tests.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimestampError;

/// Seconds in a day, used for whole-day arithmetic.
const SECS_PER_DAY: i64 = 86_400;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
/// - [`Timestamp::parse_lenient()`] — from an ISO8601 string, converting
///   any offset to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating
    /// sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only timestamps with the `Z` suffix are
    /// accepted. Explicit offsets like `+05:00` are rejected — even
    /// `+00:00`, which is semantically equivalent to `Z`. Stored records
    /// must carry one unambiguous form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RFC 3339 or uses a
    /// non-`Z` timezone offset.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        if !s.ends_with('Z') {
            return Err(TimestampError::NonUtcOffset {
                input: s.to_string(),
            });
        }

        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| TimestampError::Unparseable {
            input: s.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse a timestamp from an RFC 3339 string, accepting any timezone
    /// offset and converting to UTC.
    ///
    /// A lenient parser for ingesting external data. The result is always
    /// UTC with seconds precision. For stored records, prefer
    /// [`Timestamp::parse()`] which rejects non-UTC inputs.
    pub fn parse_lenient(s: &str) -> Result<Self, TimestampError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| TimestampError::Unparseable {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, TimestampError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or(TimestampError::EpochOutOfRange { secs })?;
        Ok(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Number of whole or partial days from `earlier` to `self`, i.e.
    /// `ceil((self − earlier) / 1 day)`.
    ///
    /// Returns `0` when `self <= earlier`. One second past a deadline
    /// already counts as a full day — this is the counting rule for
    /// late-return fees.
    pub fn ceil_days_since(&self, earlier: Timestamp) -> i64 {
        let delta = self.epoch_secs() - earlier.epoch_secs();
        if delta <= 0 {
            0
        } else {
            (delta + SECS_PER_DAY - 1) / SECS_PER_DAY
        }
    }

    /// Render as ISO8601 with Z suffix (e.g., `2024-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
