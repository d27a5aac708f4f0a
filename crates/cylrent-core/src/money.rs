//! # Monetary Amounts — Integer Minor Units
//!
//! Defines [`Amount`], the single currency representation of the
//! workspace: an `i64` count of minor units (two decimal places).
//!
//! ## Design
//!
//! Currency crosses the caller boundary as decimal strings
//! (`"2000.00"`). Those strings are parsed directly into minor units and
//! every computation — condition factors, late fees, refund clamping —
//! is checked integer arithmetic. Binary floating point never enters a
//! monetary code path, so two settlements of the same lease can never
//! disagree by a rounding artifact.
//!
//! The serde representation **is** the decimal string: an `Amount`
//! serializes as `"1850.00"` and deserializes by parsing, which keeps
//! stored records and API payloads in the existing wire format.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MoneyError;

/// Minor units per major currency unit (two decimal places).
const MINOR_PER_MAJOR: i64 = 100;

/// A currency amount in integer minor units.
///
/// Ordering, equality, and hashing follow the inner minor-unit count, so
/// `Amount` values can be compared, clamped, and used as map keys
/// directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Zero currency units.
    pub const ZERO: Amount = Amount(0);

    /// Construct from a count of minor units.
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Construct from whole major units (e.g. `from_major(50)` = `50.00`).
    pub fn from_major(major: i64) -> Result<Self, MoneyError> {
        major
            .checked_mul(MINOR_PER_MAJOR)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Parse a decimal string (`"1850"`, `"1850.5"`, `"1850.50"`,
    /// `"-10.00"`) into minor units.
    ///
    /// At most two fractional digits are accepted; anything finer would
    /// silently lose money and is rejected instead.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(MoneyError::Empty);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyError::Malformed {
                input: input.to_string(),
            });
        }

        let frac_minor = match frac_part {
            None => 0,
            Some(f) => {
                if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(MoneyError::Malformed {
                        input: input.to_string(),
                    });
                }
                if f.len() > 2 {
                    return Err(MoneyError::TooManyDecimals {
                        input: input.to_string(),
                    });
                }
                // "5" means fifty minor units, "50" means fifty.
                let parsed: i64 = f.parse().map_err(|_| MoneyError::Malformed {
                    input: input.to_string(),
                })?;
                if f.len() == 1 {
                    parsed * 10
                } else {
                    parsed
                }
            }
        };

        let major: i64 = int_part.parse().map_err(|_| MoneyError::Overflow)?;
        let minor = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(frac_minor))
            .ok_or(MoneyError::Overflow)?;

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// The raw minor-unit count.
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Amount) -> Result<Amount, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Amount) -> Result<Amount, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked multiplication by a scalar (e.g. a day count).
    pub fn checked_mul(self, factor: i64) -> Result<Amount, MoneyError> {
        self.0
            .checked_mul(factor)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    /// Subtract, flooring the result at zero.
    ///
    /// A deduction can exhaust an amount but never drive it negative.
    pub fn deduct(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0).max(0))
    }

    /// `pct` percent of this amount, truncating toward zero.
    ///
    /// Widens through `i128`, so no intermediate overflow for any `i64`
    /// amount and `pct <= 100`.
    pub fn percent(self, pct: u32) -> Amount {
        Amount((i128::from(self.0) * i128::from(pct) / 100) as i64)
    }

    /// Render as a decimal string with exactly two fractional digits.
    pub fn to_decimal_string(&self) -> String {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl std::str::FromStr for Amount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Amount::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- parsing ----

    #[test]
    fn test_parse_whole_units() {
        assert_eq!(Amount::parse("2000").unwrap(), Amount::from_minor(200_000));
    }

    #[test]
    fn test_parse_two_decimals() {
        assert_eq!(Amount::parse("2000.50").unwrap(), Amount::from_minor(200_050));
    }

    #[test]
    fn test_parse_one_decimal_scales() {
        assert_eq!(Amount::parse("2000.5").unwrap(), Amount::from_minor(200_050));
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(Amount::parse("-10.25").unwrap(), Amount::from_minor(-1_025));
    }

    #[test]
    fn test_parse_rejects_three_decimals() {
        assert!(matches!(
            Amount::parse("1.005"),
            Err(MoneyError::TooManyDecimals { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("  ").is_err());
        assert!(Amount::parse("12.").is_err());
        assert!(Amount::parse(".50").is_err());
        assert!(Amount::parse("1,000").is_err());
        assert!(Amount::parse("1e3").is_err());
        assert!(Amount::parse("10.5.0").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            Amount::parse("99999999999999999999"),
            Err(MoneyError::Overflow)
        ));
    }

    // ---- arithmetic ----

    #[test]
    fn test_percent() {
        let deposit = Amount::parse("2000.00").unwrap();
        assert_eq!(deposit.percent(50), Amount::parse("1000.00").unwrap());
        assert_eq!(deposit.percent(75), Amount::parse("1500.00").unwrap());
        assert_eq!(deposit.percent(100), deposit);
    }

    #[test]
    fn test_percent_truncates() {
        // 75% of 0.01 truncates to zero minor units.
        assert_eq!(Amount::from_minor(1).percent(75), Amount::ZERO);
    }

    #[test]
    fn test_deduct_floors_at_zero() {
        let base = Amount::parse("100.00").unwrap();
        let fee = Amount::parse("150.00").unwrap();
        assert_eq!(base.deduct(fee), Amount::ZERO);
        assert_eq!(fee.deduct(base), Amount::parse("50.00").unwrap());
    }

    #[test]
    fn test_checked_mul_overflow() {
        assert!(Amount::from_minor(i64::MAX).checked_mul(2).is_err());
    }

    // ---- rendering / serde ----

    #[test]
    fn test_display_pads_fraction() {
        assert_eq!(Amount::from_minor(200_050).to_string(), "2000.50");
        assert_eq!(Amount::from_minor(5).to_string(), "0.05");
        assert_eq!(Amount::from_minor(-1_025).to_string(), "-10.25");
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let a = Amount::parse("1850.00").unwrap();
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"1850.00\"");
        let parsed: Amount = serde_json::from_str("\"1850.00\"").unwrap();
        assert_eq!(parsed, a);
    }

    #[test]
    fn test_serde_rejects_float_json() {
        assert!(serde_json::from_str::<Amount>("1850.0").is_err());
    }
}
