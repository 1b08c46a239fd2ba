//! Monetary amounts stored as whole cents.
//!
//! Ledger amounts are kept as integers so that replaying running balances and
//! summing a column in SQL always agree to the cent.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// An amount of money in cents. May be negative, e.g. for an overdrawn balance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// No money.
    pub const ZERO: Money = Money(0);

    /// Create an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Whether the amount is strictly less than zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, returning `None` if the result does not fit.
    pub const fn checked_add(self, rhs: Money) -> Option<Money> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtract `rhs`, returning `None` if the result does not fit.
    pub const fn checked_sub(self, rhs: Money) -> Option<Money> {
        match self.0.checked_sub(rhs.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Convert a decimal amount, e.g. `12.345`, rounding half away from zero to the nearest cent.
    ///
    /// Returns `None` if the amount has more cents than fit in an `i64`.
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Self)
    }

    /// The exact amount in currency units, with two decimal places.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Money)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Accepts JSON numbers and numeric strings, since form inputs often send "12.50".
struct MoneyVisitor;

impl de::Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a monetary amount as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        to_money(Decimal::from(value), &value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        to_money(Decimal::from(value), &value)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        // `Display` gives the shortest digits that round-trip, so 1.005 stays "1.005".
        let amount = Decimal::from_str(&value.to_string())
            .map_err(|_| E::custom(format!("{value} is not a valid monetary amount")))?;

        to_money(amount, &value)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Ok(Money::ZERO);
        }

        let amount = Decimal::from_str(trimmed)
            .map_err(|_| E::custom(format!("\"{value}\" is not a number")))?;

        to_money(amount, &value)
    }
}

fn to_money<E: de::Error>(amount: Decimal, original: &dyn Display) -> Result<Money, E> {
    Money::from_decimal(amount)
        .ok_or_else(|| E::custom(format!("{original} is not a valid monetary amount")))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use super::Money;

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(
            Money::from_decimal(Decimal::new(29, 2)),
            Some(Money::from_cents(29))
        );
        assert_eq!(
            Money::from_decimal(Decimal::new(19_999, 3)),
            Some(Money::from_cents(2_000))
        );
        assert_eq!(
            Money::from_decimal(Decimal::NEGATIVE_ONE),
            Some(Money::from_cents(-100))
        );
    }

    #[test]
    fn rounds_half_cents_away_from_zero() {
        assert_eq!(
            Money::from_decimal(Decimal::new(1_005, 3)),
            Some(Money::from_cents(101))
        );
        assert_eq!(
            Money::from_decimal(Decimal::new(-5, 3)),
            Some(Money::from_cents(-1))
        );
        assert_eq!(
            Money::from_decimal(Decimal::new(1_004, 3)),
            Some(Money::from_cents(100))
        );
    }

    #[test]
    fn rejects_amounts_too_large_for_cents() {
        assert_eq!(Money::from_decimal(Decimal::MAX), None);
        assert_eq!(
            Money::from_decimal(Decimal::from(i64::MAX / 100 + 1)),
            None
        );
    }

    #[test]
    fn displays_with_two_decimal_places() {
        assert_eq!(Money::from_cents(12_345).to_string(), "123.45");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let from_int: Money = serde_json::from_str("100").unwrap();
        let from_float: Money = serde_json::from_str("99.99").unwrap();
        let from_string: Money = serde_json::from_str("\" 30.50 \"").unwrap();
        let from_blank: Money = serde_json::from_str("\"\"").unwrap();

        assert_eq!(from_int, Money::from_cents(10_000));
        assert_eq!(from_float, Money::from_cents(9_999));
        assert_eq!(from_string, Money::from_cents(3_050));
        assert_eq!(from_blank, Money::ZERO);
    }

    #[test]
    fn deserializes_half_cents_without_float_error() {
        let from_string: Money = serde_json::from_str("\"1.005\"").unwrap();
        let from_negative_string: Money = serde_json::from_str("\"-0.005\"").unwrap();
        let from_number: Money = serde_json::from_str("1.005").unwrap();

        assert_eq!(from_string, Money::from_cents(101));
        assert_eq!(from_negative_string, Money::from_cents(-1));
        assert_eq!(from_number, Money::from_cents(101));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let result: Result<Money, _> = serde_json::from_str("\"ten dollars\"");

        assert!(result.is_err());
    }

    #[test]
    fn rejects_amounts_that_overflow_cents() {
        let result: Result<Money, _> = serde_json::from_str("\"100000000000000000000\"");

        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_decimal_number() {
        let json = serde_json::to_value(Money::from_cents(12_050)).unwrap();

        assert_eq!(json, serde_json::json!(120.5));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Money::from_cents(i64::MAX);

        assert_eq!(
            Money::from_cents(100).checked_sub(Money::from_cents(400)),
            Some(Money::from_cents(-300))
        );
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)),
            None
        );
        assert_eq!(max.checked_add(Money::ZERO), Some(max));
    }

    #[test]
    fn round_trips_through_sqlite() {
        let connection = Connection::open_in_memory().unwrap();
        let want = Money::from_cents(-4_321);

        let got: Money = connection
            .query_row("SELECT ?1", [want], |row| row.get(0))
            .unwrap();

        assert_eq!(got, want);
    }
}
