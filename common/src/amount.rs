//! [`Amount`]-related definitions.

use std::{fmt, str::FromStr};

use derive_more::{From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Exact decimal amount of money.
///
/// Currency is implied by the deployment, so it's not tracked.
#[derive(
    Clone, Copy, Debug, Default, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Amount(
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::float"))]
    Decimal,
);

impl Amount {
    /// Zero [`Amount`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Adds the `rhs` [`Amount`] to this one, returning [`None`] on
    /// overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtracts the `rhs` [`Amount`] from this one, returning [`None`] on
    /// overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Splits this [`Amount`] into the provided number of equal `parts`,
    /// rounded to 2 decimal places.
    ///
    /// Returns [`None`] if there are no `parts`.
    #[must_use]
    pub fn checked_split(self, parts: usize) -> Option<Self> {
        self.0
            .checked_div(Decimal::from(parts))
            .map(|d| Self(d.round_dp(2)))
    }

    /// Sums up the provided [`Amount`]s, returning [`None`] on overflow.
    #[must_use]
    pub fn checked_sum(
        amounts: impl IntoIterator<Item = Self>,
    ) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, a| acc.checked_add(a))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Amount {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| "invalid amount")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Amount;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(Amount::from_str("123.45").unwrap(), amount("123.45"));
        assert_eq!(Amount::from_str(" 7 ").unwrap(), amount("7"));
        assert_eq!(Amount::from_str("-10.5").unwrap(), amount("-10.5"));

        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("12USD").is_err());
        assert!(Amount::from_str("ten").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(amount("123.45").to_string(), "123.45");
        assert_eq!(amount("123.00").to_string(), "123");
        assert_eq!(amount("123.0").to_string(), "123");
        assert_eq!(amount("0.50").to_string(), "0.5");
    }

    #[test]
    fn arithmetic_is_exact() {
        assert_eq!(
            amount("0.1").checked_add(amount("0.2")),
            Some(amount("0.3")),
        );
        assert_eq!(
            amount("100").checked_sub(amount("0.01")),
            Some(amount("99.99")),
        );
        assert_eq!(
            Amount::checked_sum([
                amount("1.10"),
                amount("2.20"),
                amount("3.30"),
            ]),
            Some(amount("6.6")),
        );
        assert_eq!(Amount::checked_sum([]), Some(Amount::ZERO));
    }

    #[test]
    fn splits_into_parts() {
        assert_eq!(amount("7000.50").checked_split(2), Some(amount("3500.25")));
        assert_eq!(amount("100").checked_split(3), Some(amount("33.33")));
        assert_eq!(amount("100").checked_split(0), None);
    }

    #[test]
    fn arithmetic_detects_overflow() {
        let huge = amount("50000000000000000000000000000");

        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(
            amount("-1")
                .checked_sub(huge)
                .and_then(|a| a.checked_sub(huge)),
            None,
        );
        assert_eq!(Amount::checked_sum([huge, huge, amount("1")]), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_number() {
        let parsed: Amount = serde_json::from_str("1500.25").unwrap();
        assert_eq!(parsed, amount("1500.25"));

        let parsed: Amount = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, amount("42"));

        assert_eq!(serde_json::to_string(&amount("12.5")).unwrap(), "12.5");
    }
}
