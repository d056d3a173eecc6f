//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use derive_more::{Add, Sum};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::Percent;

/// Amount of money.
///
/// Currency is implied by the deployment and never stored.
#[derive(
    Add, Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Sum,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Money(Decimal);

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Number of decimal places [`Money`] is [`round`]ed to.
    ///
    /// [`round`]: Money::round
    pub const SCALE: u32 = 2;

    /// Creates a new [`Money`] of the provided `amount`.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Multiplies this [`Money`] by the provided `quantity`.
    #[must_use]
    pub fn times(self, quantity: i32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Reduces this [`Money`] by the provided `discount`.
    #[must_use]
    pub fn discounted(self, discount: Percent) -> Self {
        Self(self.0 * (Decimal::ONE - discount.fraction()))
    }

    /// Returns this [`Money`], or [`Money::ZERO`] if it's negative.
    #[must_use]
    pub fn non_negative(self) -> Self {
        self.max(Self::ZERO)
    }

    /// Rounds this [`Money`] to [`Money::SCALE`] decimal places, sending
    /// midpoints to the even neighbour.
    #[must_use]
    pub fn round(self) -> Self {
        Self(self.0.round_dp_with_strategy(
            Self::SCALE,
            RoundingStrategy::MidpointNearestEven,
        ))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round().0)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| "invalid amount")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}` format, where:
    /// - `major` is an integer;
    /// - `minor` is a two-digit integer.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use crate::Percent;

    use super::Money;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn percent(s: &str) -> Percent {
        Percent::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(money("123.45").amount(), Decimal::new(12345, 2));
        assert_eq!(money(" 5 ").amount(), Decimal::from(5));
        assert_eq!(money("-1.5").amount(), Decimal::new(-15, 1));

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("123.45USD").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(money("123.45").to_string(), "123.45");
        assert_eq!(money("123").to_string(), "123.00");
        assert_eq!(money("123.4").to_string(), "123.40");
        assert_eq!(money("0.125").to_string(), "0.12");
        assert_eq!(money("0.135").to_string(), "0.14");
    }

    #[test]
    fn times() {
        assert_eq!(money("10.00").times(2), money("20.00"));
        assert_eq!(money("5").times(0), Money::ZERO);
        assert_eq!(money("5").times(-1), money("-5"));
    }

    #[test]
    fn discounted() {
        assert_eq!(money("20.00").discounted(percent("5")), money("19"));
        assert_eq!(money("5.00").discounted(percent("5")), money("4.75"));
        assert_eq!(money("5.00").discounted(Percent::ZERO), money("5"));
        assert_eq!(money("100").discounted(percent("100")), Money::ZERO);
    }

    #[test]
    fn non_negative() {
        assert_eq!(money("-0.01").non_negative(), Money::ZERO);
        assert_eq!(money("0.01").non_negative(), money("0.01"));
    }

    #[test]
    fn round() {
        assert_eq!(money("1.005").round(), money("1.00"));
        assert_eq!(money("1.015").round(), money("1.02"));
        assert_eq!(money("1.0151").round(), money("1.02"));
        assert_eq!(money("19").round(), money("19"));
    }

    #[test]
    fn sum() {
        let total: Money =
            [money("19.00"), money("4.75")].into_iter().sum();
        assert_eq!(total, money("23.75"));
    }
}
