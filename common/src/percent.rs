//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Zero [`Percent`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            Some(Self(val))
        }
    }

    /// Creates a new [`Percent`] by clamping the provided value into the
    /// `[0, 100]` range.
    #[must_use]
    pub fn saturating(val: Decimal) -> Self {
        Self(val.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Returns this [`Percent`] as a fraction of one (`15%` is `0.15`).
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn from_str() {
        assert!(Percent::from_str("0").is_ok());
        assert!(Percent::from_str("15").is_ok());
        assert!(Percent::from_str("100").is_ok());
        assert!(Percent::from_str("12.5").is_ok());

        assert!(Percent::from_str("-1").is_err());
        assert!(Percent::from_str("100.01").is_err());
        assert!(Percent::from_str("ten").is_err());
    }

    #[test]
    fn saturating() {
        assert_eq!(Percent::saturating(Decimal::from(-3)), Percent::ZERO);
        assert_eq!(
            Percent::saturating(Decimal::from(250)),
            Percent::from_str("100").unwrap(),
        );
        assert_eq!(
            Percent::saturating(Decimal::from(7)),
            Percent::from_str("7").unwrap(),
        );
    }

    #[test]
    fn fraction() {
        assert_eq!(
            Percent::from_str("15").unwrap().fraction(),
            Decimal::new(15, 2),
        );
        assert_eq!(
            Percent::from_str("5").unwrap().fraction(),
            Decimal::new(5, 2),
        );
        assert_eq!(Percent::ZERO.fraction(), Decimal::ZERO);
    }
}
