//! [`Partner`] definitions.

pub mod form;
pub mod kind;
pub mod name;
pub mod product;

use std::sync::LazyLock;

use common::Percent;
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::director;
#[cfg(doc)]
use crate::domain::Director;

pub use self::{
    form::{Draft, Form},
    kind::PartnerType,
    name::PartnerName,
    product::PartnerProduct,
};

/// Business partner (a supplier or a client).
#[derive(Clone, Debug)]
pub struct Partner {
    /// ID of this [`Partner`].
    pub id: Id,

    /// ID of the [`PartnerName`] of this [`Partner`].
    pub name_id: name::Id,

    /// ID of the [`PartnerType`] of this [`Partner`].
    pub type_id: kind::Id,

    /// ID of the [`Director`] of this [`Partner`].
    pub director_id: director::Id,

    /// Legal [`Address`] of this [`Partner`].
    pub address: Address,

    /// [`Phone`] of this [`Partner`].
    pub phone: Phone,

    /// [`Email`] of this [`Partner`], if any.
    pub email: Option<Email>,

    /// Tax identification number of this [`Partner`].
    pub inn: Inn,

    /// [`Rate`] of this [`Partner`].
    pub rate: Rate,
}

/// ID of a [`Partner`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`Partner`] organization.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty()
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Legal address of a [`Partner`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty()
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Phone number of a [`Partner`].
///
/// Any non-blank text is accepted, as numbers are entered in free form.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number && !number.is_empty()
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Email address of a [`Partner`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format:
        /// `local@domain.zone`, where none of the parts contains `@` or
        /// whitespace.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Tax identification number (INN) of a [`Partner`].
///
/// Consists of exactly 10 (organizations) or 12 (individuals) decimal digits.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Inn(String);

impl Inn {
    /// Creates a new [`Inn`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Inn`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.chars().all(|c| c.is_ascii_digit())
            && matches!(number.len(), 10 | 12)
    }
}

impl FromStr for Inn {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Inn`")
    }
}

/// Rate of a [`Partner`], driving its purchase discount.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Rate(i32);

impl Rate {
    /// Maximum discount a [`Rate`] grants, in percents.
    pub const MAX_DISCOUNT: i32 = 15;

    /// Creates a new [`Rate`] if the given `rate` is not negative.
    #[must_use]
    pub fn new(rate: i32) -> Option<Self> {
        (rate >= 0).then_some(Self(rate))
    }

    /// Returns the discount granted by this [`Rate`]: one percent per every
    /// two full points, capped at [`Rate::MAX_DISCOUNT`].
    #[must_use]
    pub fn discount(self) -> Percent {
        Percent::saturating(Decimal::from((self.0 / 2).min(Self::MAX_DISCOUNT)))
    }
}

impl FromStr for Rate {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Rate`")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Percent;

    use super::{Email, Inn, Name, Rate};

    fn percent(s: &str) -> Percent {
        Percent::from_str(s).unwrap()
    }

    #[test]
    fn rate_discount() {
        assert_eq!(Rate::new(0).unwrap().discount(), Percent::ZERO);
        assert_eq!(Rate::new(1).unwrap().discount(), Percent::ZERO);
        assert_eq!(Rate::new(10).unwrap().discount(), percent("5"));
        assert_eq!(Rate::new(11).unwrap().discount(), percent("5"));
        assert_eq!(Rate::new(29).unwrap().discount(), percent("14"));
        assert_eq!(Rate::new(30).unwrap().discount(), percent("15"));
        assert_eq!(Rate::new(31).unwrap().discount(), percent("15"));
        assert_eq!(Rate::new(100).unwrap().discount(), percent("15"));
        assert_eq!(Rate::new(i32::MAX).unwrap().discount(), percent("15"));
    }

    #[test]
    fn rate_discount_never_exceeds_cap() {
        for r in 0..=100 {
            let discount = Rate::new(r).unwrap().discount();
            assert!(discount <= percent("15"), "rate {r}: {discount}");
            assert_eq!(
                discount,
                percent(&(r / 2).min(15).to_string()),
                "rate {r}",
            );
        }
    }

    #[test]
    fn rate_from_str() {
        assert_eq!(Rate::from_str("0").unwrap(), Rate::new(0).unwrap());
        assert_eq!(Rate::from_str("42").unwrap(), Rate::new(42).unwrap());
        assert_eq!(Rate::from_str(" 7 ").unwrap(), Rate::new(7).unwrap());
        assert_eq!(Rate::from_str("+3").unwrap(), Rate::new(3).unwrap());

        assert!(Rate::from_str("-1").is_err());
        assert!(Rate::from_str("abc").is_err());
        assert!(Rate::from_str("1.5").is_err());
        assert!(Rate::from_str("").is_err());
        assert!(Rate::from_str("99999999999").is_err());
    }

    #[test]
    fn inn() {
        assert!(Inn::new("1234567890").is_some());
        assert!(Inn::new("123456789012").is_some());

        assert!(Inn::new("123456789").is_none());
        assert!(Inn::new("12345678901").is_none());
        assert!(Inn::new("1234567890123").is_none());
        assert!(Inn::new("12345a7890").is_none());
        assert!(Inn::new(" 123456789").is_none());
        assert!(Inn::new("").is_none());
    }

    #[test]
    fn email() {
        assert!(Email::new("foo@bar.com").is_some());
        assert!(Email::new("first.last@mail.example.org").is_some());

        assert!(Email::new("foo@bar").is_none());
        assert!(Email::new("foo@@bar.com").is_none());
        assert!(Email::new("foo bar@baz.com").is_none());
        assert!(Email::new(" foo@bar.com").is_none());
        assert!(Email::new("@bar.com").is_none());
        assert!(Email::new("").is_none());
    }

    #[test]
    fn name() {
        assert!(Name::new("Stroy LLC").is_some());

        assert!(Name::new("").is_none());
        assert!(Name::new("   ").is_none());
        assert!(Name::new(" Stroy LLC").is_none());
    }
}
