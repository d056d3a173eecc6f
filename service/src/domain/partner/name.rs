//! [`PartnerName`] definitions.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use super::Name;
#[cfg(doc)]
use crate::domain::Partner;

/// Registered name of a [`Partner`] organization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartnerName {
    /// ID of this [`PartnerName`].
    pub id: Id,

    /// [`Name`] itself.
    pub name: Name,
}

/// ID of a [`PartnerName`].
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
