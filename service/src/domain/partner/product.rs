//! [`PartnerProduct`] definitions.

use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::{partner, product};
#[cfg(doc)]
use crate::domain::{Partner, Product};

/// Order of a [`Product`] placed by a [`Partner`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PartnerProduct {
    /// ID of the [`Partner`] ordering the [`Product`].
    pub partner_id: partner::Id,

    /// ID of the ordered [`Product`].
    pub product_id: product::Id,

    /// Ordered [`Amount`] of the [`Product`].
    pub amount: Amount,
}

/// Number of [`Product`] units in a [`PartnerProduct`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Amount(i32);
