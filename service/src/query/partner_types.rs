//! [`Query`] collection related to [`PartnerType`]s.

use common::operations::By;

use crate::domain::PartnerType;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`PartnerType`]s ordered by their names.
pub type All = DatabaseQuery<By<Vec<PartnerType>, ()>>;
