//! [`Query`] collection related to a single [`Partner`].

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::{director, partner, Director, Partner, PartnerName},
    infra::{database, Database},
    Service,
};

use super::{DatabaseQuery, Query};

/// Queries a [`Partner`] by its [`partner::Id`].
pub type ById = DatabaseQuery<By<Option<Partner>, partner::Id>>;

/// Queries a [`partner::Form`] prefilled with the values of an existing
/// [`Partner`].
#[derive(Clone, Copy, Debug, From)]
pub struct Form {
    /// ID of the [`Partner`] to prefill the [`partner::Form`] with.
    pub partner_id: partner::Id,
}

impl<Db> Query<Form> for Service<Db>
where
    Db: Database<
            Select<By<Option<Partner>, partner::Id>>,
            Ok = Option<Partner>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<PartnerName>, partner::name::Id>>,
            Ok = Option<PartnerName>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Director>, director::Id>>,
            Ok = Option<Director>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<partner::Form>;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: Form) -> Result<Self::Ok, Self::Err> {
        let Form { partner_id } = query;

        let Some(partner) = self
            .database()
            .execute(Select(By::<Option<Partner>, _>::new(partner_id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let name = self
            .database()
            .execute(Select(By::<Option<PartnerName>, _>::new(
                partner.name_id,
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let director = self
            .database()
            .execute(Select(By::<Option<Director>, _>::new(
                partner.director_id,
            )))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Some(partner::Form::prefilled(
            &partner,
            name.as_ref(),
            director.as_ref(),
        )))
    }
}
