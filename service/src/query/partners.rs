//! [`Query`] collection related to the multiple [`Partner`]s.

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        director, partner, product, Director, Partner, PartnerName,
        PartnerProduct, PartnerType, Product,
    },
    infra::{database, Database},
    read::partner::display::{self, Display, Lookup},
    Service,
};

use super::Query;

/// Queries the [`Display`] overview of all the [`Partner`]s along with their
/// ordered [`Product`]s and discounted totals.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overview;

impl<Db> Query<Overview> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Partner>, ()>>,
            Ok = Vec<Partner>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<partner::name::Id, PartnerName>, ()>>,
            Ok = HashMap<partner::name::Id, PartnerName>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<partner::kind::Id, PartnerType>, ()>>,
            Ok = HashMap<partner::kind::Id, PartnerType>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<director::Id, Director>, ()>>,
            Ok = HashMap<director::Id, Director>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<PartnerProduct>, ()>>,
            Ok = Vec<PartnerProduct>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<product::Id, Product>, ()>>,
            Ok = HashMap<product::Id, Product>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Display>;
    type Err = Traced<database::Error>;

    #[tracing::instrument(skip_all)]
    async fn execute(&self, _: Overview) -> Result<Self::Ok, Self::Err> {
        let db = self.database();

        let partners = db
            .execute(Select(By::<Vec<Partner>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let orders = db
            .execute(Select(By::<Vec<PartnerProduct>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let names = db
            .execute(Select(By::<HashMap<_, PartnerName>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let types = db
            .execute(Select(By::<HashMap<_, PartnerType>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let directors = db
            .execute(Select(By::<HashMap<_, Director>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let products = db
            .execute(Select(By::<HashMap<_, Product>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let lookup = Lookup {
            names,
            types,
            directors,
            products,
        };
        tracing::debug!(
            partners = partners.len(),
            orders = orders.len(),
            names = lookup.names.len(),
            types = lookup.types.len(),
            directors = lookup.directors.len(),
            products = lookup.products.len(),
            "loaded partners overview",
        );

        Ok(display::aggregate(&partners, &orders, &lookup))
    }
}
