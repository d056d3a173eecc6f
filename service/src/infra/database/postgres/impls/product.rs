//! [`Product`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{product, PartnerProduct, Product},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<HashMap<product::Id, Product>, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = HashMap<product::Id, Product>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<HashMap<product::Id, Product>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, min_cost \
            FROM products";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                (
                    id,
                    Product {
                        id,
                        name: row.get("name"),
                        min_cost: row.get("min_cost"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<PartnerProduct>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<PartnerProduct>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<PartnerProduct>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT partner_id, product_id, amount \
            FROM partner_products \
            ORDER BY position ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| PartnerProduct {
                partner_id: row.get("partner_id"),
                product_id: row.get("product_id"),
                amount: row.get("amount"),
            })
            .collect())
    }
}
