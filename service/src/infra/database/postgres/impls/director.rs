//! [`Director`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{director, Director},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds a [`Director`] out of the provided [`Row`].
fn director_from_row(row: &Row) -> Director {
    Director {
        id: row.get("id"),
        family_name: row.get("family_name"),
        name: row.get("name"),
        patronymic: row.get("patronymic"),
    }
}

impl<C> Database<Select<By<HashMap<director::Id, Director>, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = HashMap<director::Id, Director>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<HashMap<director::Id, Director>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, family_name, name, patronymic \
            FROM directors";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(director_from_row)
            .map(|d| (d.id, d))
            .collect())
    }
}

impl<C> Database<Select<By<Option<Director>, director::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Director>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Director>, director::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, family_name, name, patronymic \
            FROM directors \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(director_from_row))
    }
}

impl<C> Database<Insert<Director>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Director>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(director): Insert<Director>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(director)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Director>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(director): Update<Director>,
    ) -> Result<Self::Ok, Self::Err> {
        let Director {
            id,
            family_name,
            name,
            patronymic,
        } = director;

        const SQL: &str = "\
            INSERT INTO directors (id, family_name, name, patronymic) \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET family_name = EXCLUDED.family_name, \
                name = EXCLUDED.name, \
                patronymic = EXCLUDED.patronymic";
        self.exec(SQL, &[&id, &family_name, &name, &patronymic])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
