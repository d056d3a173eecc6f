//! [`Partner`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        partner::{self, kind, name},
        Partner, PartnerName, PartnerType,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds a [`Partner`] out of the provided [`Row`].
fn partner_from_row(row: &Row) -> Partner {
    Partner {
        id: row.get("id"),
        name_id: row.get("name_id"),
        type_id: row.get("type_id"),
        director_id: row.get("director_id"),
        address: row.get("address"),
        phone: row.get("phone"),
        email: row.get("email"),
        inn: row.get("inn"),
        rate: row.get("rate"),
    }
}

impl<C> Database<Select<By<Vec<Partner>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Partner>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Partner>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name_id, type_id, director_id, \
                   address, phone, email, \
                   inn, rate \
            FROM partners \
            ORDER BY position ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(partner_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Partner>, partner::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Partner>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Partner>, partner::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name_id, type_id, director_id, \
                   address, phone, email, \
                   inn, rate \
            FROM partners \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(partner_from_row))
    }
}

impl<C> Database<Insert<Partner>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Partner>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(partner): Insert<Partner>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(partner)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Partner>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(partner): Update<Partner>,
    ) -> Result<Self::Ok, Self::Err> {
        let Partner {
            id,
            name_id,
            type_id,
            director_id,
            address,
            phone,
            email,
            inn,
            rate,
        } = partner;

        const SQL: &str = "\
            INSERT INTO partners (\
                id, name_id, type_id, director_id, \
                address, phone, email, \
                inn, rate\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, \
                $8::VARCHAR, $9::INT4\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name_id = EXCLUDED.name_id, \
                type_id = EXCLUDED.type_id, \
                director_id = EXCLUDED.director_id, \
                address = EXCLUDED.address, \
                phone = EXCLUDED.phone, \
                email = EXCLUDED.email, \
                inn = EXCLUDED.inn, \
                rate = EXCLUDED.rate";
        self.exec(
            SQL,
            &[
                &id,
                &name_id,
                &type_id,
                &director_id,
                &address,
                &phone,
                &email,
                &inn,
                &rate,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Partner, partner::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Partner, partner::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: partner::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO partners_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<HashMap<name::Id, PartnerName>, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = HashMap<name::Id, PartnerName>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<HashMap<name::Id, PartnerName>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM partner_names";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                (
                    id,
                    PartnerName {
                        id,
                        name: row.get("name"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<PartnerName>, name::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PartnerName>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PartnerName>, name::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT name \
            FROM partner_names \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| PartnerName {
                id,
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Insert<PartnerName>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<PartnerName>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(name): Insert<PartnerName>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(name)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<PartnerName>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(name): Update<PartnerName>,
    ) -> Result<Self::Ok, Self::Err> {
        let PartnerName { id, name } = name;

        const SQL: &str = "\
            INSERT INTO partner_names (id, name) \
            VALUES ($1::UUID, $2::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name";
        self.exec(SQL, &[&id, &name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<PartnerType>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<PartnerType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<PartnerType>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM partner_types \
            ORDER BY name ASC, id ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| PartnerType {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<HashMap<kind::Id, PartnerType>, ()>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Vec<PartnerType>, ()>>,
        Ok = Vec<PartnerType>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = HashMap<kind::Id, PartnerType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<kind::Id, PartnerType>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .execute(Select(By::<Vec<PartnerType>, _>::new(by.into_inner())))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|t| (t.id, t))
            .collect())
    }
}

impl<C> Database<Select<By<Option<PartnerType>, kind::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PartnerType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PartnerType>, kind::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT name \
            FROM partner_types \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| PartnerType {
                id,
                name: row.get("name"),
            }))
    }
}
